//! Bracket construction: round graph, empty matches, seeds, and the opening pairings.

use crate::logic::propagation::invalidate_descendants;
use crate::logic::seeding::{pair, rank_groups, RandomSeeding, SeedPolicy};
use crate::logic::structure::build_structure;
use crate::logic::traversal::{initialize_matches, walk_levels};
use crate::models::{Bracket, BracketConfig, BracketError, RoundId, Seed, Team};
use log::{debug, info};
use std::collections::HashMap;

impl Bracket {
    /// Bracket for `num_teams` placeholder teams ("Team 1", ...), seeds shuffled at random.
    pub fn new(num_teams: usize, win_requirement: u32) -> Result<Self, BracketError> {
        let config = BracketConfig::new(num_teams, win_requirement);
        Self::from_config(&config, &mut RandomSeeding::new(rand::thread_rng()))
    }

    /// Bracket shaped by `config` with placeholder team names.
    pub fn from_config(
        config: &BracketConfig,
        policy: &mut impl SeedPolicy,
    ) -> Result<Self, BracketError> {
        let entrants = (1..=config.num_teams).map(|i| format!("Team {i}")).collect();
        Self::with_entrants(entrants, config.win_requirement, policy)
    }

    /// Bracket for the named entrants. `policy` orders them; seeds are then 1..N in that order.
    pub fn with_entrants(
        mut entrants: Vec<String>,
        win_requirement: u32,
        policy: &mut impl SeedPolicy,
    ) -> Result<Self, BracketError> {
        let config = BracketConfig::new(entrants.len(), win_requirement);
        let rounds = build_structure(&config)?;
        let round_lookup = rounds
            .iter()
            .enumerate()
            .map(|(i, r)| (r.record, RoundId(i)))
            .collect::<HashMap<_, _>>();

        policy.arrange(&mut entrants);
        let teams = entrants
            .into_iter()
            .zip(1..)
            .map(|(name, seed)| Team::new(seed, name))
            .collect();

        let mut bracket = Bracket {
            win_requirement,
            rounds,
            teams,
            round_lookup,
            match_lookup: HashMap::new(),
        };
        initialize_matches(&mut bracket);
        walk_levels(
            &bracket,
            |_, _| {},
            |level| debug!("Level with {} round(s)", level.len()),
        );
        seed_root(&mut bracket);

        info!(
            "Created bracket: {} teams, {} wins to advance, {} rounds",
            config.num_teams,
            win_requirement,
            bracket.rounds.len()
        );
        Ok(bracket)
    }

    /// Clear every result and go back to the opening pairings (same seeds).
    pub fn reset(&mut self) {
        invalidate_descendants(self, Bracket::ROOT);
        self.round_mut(Bracket::ROOT).clear();
        for t in &mut self.teams {
            t.reset();
        }
        seed_root(self);
    }
}

/// Pair the root round from seed order (1 v N, 2 v N-1, ...).
fn seed_root(bracket: &mut Bracket) {
    let seeds: Vec<Seed> = bracket.teams.iter().map(|t| t.seed).collect();
    let ranked = rank_groups(&[seeds], &bracket.teams);
    let pairings = pair(&ranked);
    for (slot, record) in bracket
        .round_mut(Bracket::ROOT)
        .matches
        .iter_mut()
        .zip(pairings)
    {
        slot.record = Some(record);
    }
}
