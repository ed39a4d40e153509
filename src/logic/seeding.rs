//! Ranking and pairing: who plays whom when a round is filled.

use crate::models::{MatchRecord, Seed, Team};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;

/// Decides which entrant ends up with which seed. Seeds are handed out 1..N
/// in the order the policy leaves the entrants in.
pub trait SeedPolicy {
    fn arrange(&mut self, entrants: &mut [String]);
}

/// Keep the entrants in the order given (entrant 0 is seed 1).
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedSeeding;

impl SeedPolicy for FixedSeeding {
    fn arrange(&mut self, _entrants: &mut [String]) {}
}

/// Shuffle entrants before seeds are assigned.
#[derive(Clone, Debug)]
pub struct RandomSeeding<R> {
    rng: R,
}

impl<R: Rng> RandomSeeding<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SeedPolicy for RandomSeeding<R> {
    fn arrange(&mut self, entrants: &mut [String]) {
        entrants.shuffle(&mut self.rng);
    }
}

/// Ranking order: match differential (desc), game differential (desc), seed (asc).
///
/// Total, since seeds are unique.
pub fn compare_teams(a: &Team, b: &Team) -> Ordering {
    b.match_differential()
        .cmp(&a.match_differential())
        .then_with(|| b.game_differential().cmp(&a.game_differential()))
        .then_with(|| a.seed.cmp(&b.seed))
}

/// Rank the teams of one or more feeder groups as a single list.
///
/// `stats` is the roster ordered by seed (`stats[seed - 1]`). Groups from two
/// parents are merged and ranked together, so a group with a better match
/// differential fills the upper half and meets the lower half.
pub fn rank_groups(groups: &[Vec<Seed>], stats: &[Team]) -> Vec<Seed> {
    let mut ranked: Vec<Seed> = groups.iter().flatten().copied().collect();
    ranked.sort_by(|&a, &b| match (lookup(stats, a), lookup(stats, b)) {
        (Some(ta), Some(tb)) => compare_teams(ta, tb),
        _ => a.cmp(&b),
    });
    ranked
}

fn lookup(stats: &[Team], seed: Seed) -> Option<&Team> {
    stats.get(usize::try_from(seed).ok()?.checked_sub(1)?)
}

/// Pair a ranked list: 1st vs last, 2nd vs second-to-last, and so on.
///
/// The higher-ranked team is the upper team; pairs come out in rank order.
pub fn pair(ranked: &[Seed]) -> Vec<MatchRecord> {
    let n = ranked.len();
    (0..n / 2)
        .map(|i| MatchRecord::new(ranked[i], ranked[n - 1 - i]))
        .collect()
}
