//! Writing results and carrying them forward into later rounds.

use crate::logic::seeding::{pair, rank_groups};
use crate::logic::standings::{refresh_team_stats, tally};
use crate::logic::traversal::descendants;
use crate::models::{Bracket, BracketError, MatchRecord, RoundId, Seed};
use log::{debug, info};
use std::collections::VecDeque;

/// Write `record` into match `index` of `round`, then bring the rest of the bracket in line.
///
/// 1. Every round reachable from `round` is cleared, however deep.
/// 2. Starting at `round`, each child whose parents are all decided is
///    re-seeded and paired; a freshly paired round is itself checked for
///    children, so the cascade stops at the first undecided round.
///
/// Nothing is written if the round, the index or one of the seeds is unknown,
/// if the slot is not paired yet, or if `record` names other teams (or the
/// same teams the other way round) than the slot's pairing.
pub fn set_match_record(
    bracket: &mut Bracket,
    round: &str,
    index: usize,
    record: MatchRecord,
) -> Result<(), BracketError> {
    let round_id = bracket.round_id(round)?;
    let node = bracket.round(round_id);
    let slot = node.matches.get(index).ok_or(BracketError::MatchNotFound {
        round: node.record,
        index,
    })?;
    for seed in [record.upper_team, record.lower_team] {
        if bracket.team(seed).is_none() {
            return Err(BracketError::TeamNotFound(seed));
        }
    }
    let paired = slot.record.ok_or(BracketError::EmptyMatch {
        round: node.record,
        index,
    })?;
    let expected = (paired.upper_team, paired.lower_team);
    let found = (record.upper_team, record.lower_team);
    if expected != found {
        return Err(BracketError::PairingMismatch {
            round: node.record,
            index,
            expected,
            found,
        });
    }

    let was_complete = bracket.is_complete();
    bracket.round_mut(round_id).matches[index].record = Some(record);
    debug!("Round {} match {}: {}", round, index, record);

    let cleared = invalidate_descendants(bracket, round_id);
    let populated = repopulate_from(bracket, round_id);
    refresh_team_stats(bracket);

    if cleared > 0 || populated > 0 {
        debug!(
            "Round {}: cleared {} later round(s), paired {}",
            round, cleared, populated
        );
    }
    if !was_complete && bracket.is_complete() {
        info!("Bracket complete");
    }
    Ok(())
}

/// Set the score of an already paired match, keeping its teams.
pub fn set_match_result(
    bracket: &mut Bracket,
    round: &str,
    index: usize,
    upper_team_wins: u32,
    lower_team_wins: u32,
) -> Result<(), BracketError> {
    let node = bracket.round(bracket.round_id(round)?);
    let slot = node.matches.get(index).ok_or(BracketError::MatchNotFound {
        round: node.record,
        index,
    })?;
    let record = slot.record.ok_or(BracketError::EmptyMatch {
        round: node.record,
        index,
    })?;
    set_match_record(
        bracket,
        round,
        index,
        record.with_score(upper_team_wins, lower_team_wins),
    )
}

/// Clear every round reachable from `from`. Returns how many rounds had records.
pub(crate) fn invalidate_descendants(bracket: &mut Bracket, from: RoundId) -> usize {
    let mut cleared = 0;
    for id in descendants(bracket, from) {
        let node = bracket.round_mut(id);
        if !node.is_empty() {
            debug!("Clearing round {}", node.record);
            cleared += 1;
        }
        node.clear();
    }
    cleared
}

/// Pair every child that has become ready, breadth-first from `from`. Returns how many were paired.
fn repopulate_from(bracket: &mut Bracket, from: RoundId) -> usize {
    let mut populated = 0;
    let mut queue = VecDeque::from([from]);
    while let Some(id) = queue.pop_front() {
        let children: Vec<RoundId> = bracket.round(id).children().collect();
        for child in children {
            if populate_round(bracket, child) {
                populated += 1;
                queue.push_back(child);
            }
        }
    }
    populated
}

/// Seed and pair `child` from its parents. False (and nothing written) if a parent is undecided.
fn populate_round(bracket: &mut Bracket, child: RoundId) -> bool {
    let node = bracket.round(child);
    let parents = node.parents.clone();
    if !parents.iter().all(|&p| bracket.round(p).is_decided()) {
        return false;
    }

    let groups: Vec<Vec<Seed>> = parents
        .iter()
        .map(|&p| advancing_teams(bracket, p, child))
        .collect();
    let stats = tally(bracket, node.level);
    let ranked = rank_groups(&groups, &stats);
    let pairings = pair(&ranked);

    let node = bracket.round_mut(child);
    debug!("Pairing round {}: {:?}", node.record, ranked);
    for (slot, record) in node.matches.iter_mut().zip(pairings) {
        slot.record = Some(record);
    }
    true
}

/// Winners of `parent` if its winning edge leads to `child`, losers otherwise.
fn advancing_teams(bracket: &Bracket, parent: RoundId, child: RoundId) -> Vec<Seed> {
    let parent = bracket.round(parent);
    let winners = parent.winning_round == Some(child);
    parent
        .matches
        .iter()
        .filter_map(|m| m.record)
        .filter_map(|r| if winners { r.winner() } else { r.loser() })
        .collect()
}

impl Bracket {
    /// See [`set_match_record`].
    pub fn set_match_record(
        &mut self,
        round: &str,
        index: usize,
        record: MatchRecord,
    ) -> Result<(), BracketError> {
        set_match_record(self, round, index, record)
    }

    /// See [`set_match_result`].
    pub fn set_match_result(
        &mut self,
        round: &str,
        index: usize,
        upper_team_wins: u32,
        lower_team_wins: u32,
    ) -> Result<(), BracketError> {
        set_match_result(self, round, index, upper_team_wins, lower_team_wins)
    }
}
