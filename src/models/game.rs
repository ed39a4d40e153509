//! Match, MatchRecord and MatchId.

use crate::models::record::Record;
use crate::models::team::Seed;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a pairing won.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Upper,
    Lower,
}

/// Stable identifier of a match slot: the round's record plus the slot index.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct MatchId {
    pub round: Record,
    pub index: usize,
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.round, self.index)
    }
}

/// A pairing and its game score. Decided iff the two win counts differ.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Higher-ranked team at pairing time.
    pub upper_team: Seed,
    pub lower_team: Seed,
    pub upper_team_wins: u32,
    pub lower_team_wins: u32,
}

impl MatchRecord {
    /// A fresh pairing with no games played.
    pub fn new(upper_team: Seed, lower_team: Seed) -> Self {
        Self {
            upper_team,
            lower_team,
            upper_team_wins: 0,
            lower_team_wins: 0,
        }
    }

    /// Same pairing with the given score.
    pub fn with_score(self, upper_team_wins: u32, lower_team_wins: u32) -> Self {
        Self {
            upper_team_wins,
            lower_team_wins,
            ..self
        }
    }

    pub fn is_decided(&self) -> bool {
        self.upper_team_wins != self.lower_team_wins
    }

    /// None while undecided.
    pub fn winning_side(&self) -> Option<Side> {
        match self.upper_team_wins.cmp(&self.lower_team_wins) {
            std::cmp::Ordering::Greater => Some(Side::Upper),
            std::cmp::Ordering::Less => Some(Side::Lower),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn winner(&self) -> Option<Seed> {
        self.winning_side().map(|s| self.team(s))
    }

    pub fn loser(&self) -> Option<Seed> {
        self.winning_side().map(|s| match s {
            Side::Upper => self.lower_team,
            Side::Lower => self.upper_team,
        })
    }

    pub fn team(&self, side: Side) -> Seed {
        match side {
            Side::Upper => self.upper_team,
            Side::Lower => self.lower_team,
        }
    }

    pub fn involves(&self, seed: Seed) -> bool {
        self.upper_team == seed || self.lower_team == seed
    }
}

impl fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vs {}  {}-{}",
            self.upper_team, self.lower_team, self.upper_team_wins, self.lower_team_wins
        )
    }
}

/// One match slot inside a round. Created empty when the bracket is built.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// None until the round is paired.
    pub record: Option<MatchRecord>,
}

impl Match {
    pub fn new(round: Record, index: usize) -> Self {
        Self {
            id: MatchId { round, index },
            record: None,
        }
    }

    /// Paired and decided.
    pub fn is_decided(&self) -> bool {
        self.record.is_some_and(|r| r.is_decided())
    }
}
