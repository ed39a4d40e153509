//! RoundNode: one node of the bracket graph.

use crate::models::game::Match;
use crate::models::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a round in the bracket's arena.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(pub usize);

/// All teams holding one win-loss record at the same point of the bracket.
///
/// Two paths that reach the same record converge on the same node; the node
/// then lists both parents.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundNode {
    pub record: Record,
    /// Team slots in this round (half of each contributing parent, summed).
    pub num_teams: usize,
    /// Breadth-first depth, the root is level 1.
    pub level: usize,
    pub matches: Vec<Match>,
    pub winning_round: Option<RoundId>,
    pub losing_round: Option<RoundId>,
    /// Rounds whose winners or losers feed this one, in discovery order.
    pub parents: Vec<RoundId>,
}

impl RoundNode {
    pub fn new(record: Record, num_teams: usize, level: usize) -> Self {
        Self {
            record,
            num_teams,
            level,
            matches: Vec::new(),
            winning_round: None,
            losing_round: None,
            parents: Vec::new(),
        }
    }

    pub fn has_two_parents(&self) -> bool {
        self.parents.len() > 1
    }

    /// Winning child then losing child, whichever exist.
    pub fn children(&self) -> impl Iterator<Item = RoundId> {
        self.winning_round.into_iter().chain(self.losing_round)
    }

    /// Every match is paired and has a winner.
    pub fn is_decided(&self) -> bool {
        self.matches.iter().all(Match::is_decided)
    }

    /// No match is paired yet.
    pub fn is_empty(&self) -> bool {
        self.matches.iter().all(|m| m.record.is_none())
    }

    /// Drop every match record in this round.
    pub fn clear(&mut self) {
        for m in &mut self.matches {
            m.record = None;
        }
    }
}

impl fmt::Display for RoundNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} teams", self.record, self.num_teams)?;
        if self.has_two_parents() {
            write!(f, ", {} parents", self.parents.len())?;
        }
        write!(f, ")")
    }
}
