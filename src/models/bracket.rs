//! Bracket, BracketConfig and BracketError.

use crate::models::game::{Match, MatchId, MatchRecord};
use crate::models::record::Record;
use crate::models::round::{RoundId, RoundNode};
use crate::models::team::{Seed, Team};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Errors that can occur while building or updating a bracket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Team count is not a power of two of at least 2.
    InvalidTeamCount(usize),
    /// Win requirement must be at least 1.
    InvalidWinRequirement(u32),
    /// The round structure would put an odd number of teams in this round.
    UnpairableRound { record: Record, num_teams: usize },
    /// No round with this record (or the record string is malformed).
    RoundNotFound(String),
    /// The round exists but has no match at this index.
    MatchNotFound { round: Record, index: usize },
    /// Seed outside the roster.
    TeamNotFound(Seed),
    /// The match slot has not been paired yet.
    EmptyMatch { round: Record, index: usize },
    /// A record names other teams than the ones paired in its slot.
    PairingMismatch {
        round: Record,
        index: usize,
        expected: (Seed, Seed),
        found: (Seed, Seed),
    },
}

impl BracketError {
    /// Reference to something that does not exist (as opposed to a bad configuration).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BracketError::RoundNotFound(_)
                | BracketError::MatchNotFound { .. }
                | BracketError::TeamNotFound(_)
                | BracketError::EmptyMatch { .. }
        )
    }
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::InvalidTeamCount(n) => {
                write!(f, "Team count must be a power of two of at least 2 (got {})", n)
            }
            BracketError::InvalidWinRequirement(w) => {
                write!(f, "Win requirement must be at least 1 (got {})", w)
            }
            BracketError::UnpairableRound { record, num_teams } => {
                write!(
                    f,
                    "Round {} would hold {} teams, which cannot be paired",
                    record, num_teams
                )
            }
            BracketError::RoundNotFound(r) => write!(f, "Round {} not found", r),
            BracketError::MatchNotFound { round, index } => {
                write!(f, "Round {} has no match {}", round, index)
            }
            BracketError::TeamNotFound(seed) => write!(f, "No team with seed {}", seed),
            BracketError::EmptyMatch { round, index } => {
                write!(f, "Match {} of round {} has not been paired yet", index, round)
            }
            BracketError::PairingMismatch {
                round,
                index,
                expected,
                found,
            } => write!(
                f,
                "Match {} of round {} is {} vs {}, not {} vs {}",
                index, round, expected.0, expected.1, found.0, found.1
            ),
        }
    }
}

impl std::error::Error for BracketError {}

/// Bracket shape: how many teams, and how many wins (or losses) finish a team.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketConfig {
    #[serde(default = "default_num_teams")]
    pub num_teams: usize,
    #[serde(default = "default_win_requirement")]
    pub win_requirement: u32,
}

fn default_num_teams() -> usize {
    16
}

fn default_win_requirement() -> u32 {
    3
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            num_teams: default_num_teams(),
            win_requirement: default_win_requirement(),
        }
    }
}

impl BracketConfig {
    pub fn new(num_teams: usize, win_requirement: u32) -> Self {
        Self {
            num_teams,
            win_requirement,
        }
    }

    /// Checks the numbers alone; pairability of every round is checked when the graph is built.
    pub fn validate(&self) -> Result<(), BracketError> {
        if self.num_teams < 2 || !self.num_teams.is_power_of_two() {
            return Err(BracketError::InvalidTeamCount(self.num_teams));
        }
        if self.win_requirement < 1 {
            return Err(BracketError::InvalidWinRequirement(self.win_requirement));
        }
        Ok(())
    }
}

/// Full bracket state: round graph, matches, and the team roster.
///
/// Rounds live in an arena indexed by [`RoundId`]; the root (`"0-0"`) is always
/// `RoundId(0)`. The topology never changes after construction, only match records do.
#[derive(Clone, Debug, Serialize)]
pub struct Bracket {
    pub(crate) win_requirement: u32,
    pub(crate) rounds: Vec<RoundNode>,
    /// Ordered by seed: `teams[seed - 1]`.
    pub(crate) teams: Vec<Team>,
    #[serde(skip)]
    pub(crate) round_lookup: HashMap<Record, RoundId>,
    #[serde(skip)]
    pub(crate) match_lookup: HashMap<MatchId, (RoundId, usize)>,
}

impl Bracket {
    pub const ROOT: RoundId = RoundId(0);

    pub fn win_requirement(&self) -> u32 {
        self.win_requirement
    }

    pub fn num_teams(&self) -> usize {
        self.teams.len()
    }

    pub fn root(&self) -> &RoundNode {
        &self.rounds[Self::ROOT.0]
    }

    pub fn rounds(&self) -> &[RoundNode] {
        &self.rounds
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn round(&self, id: RoundId) -> &RoundNode {
        &self.rounds[id.0]
    }

    pub(crate) fn round_mut(&mut self, id: RoundId) -> &mut RoundNode {
        &mut self.rounds[id.0]
    }

    /// Resolve a `"W-L"` string to its round.
    pub fn round_id(&self, record: &str) -> Result<RoundId, BracketError> {
        record
            .parse::<Record>()
            .ok()
            .and_then(|r| self.round_lookup.get(&r).copied())
            .ok_or_else(|| BracketError::RoundNotFound(record.to_string()))
    }

    pub fn round_by_record(&self, record: &str) -> Option<&RoundNode> {
        self.round_id(record).ok().map(|id| self.round(id))
    }

    pub fn get_match(&self, id: &MatchId) -> Option<&Match> {
        self.match_lookup
            .get(id)
            .map(|&(round, index)| &self.rounds[round.0].matches[index])
    }

    /// Record in the given slot, if the round exists and the slot is paired.
    pub fn get_match_record(&self, round: &str, index: usize) -> Option<&MatchRecord> {
        self.round_by_record(round)?.matches.get(index)?.record.as_ref()
    }

    pub fn team(&self, seed: Seed) -> Option<&Team> {
        let idx = usize::try_from(seed).ok()?.checked_sub(1)?;
        self.teams.get(idx)
    }

    /// Every round paired and decided.
    pub fn is_complete(&self) -> bool {
        self.rounds.iter().all(RoundNode::is_decided)
    }
}
