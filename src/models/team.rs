//! Team and Standing data structures.

use serde::{Deserialize, Serialize};

/// A team's fixed initial rank (1 is the top seed). Matches refer to teams by seed.
pub type Seed = u32;

/// Where a team stands once its record is known.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Still has rounds to play.
    #[default]
    Active,
    /// Reached the win requirement.
    Advanced,
    /// Reached the win requirement in losses.
    Eliminated,
}

/// A team in the bracket. Exactly one exists per seed for the bracket's lifetime.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub seed: Seed,
    pub name: String,
    pub match_wins: u32,
    pub match_losses: u32,
    pub game_wins: u32,
    pub game_losses: u32,
}

impl Team {
    /// Create a team with the given seed and name. Counters start at zero.
    pub fn new(seed: Seed, name: impl Into<String>) -> Self {
        Self {
            seed,
            name: name.into(),
            match_wins: 0,
            match_losses: 0,
            game_wins: 0,
            game_losses: 0,
        }
    }

    /// Matches won minus matches lost.
    pub fn match_differential(&self) -> i64 {
        i64::from(self.match_wins) - i64::from(self.match_losses)
    }

    /// Games won minus games lost, across all of the team's matches.
    pub fn game_differential(&self) -> i64 {
        i64::from(self.game_wins) - i64::from(self.game_losses)
    }

    /// Record one decided match from this team's side.
    pub fn add_match(&mut self, games_won: u32, games_lost: u32) {
        if games_won > games_lost {
            self.match_wins += 1;
        } else if games_lost > games_won {
            self.match_losses += 1;
        }
        self.game_wins += games_won;
        self.game_losses += games_lost;
    }

    /// Zero all counters (seed and name are kept).
    pub fn reset(&mut self) {
        self.match_wins = 0;
        self.match_losses = 0;
        self.game_wins = 0;
        self.game_losses = 0;
    }

    /// Advanced / eliminated / still active for the given win requirement.
    pub fn status(&self, win_requirement: u32) -> Status {
        if self.match_wins >= win_requirement {
            Status::Advanced
        } else if self.match_losses >= win_requirement {
            Status::Eliminated
        } else {
            Status::Active
        }
    }
}

/// Reporting view of a team (for API / display).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub seed: Seed,
    pub name: String,
    pub match_wins: u32,
    pub match_losses: u32,
    pub game_wins: u32,
    pub game_losses: u32,
    pub status: Status,
}

impl Standing {
    pub fn from_team(t: &Team, win_requirement: u32) -> Self {
        Self {
            seed: t.seed,
            name: t.name.clone(),
            match_wins: t.match_wins,
            match_losses: t.match_losses,
            game_wins: t.game_wins,
            game_losses: t.game_losses,
            status: t.status(win_requirement),
        }
    }
}
