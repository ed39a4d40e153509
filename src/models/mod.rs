//! Data structures for the Swiss bracket: teams, matches, rounds, bracket state.

mod bracket;
mod game;
mod record;
mod round;
mod team;

pub use bracket::{Bracket, BracketConfig, BracketError};
pub use game::{Match, MatchId, MatchRecord, Side};
pub use record::{ParseRecordError, Record};
pub use round::{RoundId, RoundNode};
pub use team::{Seed, Standing, Status, Team};
