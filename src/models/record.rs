//! Win-loss record, written `"W-L"`. Rounds are keyed by it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
}

impl Record {
    pub const ROOT: Record = Record { wins: 0, losses: 0 };

    pub fn new(wins: u32, losses: u32) -> Self {
        Self { wins, losses }
    }

    pub fn after_win(self) -> Self {
        Self::new(self.wins + 1, self.losses)
    }

    pub fn after_loss(self) -> Self {
        Self::new(self.wins, self.losses + 1)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.wins, self.losses)
    }
}

/// Malformed record string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseRecordError(pub String);

impl fmt::Display for ParseRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid record {:?} (expected \"W-L\")", self.0)
    }
}

impl std::error::Error for ParseRecordError {}

impl FromStr for Record {
    type Err = ParseRecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRecordError(s.to_string());
        let (w, l) = s.trim().split_once('-').ok_or_else(err)?;
        let wins = w.parse().map_err(|_| err())?;
        let losses = l.parse().map_err(|_| err())?;
        Ok(Self { wins, losses })
    }
}

impl TryFrom<String> for Record {
    type Error = ParseRecordError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Record> for String {
    fn from(r: Record) -> Self {
        r.to_string()
    }
}
