//! Replaying recorded results (e.g. a past event) into a bracket, from JSON or CSV.

use crate::logic::propagation::set_match_result;
use crate::models::{Bracket, BracketError, Seed};
use log::info;
use serde::{Deserialize, Serialize};

/// One recorded result: the score of match `index` in round `round`.
///
/// `upper_seed`/`lower_seed`, when present, are the pairing the source saw;
/// the replay checks the bracket produced the same pairing before writing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReplayEntry {
    pub round: String,
    pub index: usize,
    pub upper_wins: u32,
    pub lower_wins: u32,
    #[serde(default)]
    pub upper_seed: Option<Seed>,
    #[serde(default)]
    pub lower_seed: Option<Seed>,
}

/// Ordered results for a whole event, earliest rounds first.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReplayLog {
    #[serde(default)]
    pub name: Option<String>,
    pub results: Vec<ReplayEntry>,
}

/// Errors while loading or applying a replay.
#[derive(Debug)]
pub enum ReplayError {
    Json(serde_json::Error),
    Csv(csv::Error),
    /// The bracket rejected entry number `applied` (0-based); earlier entries were written.
    Bracket { applied: usize, source: BracketError },
    /// The bracket paired this slot differently from the source.
    PairingMismatch {
        applied: usize,
        round: String,
        index: usize,
        expected: (Seed, Seed),
        found: (Seed, Seed),
    },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::Json(e) => write!(f, "Invalid replay JSON: {}", e),
            ReplayError::Csv(e) => write!(f, "Invalid replay CSV: {}", e),
            ReplayError::Bracket { applied, source } => {
                write!(f, "Replay stopped after {} result(s): {}", applied, source)
            }
            ReplayError::PairingMismatch {
                round,
                index,
                expected,
                found,
                ..
            } => write!(
                f,
                "Round {} match {}: expected {} vs {}, bracket has {} vs {}",
                round, index, expected.0, expected.1, found.0, found.1
            ),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Json(e) => Some(e),
            ReplayError::Csv(e) => Some(e),
            ReplayError::Bracket { source, .. } => Some(source),
            ReplayError::PairingMismatch { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(e: serde_json::Error) -> Self {
        ReplayError::Json(e)
    }
}

impl From<csv::Error> for ReplayError {
    fn from(e: csv::Error) -> Self {
        ReplayError::Csv(e)
    }
}

impl ReplayLog {
    pub fn from_json_str(s: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(s)?)
    }

    /// CSV with a header row: `round,index,upper_wins,lower_wins[,upper_seed,lower_seed]`.
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self, ReplayError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let results = rdr
            .deserialize()
            .collect::<Result<Vec<ReplayEntry>, csv::Error>>()?;
        Ok(Self {
            name: None,
            results,
        })
    }

    /// Entries for one round, in log order.
    pub fn round_entries<'a>(
        &'a self,
        round: &'a str,
    ) -> impl Iterator<Item = &'a ReplayEntry> + 'a {
        self.results.iter().filter(move |e| e.round == round)
    }
}

/// Write every entry of `log` in order. Returns the number of entries applied.
///
/// Stops at the first failure; entries before it stay written.
pub fn apply_replay(bracket: &mut Bracket, log: &ReplayLog) -> Result<usize, ReplayError> {
    for (applied, entry) in log.results.iter().enumerate() {
        apply_entry(bracket, entry, applied)?;
    }
    info!(
        "Replayed {} result(s){}",
        log.results.len(),
        log.name.as_deref().map(|n| format!(" from {}", n)).unwrap_or_default()
    );
    Ok(log.results.len())
}

/// Write one entry, checking the expected pairing if the entry carries one.
pub fn apply_entry(
    bracket: &mut Bracket,
    entry: &ReplayEntry,
    applied: usize,
) -> Result<(), ReplayError> {
    let bracket_err = |source| ReplayError::Bracket { applied, source };

    if let (Some(upper), Some(lower)) = (entry.upper_seed, entry.lower_seed) {
        let round = bracket.round_id(&entry.round).map_err(bracket_err)?;
        let node = bracket.round(round);
        let current = node
            .matches
            .get(entry.index)
            .ok_or(BracketError::MatchNotFound {
                round: node.record,
                index: entry.index,
            })
            .and_then(|m| {
                m.record.ok_or(BracketError::EmptyMatch {
                    round: node.record,
                    index: entry.index,
                })
            })
            .map_err(bracket_err)?;
        if (current.upper_team, current.lower_team) != (upper, lower) {
            return Err(ReplayError::PairingMismatch {
                applied,
                round: entry.round.clone(),
                index: entry.index,
                expected: (upper, lower),
                found: (current.upper_team, current.lower_team),
            });
        }
    }

    set_match_result(
        bracket,
        &entry.round,
        entry.index,
        entry.upper_wins,
        entry.lower_wins,
    )
    .map_err(bracket_err)
}
