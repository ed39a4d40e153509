//! Bracket business logic: structure, seeding, result propagation, traversal, standings, replay.

mod propagation;
mod replay;
mod seeding;
mod setup;
mod standings;
mod structure;
mod traversal;

pub use propagation::{set_match_record, set_match_result};
pub use replay::{apply_entry, apply_replay, ReplayEntry, ReplayError, ReplayLog};
pub use seeding::{compare_teams, pair, rank_groups, FixedSeeding, RandomSeeding, SeedPolicy};
pub use standings::{advanced_teams, standings};
pub use structure::build_structure;
pub use traversal::{descendants, level_order, render_levels, walk_levels};
