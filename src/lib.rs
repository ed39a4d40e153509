//! Swiss bracket engine: round graph keyed by win-loss record, seeding, and result propagation.

pub mod logic;
pub mod models;

pub use logic::{
    advanced_teams, apply_entry, apply_replay, build_structure, compare_teams, descendants,
    level_order, pair, rank_groups, render_levels, set_match_record, set_match_result, standings,
    walk_levels, FixedSeeding, RandomSeeding, ReplayEntry, ReplayError, ReplayLog, SeedPolicy,
};
pub use models::{
    Bracket, BracketConfig, BracketError, Match, MatchId, MatchRecord, ParseRecordError, Record,
    RoundId, RoundNode, Seed, Side, Standing, Status, Team,
};
