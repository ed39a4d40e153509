//! Team statistics derived from recorded results, and the final standings view.

use crate::logic::seeding::compare_teams;
use crate::models::{Bracket, Seed, Standing, Status, Team};

/// Roster copy with counters rebuilt from decided records in rounds above `level`.
pub(crate) fn tally(bracket: &Bracket, level: usize) -> Vec<Team> {
    let mut teams = bracket.teams.clone();
    for t in &mut teams {
        t.reset();
    }
    let records = bracket
        .rounds
        .iter()
        .filter(|r| r.level < level)
        .flat_map(|r| r.matches.iter())
        .filter_map(|m| m.record)
        .filter(|r| r.is_decided());
    for r in records {
        if let Some(t) = slot(&mut teams, r.upper_team) {
            t.add_match(r.upper_team_wins, r.lower_team_wins);
        }
        if let Some(t) = slot(&mut teams, r.lower_team) {
            t.add_match(r.lower_team_wins, r.upper_team_wins);
        }
    }
    teams
}

fn slot(teams: &mut [Team], seed: Seed) -> Option<&mut Team> {
    let idx = usize::try_from(seed).ok()?.checked_sub(1)?;
    teams.get_mut(idx)
}

/// Rebuild the roster's counters from every decided record.
pub(crate) fn refresh_team_stats(bracket: &mut Bracket) {
    bracket.teams = tally(bracket, usize::MAX);
}

/// All teams: advanced first, then still active, then eliminated; ranked within each group.
pub fn standings(bracket: &Bracket) -> Vec<Standing> {
    let win_requirement = bracket.win_requirement;
    let mut teams: Vec<&Team> = bracket.teams.iter().collect();
    teams.sort_by(|a, b| {
        status_rank(a.status(win_requirement))
            .cmp(&status_rank(b.status(win_requirement)))
            .then_with(|| compare_teams(a, b))
    });
    teams
        .into_iter()
        .map(|t| Standing::from_team(t, win_requirement))
        .collect()
}

fn status_rank(s: Status) -> u8 {
    match s {
        Status::Advanced => 0,
        Status::Active => 1,
        Status::Eliminated => 2,
    }
}

/// Teams that reached the win requirement, in standings order.
pub fn advanced_teams(bracket: &Bracket) -> Vec<Standing> {
    standings(bracket)
        .into_iter()
        .filter(|s| s.status == Status::Advanced)
        .collect()
}

impl Bracket {
    pub fn standings(&self) -> Vec<Standing> {
        standings(self)
    }
}
