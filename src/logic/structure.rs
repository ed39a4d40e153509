//! Round graph construction: one node per reachable win-loss record.

use crate::models::{BracketConfig, BracketError, Record, RoundId, RoundNode};
use std::collections::HashMap;

/// Build every round reachable from `"0-0"`, breadth-first.
///
/// A record reached from two parents is a single node whose team count is the
/// sum of both halves. A node gets no winning child once one more win would
/// reach `win_requirement` (that team has clinched), and no losing child
/// symmetrically. The returned arena has the root at index 0, ordered by level.
pub fn build_structure(config: &BracketConfig) -> Result<Vec<RoundNode>, BracketError> {
    config.validate()?;
    let win_requirement = config.win_requirement;

    let mut rounds = vec![RoundNode::new(Record::ROOT, config.num_teams, 1)];
    let mut frontier = vec![RoundId(0)];

    while !frontier.is_empty() {
        let mut level_nodes: HashMap<Record, RoundId> = HashMap::new();
        let mut next = Vec::new();
        for &parent in &frontier {
            let record = rounds[parent.0].record;
            if record.wins + 1 < win_requirement {
                let child = add_child(
                    &mut rounds,
                    &mut level_nodes,
                    &mut next,
                    parent,
                    record.after_win(),
                );
                rounds[parent.0].winning_round = Some(child);
            }
            if record.losses + 1 < win_requirement {
                let child = add_child(
                    &mut rounds,
                    &mut level_nodes,
                    &mut next,
                    parent,
                    record.after_loss(),
                );
                rounds[parent.0].losing_round = Some(child);
            }
        }
        // Team counts of a level are final once every parent has been seen.
        check_pairable(&rounds, &next)?;
        frontier = next;
    }
    Ok(rounds)
}

/// Reject `level` at its first round holding an odd number of teams.
fn check_pairable(rounds: &[RoundNode], level: &[RoundId]) -> Result<(), BracketError> {
    let odd = level
        .iter()
        .map(|id| &rounds[id.0])
        .find(|r| r.num_teams % 2 != 0);
    match odd {
        Some(odd) => Err(BracketError::UnpairableRound {
            record: odd.record,
            num_teams: odd.num_teams,
        }),
        None => Ok(()),
    }
}

/// Create the child for `record`, or merge this parent's half into the node
/// already made this level.
fn add_child(
    rounds: &mut Vec<RoundNode>,
    level_nodes: &mut HashMap<Record, RoundId>,
    next: &mut Vec<RoundId>,
    parent: RoundId,
    record: Record,
) -> RoundId {
    let share = rounds[parent.0].num_teams / 2;
    if let Some(&id) = level_nodes.get(&record) {
        let node = &mut rounds[id.0];
        node.num_teams += share;
        node.parents.push(parent);
        return id;
    }
    let id = RoundId(rounds.len());
    let mut node = RoundNode::new(record, share, rounds[parent.0].level + 1);
    node.parents.push(parent);
    rounds.push(node);
    level_nodes.insert(record, id);
    next.push(id);
    id
}
