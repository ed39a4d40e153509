//! Level-order walks over the round graph.

use crate::models::{Bracket, Match, Record, RoundId, RoundNode};
use std::collections::{HashSet, VecDeque};

/// Walk the graph level by level from the root along winning/losing edges.
///
/// A round with two parents is reached twice but visited once (the first
/// time). `per_node` runs for each visited round, `per_level` once per level
/// after its rounds. Returns the levels.
pub fn walk_levels<N, L>(
    bracket: &Bracket,
    mut per_node: N,
    mut per_level: L,
) -> Vec<Vec<RoundId>>
where
    N: FnMut(RoundId, &RoundNode),
    L: FnMut(&[RoundId]),
{
    let mut visited: HashSet<Record> = HashSet::new();
    let mut queue = vec![Bracket::ROOT];
    let mut levels = Vec::new();

    while !queue.is_empty() {
        let mut level = Vec::new();
        let mut next = Vec::new();
        for id in queue {
            let node = bracket.round(id);
            if !visited.insert(node.record) {
                continue;
            }
            per_node(id, node);
            level.push(id);
            next.extend(node.children());
        }
        if level.is_empty() {
            break;
        }
        per_level(&level);
        levels.push(level);
        queue = next;
    }
    levels
}

/// Levels only, no callbacks.
pub fn level_order(bracket: &Bracket) -> Vec<Vec<RoundId>> {
    walk_levels(bracket, |_, _| {}, |_| {})
}

/// Every round reachable from `from` (excluding `from`), breadth-first.
pub fn descendants(bracket: &Bracket, from: RoundId) -> Vec<RoundId> {
    let mut seen: HashSet<RoundId> = HashSet::new();
    let mut queue: VecDeque<RoundId> = bracket.round(from).children().collect();
    let mut out = Vec::new();
    while let Some(id) = queue.pop_front() {
        if !seen.insert(id) {
            continue;
        }
        out.push(id);
        queue.extend(bracket.round(id).children());
    }
    out
}

/// Give every round its empty match slots, one per pairing, and register them.
pub(crate) fn initialize_matches(bracket: &mut Bracket) {
    let mut order = Vec::new();
    walk_levels(bracket, |id, _| order.push(id), |_| {});

    for id in order {
        let node = bracket.round_mut(id);
        let record = node.record;
        node.matches = (0..node.num_teams / 2)
            .map(|index| Match::new(record, index))
            .collect();
        let ids: Vec<_> = node.matches.iter().map(|m| m.id).collect();
        for match_id in ids {
            bracket.match_lookup.insert(match_id, (id, match_id.index));
        }
    }
}

/// Text view of the bracket, one block per level.
///
/// ```text
/// 1-1 (8 teams, 2 parents)
///   [0] 3 vs 14  2-1
///   [1] -
/// ```
pub fn render_levels(bracket: &Bracket) -> String {
    let mut out = String::new();
    for level in level_order(bracket) {
        for id in level {
            let node = bracket.round(id);
            out.push_str(&format!("{}\n", node));
            for m in &node.matches {
                let line = match &m.record {
                    Some(r) => format!("  [{}] {}\n", m.id.index, r),
                    None => format!("  [{}] -\n", m.id.index),
                };
                out.push_str(&line);
            }
        }
        out.push('\n');
    }
    out
}

impl Bracket {
    pub fn level_order(&self) -> Vec<Vec<RoundId>> {
        level_order(self)
    }

    pub fn render_levels(&self) -> String {
        render_levels(self)
    }
}
