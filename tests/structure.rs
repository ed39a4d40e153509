//! Integration tests for the round graph: records, levels, parents, match slots.

use swiss_bracket::{
    build_structure, Bracket, BracketConfig, BracketError, FixedSeeding, MatchId, Record,
};

fn bracket(num_teams: usize, win_requirement: u32) -> Bracket {
    let config = BracketConfig::new(num_teams, win_requirement);
    Bracket::from_config(&config, &mut FixedSeeding).unwrap()
}

fn level_records(b: &Bracket) -> Vec<Vec<String>> {
    b.level_order()
        .iter()
        .map(|level| level.iter().map(|&id| b.round(id).record.to_string()).collect())
        .collect()
}

#[test]
fn sixteen_teams_three_wins_has_expected_levels() {
    let b = bracket(16, 3);
    assert_eq!(
        level_records(&b),
        vec![
            vec!["0-0"],
            vec!["1-0", "0-1"],
            vec!["2-0", "1-1", "0-2"],
            vec!["2-1", "1-2"],
            vec!["2-2"],
        ]
    );
    assert_eq!(b.rounds().len(), 9);
}

#[test]
fn round_attributes_match_the_sixteen_team_layout() {
    let b = bracket(16, 3);
    // (record, level, two parents, matches)
    let expected = [
        ("0-0", 1, false, 8),
        ("1-0", 2, false, 4),
        ("0-1", 2, false, 4),
        ("2-0", 3, false, 2),
        ("1-1", 3, true, 4),
        ("0-2", 3, false, 2),
        ("2-1", 4, true, 3),
        ("1-2", 4, true, 3),
        ("2-2", 5, true, 3),
    ];
    for (record, level, two_parents, matches) in expected {
        let r = b.round_by_record(record).unwrap();
        assert_eq!(r.level, level, "level of {record}");
        assert_eq!(r.has_two_parents(), two_parents, "parents of {record}");
        assert_eq!(r.matches.len(), matches, "matches of {record}");
        assert_eq!(r.num_teams, matches * 2);
    }
}

#[test]
fn children_follow_win_and_loss_edges() {
    let b = bracket(16, 3);
    let child = |record: &str, win: bool| {
        let r = b.round_by_record(record).unwrap();
        let id = if win { r.winning_round } else { r.losing_round };
        id.map(|id| b.round(id).record.to_string())
    };
    assert_eq!(child("0-0", true).as_deref(), Some("1-0"));
    assert_eq!(child("0-0", false).as_deref(), Some("0-1"));
    assert_eq!(child("1-0", false).as_deref(), Some("1-1"));
    assert_eq!(child("0-1", true).as_deref(), Some("1-1"));
    // one more win clinches, so no winning child
    assert_eq!(child("2-0", true), None);
    assert_eq!(child("2-0", false).as_deref(), Some("2-1"));
    assert_eq!(child("0-2", false), None);
    assert_eq!(child("2-2", true), None);
    assert_eq!(child("2-2", false), None);
}

#[test]
fn two_parents_iff_reached_from_two_records() {
    for (n, w) in [(16, 3), (32, 3), (64, 4), (8, 2)] {
        let b = bracket(n, w);
        for (i, node) in b.rounds().iter().enumerate() {
            let incoming = b
                .rounds()
                .iter()
                .filter(|p| p.children().any(|c| c.0 == i))
                .count();
            assert_eq!(node.has_two_parents(), incoming > 1, "{n}/{w} {}", node.record);
            assert_eq!(node.parents.len(), if i == 0 { 0 } else { incoming });
        }
    }
}

#[test]
fn teams_are_conserved_level_by_level() {
    for (n, w) in [(2, 1), (4, 2), (8, 2), (16, 2), (16, 3), (32, 3), (64, 4)] {
        let b = bracket(n, w);
        let mut finished = 0;
        for level in b.level_order() {
            let in_play: usize = level.iter().map(|&id| b.round(id).num_teams).sum();
            assert_eq!(in_play + finished, n, "{n}/{w}");
            for &id in &level {
                let r = b.round(id);
                if r.winning_round.is_none() {
                    finished += r.num_teams / 2;
                }
                if r.losing_round.is_none() {
                    finished += r.num_teams / 2;
                }
            }
        }
        assert_eq!(finished, n);
    }
}

#[test]
fn every_round_is_reachable_and_root_is_unique() {
    let b = bracket(64, 4);
    let visited: usize = b.level_order().iter().map(Vec::len).sum();
    assert_eq!(visited, b.rounds().len());
    assert_eq!(b.root().record, Record::ROOT);
    let roots: Vec<_> = b.rounds().iter().filter(|r| r.parents.is_empty()).collect();
    assert_eq!(roots.len(), 1);
}

#[test]
fn match_ids_are_registered() {
    let b = bracket(16, 3);
    let id = MatchId {
        round: "1-1".parse().unwrap(),
        index: 3,
    };
    let m = b.get_match(&id).unwrap();
    assert_eq!(m.id, id);
    assert!(m.record.is_none());
    let missing = MatchId {
        round: "1-1".parse().unwrap(),
        index: 4,
    };
    assert!(b.get_match(&missing).is_none());
}

#[test]
fn single_win_requirement_is_one_round() {
    let b = bracket(2, 1);
    assert_eq!(b.rounds().len(), 1);
    assert_eq!(b.root().matches.len(), 1);
    assert!(b.root().children().next().is_none());
}

#[test]
fn rejects_bad_configurations() {
    assert_eq!(
        build_structure(&BracketConfig::new(12, 3)),
        Err(BracketError::InvalidTeamCount(12))
    );
    assert_eq!(
        build_structure(&BracketConfig::new(1, 1)),
        Err(BracketError::InvalidTeamCount(1))
    );
    assert_eq!(
        build_structure(&BracketConfig::new(16, 0)),
        Err(BracketError::InvalidWinRequirement(0))
    );
    // 8 teams needing 3 wins leaves 3 teams at 2-1
    assert_eq!(
        build_structure(&BracketConfig::new(8, 3)),
        Err(BracketError::UnpairableRound {
            record: Record::new(2, 1),
            num_teams: 3,
        })
    );
    assert!(matches!(
        Bracket::new(2, 2),
        Err(BracketError::UnpairableRound { num_teams: 1, .. })
    ));
}

#[test]
fn huge_win_requirement_fails_at_first_odd_round() {
    assert_eq!(
        build_structure(&BracketConfig::new(2, 100_000)),
        Err(BracketError::UnpairableRound {
            record: Record::new(1, 0),
            num_teams: 1,
        })
    );
    assert!(matches!(
        build_structure(&BracketConfig::new(1 << 20, u32::MAX)),
        Err(BracketError::UnpairableRound { num_teams: 1, .. })
    ));
}

#[test]
fn config_defaults_to_sixteen_teams_three_wins() {
    let c: BracketConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(c, BracketConfig::new(16, 3));
    let c: BracketConfig = serde_json::from_str(r#"{"num_teams": 32}"#).unwrap();
    assert_eq!(c, BracketConfig::new(32, 3));
}

#[test]
fn record_parses_and_prints() {
    let r: Record = "2-1".parse().unwrap();
    assert_eq!(r, Record::new(2, 1));
    assert_eq!(r.to_string(), "2-1");
    assert!("2-".parse::<Record>().is_err());
    assert!("abc".parse::<Record>().is_err());
    assert_eq!(serde_json::to_string(&r).unwrap(), "\"2-1\"");
    let back: Record = serde_json::from_str("\"0-2\"").unwrap();
    assert_eq!(back, Record::new(0, 2));
}
