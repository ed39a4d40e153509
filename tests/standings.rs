//! Integration tests for standings and the text view.

use swiss_bracket::{advanced_teams, Bracket, BracketConfig, FixedSeeding, Status};

fn decided_16_3() -> Bracket {
    let mut b = Bracket::from_config(&BracketConfig::new(16, 3), &mut FixedSeeding).unwrap();
    for record in ["0-0", "1-0", "0-1", "2-0", "1-1", "0-2", "2-1", "1-2", "2-2"] {
        let n = b.round_by_record(record).unwrap().matches.len();
        for i in 0..n {
            b.set_match_result(record, i, 2, 0).unwrap();
        }
    }
    b
}

#[test]
fn standings_list_advanced_then_eliminated() {
    let b = decided_16_3();
    let table = b.standings();
    assert_eq!(table.len(), 16);

    let advanced: Vec<u32> = advanced_teams(&b).iter().map(|s| s.seed).collect();
    assert_eq!(advanced, (1..=8).collect::<Vec<_>>());
    assert!(table[..8].iter().all(|s| s.status == Status::Advanced));
    assert!(table[8..].iter().all(|s| s.status == Status::Eliminated));

    // 3-2 teams (9, 10, 11) rank above 1-3 and 0-3 teams
    let eliminated: Vec<u32> = table[8..].iter().map(|s| s.seed).collect();
    assert_eq!(&eliminated[..3], &[9, 10, 11]);
    assert_eq!(&eliminated[6..], &[15, 16]);
}

#[test]
fn fresh_bracket_has_everyone_active() {
    let b = Bracket::from_config(&BracketConfig::default(), &mut FixedSeeding).unwrap();
    assert!(b.standings().iter().all(|s| s.status == Status::Active));
    assert!(advanced_teams(&b).is_empty());
    assert!(!b.is_complete());
}

#[test]
fn render_shows_rounds_and_pairings() {
    let b = Bracket::from_config(&BracketConfig::new(16, 3), &mut FixedSeeding).unwrap();
    let text = b.render_levels();
    assert!(text.starts_with("0-0 (16 teams)\n  [0] 1 vs 16  0-0\n"));
    assert!(text.contains("1-1 (8 teams, 2 parents)\n  [0] -\n"));
    assert!(text.contains("2-2 (6 teams, 2 parents)"));
    // five levels, each followed by a blank line
    assert_eq!(text.matches("\n\n").count(), 5);
}
