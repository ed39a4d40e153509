//! Integration tests for ranking, pairing and seed assignment.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cmp::Ordering;
use swiss_bracket::{
    compare_teams, pair, rank_groups, Bracket, FixedSeeding, RandomSeeding, Team,
};

fn team(seed: u32, match_wins: u32, match_losses: u32, game_wins: u32, game_losses: u32) -> Team {
    Team {
        match_wins,
        match_losses,
        game_wins,
        game_losses,
        ..Team::new(seed, format!("T{seed}"))
    }
}

fn pairs(b: &Bracket, record: &str) -> Vec<(u32, u32)> {
    b.round_by_record(record)
        .unwrap()
        .matches
        .iter()
        .map(|m| {
            let r = m.record.unwrap();
            (r.upper_team, r.lower_team)
        })
        .collect()
}

#[test]
fn match_differential_beats_game_differential_beats_seed() {
    let a = team(5, 2, 0, 4, 3);
    let b = team(1, 1, 1, 6, 0);
    assert_eq!(compare_teams(&a, &b), Ordering::Less);

    let c = team(7, 1, 0, 3, 0);
    let d = team(2, 1, 0, 3, 2);
    assert_eq!(compare_teams(&c, &d), Ordering::Less);

    let e = team(3, 1, 0, 2, 0);
    let f = team(4, 1, 0, 2, 0);
    assert_eq!(compare_teams(&e, &f), Ordering::Less);
    assert_eq!(compare_teams(&f, &e), Ordering::Greater);
    assert_eq!(compare_teams(&e, &e), Ordering::Equal);
}

#[test]
fn pair_mirrors_ranked_list() {
    let ranked: Vec<u32> = (1..=8).collect();
    let got: Vec<_> = pair(&ranked)
        .iter()
        .map(|r| (r.upper_team, r.lower_team))
        .collect();
    assert_eq!(got, vec![(1, 8), (2, 7), (3, 6), (4, 5)]);
    assert!(pair(&ranked).iter().all(|r| !r.is_decided()));
}

#[test]
fn rank_groups_merges_both_parents() {
    let stats = vec![
        team(1, 1, 1, 2, 2),
        team(2, 1, 1, 3, 2),
        team(3, 1, 1, 2, 3),
        team(4, 1, 1, 2, 2),
    ];
    let ranked = rank_groups(&[vec![3, 1], vec![4, 2]], &stats);
    assert_eq!(ranked, vec![2, 1, 4, 3]);
}

#[test]
fn better_group_fills_upper_half() {
    let stats = vec![
        team(1, 1, 1, 3, 2),
        team(2, 1, 1, 2, 2),
        team(3, 0, 0, 0, 0),
        team(4, 0, 0, 0, 0),
        team(5, 2, 0, 4, 1),
        team(6, 2, 0, 4, 0),
    ];
    let ranked = rank_groups(&[vec![1, 2], vec![5, 6]], &stats);
    assert_eq!(ranked, vec![6, 5, 1, 2]);
    let got: Vec<_> = pair(&ranked)
        .iter()
        .map(|r| (r.upper_team, r.lower_team))
        .collect();
    assert_eq!(got, vec![(6, 2), (5, 1)]);
}

#[test]
fn fresh_bracket_pairs_top_seed_against_bottom_seed() {
    let b = Bracket::new(16, 3).unwrap();
    assert_eq!(
        pairs(&b, "0-0"),
        vec![(1, 16), (2, 15), (3, 14), (4, 13), (5, 12), (6, 11), (7, 10), (8, 9)]
    );
    for record in ["1-0", "0-1", "1-1", "2-2"] {
        assert!(b.round_by_record(record).unwrap().is_empty());
    }
}

#[test]
fn fixed_seeding_keeps_entrant_order() {
    let names: Vec<String> = ["Alpha", "Bravo", "Charlie", "Delta"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let b = Bracket::with_entrants(names, 2, &mut FixedSeeding).unwrap();
    assert_eq!(b.team(1).unwrap().name, "Alpha");
    assert_eq!(b.team(4).unwrap().name, "Delta");
    assert_eq!(pairs(&b, "0-0"), vec![(1, 4), (2, 3)]);
}

#[test]
fn random_seeding_only_changes_who_holds_each_seed() {
    let names: Vec<String> = (0..16).map(|i| format!("Org {i}")).collect();
    let mut policy = RandomSeeding::new(StdRng::seed_from_u64(7));
    let b = Bracket::with_entrants(names.clone(), 3, &mut policy).unwrap();

    let seeds: Vec<u32> = b.teams().iter().map(|t| t.seed).collect();
    assert_eq!(seeds, (1..=16).collect::<Vec<_>>());
    let mut held: Vec<String> = b.teams().iter().map(|t| t.name.clone()).collect();
    held.sort();
    let mut expected = names;
    expected.sort();
    assert_eq!(held, expected);
    assert_eq!(pairs(&b, "0-0")[0], (1, 16));

    let again = Bracket::with_entrants(
        (0..16).map(|i| format!("Org {i}")).collect(),
        3,
        &mut RandomSeeding::new(StdRng::seed_from_u64(7)),
    )
    .unwrap();
    assert_eq!(again.teams(), b.teams());
}
