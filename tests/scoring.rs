//! Integration tests for match scoring: completion thresholds, stat
//! application, and the early-finish tie rule.

use table_tennis_pro::{
    add_point, finish_match, remove_point, Match, PlayerId, Roster, Side, TournamentError,
};

fn roster_with(names: &[&str]) -> (Roster, Vec<PlayerId>) {
    let mut roster = Roster::new();
    let ids = names.iter().map(|n| roster.add(*n).unwrap()).collect();
    (roster, ids)
}

fn match_between(roster_ids: &[PlayerId], best_of: u32) -> Match {
    Match::new(roster_ids[0], roster_ids[1], best_of).unwrap()
}

#[test]
fn completes_exactly_at_threshold() {
    for best_of in [3u32, 5, 7] {
        let (mut roster, ids) = roster_with(&["Anna", "Ben"]);
        let mut m = match_between(&ids, best_of);
        let needed = best_of / 2 + 1;

        for _ in 0..needed - 1 {
            assert!(!add_point(&mut m, Side::One, &mut roster));
        }
        assert!(!m.completed(), "best of {} done too early", best_of);
        assert!(add_point(&mut m, Side::One, &mut roster));
        assert!(m.completed());
        assert_eq!(m.score(Side::One), needed);
        assert_eq!(m.winner(), Some(ids[0]));
    }
}

#[test]
fn completion_is_irreversible() {
    let (mut roster, ids) = roster_with(&["Anna", "Ben"]);
    let mut m = match_between(&ids, 3);
    add_point(&mut m, Side::Two, &mut roster);
    add_point(&mut m, Side::Two, &mut roster);
    assert!(m.completed());

    // Neither further increments nor decrements touch a completed match.
    assert!(!add_point(&mut m, Side::One, &mut roster));
    remove_point(&mut m, Side::Two);
    assert!(m.completed());
    assert_eq!(m.score(Side::One), 0);
    assert_eq!(m.score(Side::Two), 2);
}

#[test]
fn decrement_at_zero_is_a_noop() {
    let (mut roster, ids) = roster_with(&["Anna", "Ben"]);
    let mut m = match_between(&ids, 5);
    remove_point(&mut m, Side::One);
    assert_eq!(m.score(Side::One), 0);

    add_point(&mut m, Side::One, &mut roster);
    remove_point(&mut m, Side::One);
    remove_point(&mut m, Side::One);
    assert_eq!(m.score(Side::One), 0);
    assert!(!m.completed());
}

#[test]
fn winner_and_loser_undefined_until_completed() {
    let (mut roster, ids) = roster_with(&["Anna", "Ben"]);
    let mut m = match_between(&ids, 5);
    assert_eq!(m.winner(), None);
    assert_eq!(m.loser(), None);

    add_point(&mut m, Side::One, &mut roster);
    add_point(&mut m, Side::One, &mut roster);
    add_point(&mut m, Side::Two, &mut roster);
    add_point(&mut m, Side::One, &mut roster);
    assert!(m.completed());
    assert_eq!(m.winner(), Some(ids[0]));
    assert_eq!(m.loser(), Some(ids[1]));
    assert!(m.score(Side::One) > m.score(Side::Two));
}

#[test]
fn threshold_completion_applies_stats_to_both_players() {
    let (mut roster, ids) = roster_with(&["Anna", "Ben"]);
    let mut m = match_between(&ids, 5);
    add_point(&mut m, Side::One, &mut roster);
    add_point(&mut m, Side::Two, &mut roster);
    add_point(&mut m, Side::One, &mut roster);
    add_point(&mut m, Side::One, &mut roster);

    let anna = roster.get(ids[0]).unwrap();
    assert_eq!((anna.wins, anna.losses), (1, 0));
    assert_eq!((anna.points_scored, anna.points_conceded), (3, 1));

    let ben = roster.get(ids[1]).unwrap();
    assert_eq!((ben.wins, ben.losses), (0, 1));
    assert_eq!((ben.points_scored, ben.points_conceded), (1, 3));
}

#[test]
fn repeated_finish_applies_stats_once() {
    let (mut roster, ids) = roster_with(&["Anna", "Ben"]);
    let mut m = match_between(&ids, 7);
    add_point(&mut m, Side::Two, &mut roster);
    add_point(&mut m, Side::Two, &mut roster);
    add_point(&mut m, Side::One, &mut roster);

    assert_eq!(finish_match(&mut m, &mut roster), Ok(()));
    assert!(m.completed());
    assert_eq!(finish_match(&mut m, &mut roster), Ok(()));
    assert_eq!(finish_match(&mut m, &mut roster), Ok(()));

    let ben = roster.get(ids[1]).unwrap();
    assert_eq!((ben.wins, ben.losses), (1, 0));
    assert_eq!((ben.points_scored, ben.points_conceded), (2, 1));
    let anna = roster.get(ids[0]).unwrap();
    assert_eq!((anna.wins, anna.losses), (0, 1));
}

#[test]
fn finish_on_level_score_is_rejected() {
    let (mut roster, ids) = roster_with(&["Anna", "Ben"]);
    let mut m = match_between(&ids, 5);
    assert_eq!(
        finish_match(&mut m, &mut roster),
        Err(TournamentError::TiedScore)
    );

    add_point(&mut m, Side::One, &mut roster);
    add_point(&mut m, Side::Two, &mut roster);
    assert_eq!(
        finish_match(&mut m, &mut roster),
        Err(TournamentError::TiedScore)
    );
    assert!(!m.completed());

    // The match goes on normally once the score is no longer level.
    add_point(&mut m, Side::Two, &mut roster);
    assert_eq!(finish_match(&mut m, &mut roster), Ok(()));
    assert_eq!(m.winner(), Some(ids[1]));
    assert_eq!(roster.get(ids[1]).unwrap().wins, 1);
}

#[test]
fn finish_never_double_counts_after_threshold_completion() {
    let (mut roster, ids) = roster_with(&["Anna", "Ben"]);
    let mut m = match_between(&ids, 3);
    add_point(&mut m, Side::One, &mut roster);
    add_point(&mut m, Side::One, &mut roster);
    assert!(m.completed());

    assert_eq!(finish_match(&mut m, &mut roster), Ok(()));
    let anna = roster.get(ids[0]).unwrap();
    assert_eq!(anna.wins, 1);
    assert_eq!(anna.total_matches(), 1);
}

#[test]
fn identical_players_are_rejected() {
    let (_, ids) = roster_with(&["Anna", "Ben"]);
    assert_eq!(
        Match::new(ids[0], ids[0], 5).unwrap_err(),
        TournamentError::IdenticalPlayers
    );
}

#[test]
fn even_or_tiny_best_of_is_rejected() {
    let (_, ids) = roster_with(&["Anna", "Ben"]);
    for best_of in [0u32, 1, 2, 4, 6] {
        assert_eq!(
            Match::new(ids[0], ids[1], best_of).unwrap_err(),
            TournamentError::InvalidBestOf(best_of)
        );
    }
    assert!(Match::new(ids[0], ids[1], 9).is_ok());
}

#[test]
fn scoring_survives_a_player_removed_from_the_roster() {
    let (mut roster, ids) = roster_with(&["Anna", "Ben"]);
    let mut m = match_between(&ids, 3);
    roster.remove(ids[1]);

    add_point(&mut m, Side::Two, &mut roster);
    add_point(&mut m, Side::Two, &mut roster);
    assert!(m.completed());
    assert_eq!(m.winner(), Some(ids[1]));

    // The remaining player still gets their loss recorded.
    let anna = roster.get(ids[0]).unwrap();
    assert_eq!((anna.wins, anna.losses), (0, 1));
}
