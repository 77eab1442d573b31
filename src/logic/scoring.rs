//! Match scoring: point mutation, completion, and stat application.

use crate::models::{Match, Roster, Side, TournamentError};

/// Add one game to `side`'s score. When the side reaches the
/// games-needed-to-win threshold the match completes and the result is
/// applied to the roster. Returns true when this call completed the match.
/// No-op on an already-completed match.
pub fn add_point(m: &mut Match, side: Side, roster: &mut Roster) -> bool {
    if m.completed() {
        return false;
    }
    m.increment_score(side);
    if m.completed() {
        apply_result(m, roster);
        true
    } else {
        false
    }
}

/// Take one game back from `side`. No-op at zero and on a completed match;
/// never completes or un-completes a match.
pub fn remove_point(m: &mut Match, side: Side) {
    m.decrement_score(side);
}

/// End the match early, before the threshold is reached. Idempotent: an
/// already-completed match is left untouched. A level score is rejected with
/// `TiedScore` so a completed match always has a strict winner.
pub fn finish_match(m: &mut Match, roster: &mut Roster) -> Result<(), TournamentError> {
    if m.completed() {
        return Ok(());
    }
    if m.score(Side::One) == m.score(Side::Two) {
        return Err(TournamentError::TiedScore);
    }
    m.force_complete();
    apply_result(m, roster);
    Ok(())
}

/// Apply a completed match to both players, once: the winner records a win
/// with their own score as games scored, the loser the mirror image. A side
/// missing from the roster (removed after the match was created) is skipped.
fn apply_result(m: &Match, roster: &mut Roster) {
    let (Some(winner), Some(loser)) = (m.winner(), m.loser()) else {
        return;
    };
    let winner_side = if winner == m.player_1() { Side::One } else { Side::Two };
    let winner_score = m.score(winner_side);
    let loser_score = m.score(winner_side.opponent());

    match roster.get_mut(winner) {
        Some(p) => p.record_win(winner_score, loser_score),
        None => log::warn!("Winner {} of match {} is not on the roster", winner, m.id()),
    }
    match roster.get_mut(loser) {
        Some(p) => p.record_loss(loser_score, winner_score),
        None => log::warn!("Loser {} of match {} is not on the roster", loser, m.id()),
    }
}
