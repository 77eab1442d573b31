//! Bracket engine: seeding, round generation, and advancing.

use crate::models::{PlayerId, Round, Tournament, TournamentError, TournamentFormat};
use rand::seq::SliceRandom;

/// Start the tournament: shuffle the entrants into a random seeding order
/// and generate round 1. No-op when already started or with fewer than two
/// entrants.
pub fn start_tournament(t: &mut Tournament) -> Result<(), TournamentError> {
    start_tournament_with(t, |entrants| entrants.shuffle(&mut rand::thread_rng()))
}

/// Start with a caller-supplied shuffle deciding the seeding order. Tests
/// pass a deterministic one; `start_tournament` passes a uniform shuffle.
pub fn start_tournament_with<F>(t: &mut Tournament, shuffle: F) -> Result<(), TournamentError>
where
    F: FnOnce(&mut Vec<PlayerId>),
{
    if t.format == TournamentFormat::DoubleElimination {
        return Err(TournamentError::UnsupportedFormat);
    }
    if t.started || t.entrants.len() < 2 {
        return Ok(());
    }
    shuffle(&mut t.entrants);
    let round = Round::pair(&t.entrants, t.best_of)?;
    t.rounds.push(round);
    t.started = true;
    Ok(())
}

/// Advance the bracket by one round. No-op unless the tournament is running
/// and every match of the current round is completed. The round's winners
/// (plus its bye entrant, if any) either crown a champion when only one
/// remains, or pair up into the next round.
pub fn advance_tournament(t: &mut Tournament) -> Result<(), TournamentError> {
    if !t.started || t.completed {
        return Ok(());
    }
    let Some(current) = t.rounds.last() else {
        return Ok(());
    };
    if !current.is_finished() {
        return Ok(());
    }

    let winners = current.winners();
    if winners.len() == 1 {
        t.completed = true;
        return Ok(());
    }

    let next = Round::pair(&winners, t.best_of)?;
    t.rounds.push(next);
    Ok(())
}
