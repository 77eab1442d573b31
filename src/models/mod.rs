//! Data structures: players, the roster arena, matches, tournaments.

mod game;
mod player;
mod roster;
mod tournament;

pub use game::{Match, MatchId, Side};
pub use player::{Player, PlayerId, PlayerStats};
pub use roster::Roster;
pub use tournament::{Round, Tournament, TournamentError, TournamentFormat, TournamentId};
