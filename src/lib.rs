//! Table tennis tracker: library with models and business logic.

pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    add_point, advance_tournament, finish_match, remove_point, start_tournament,
    start_tournament_with,
};
pub use models::{
    Match, MatchId, Player, PlayerId, PlayerStats, Roster, Round, Side, Tournament,
    TournamentError, TournamentFormat, TournamentId,
};
pub use storage::{Snapshot, Store};
