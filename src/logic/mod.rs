//! Business logic: match scoring and the tournament bracket engine.

mod bracket;
mod scoring;

pub use bracket::{advance_tournament, start_tournament, start_tournament_with};
pub use scoring::{add_point, finish_match, remove_point};
