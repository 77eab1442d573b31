//! Tournament: a single-elimination bracket over a seeded entrant list.

use crate::models::game::{validate_best_of, Match, MatchId};
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors surfaced by roster, match, and tournament operations. Invalid
/// *transitions* (starting twice, advancing an unfinished round, mutating a
/// started entrant list) are silent no-ops instead; callers check the
/// `started`/`completed` flags.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Player name is empty after trimming.
    EmptyPlayerName,
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// A match needs two distinct players.
    IdenticalPlayers,
    /// Best-of must be an odd number of at least 3.
    InvalidBestOf(u32),
    /// A match cannot be finished early while the score is level.
    TiedScore,
    /// Double elimination is declared but not implemented.
    UnsupportedFormat,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::EmptyPlayerName => write!(f, "Player name cannot be empty"),
            TournamentError::DuplicatePlayerName => {
                write!(f, "A player with this name already exists")
            }
            TournamentError::IdenticalPlayers => {
                write!(f, "A match needs two different players")
            }
            TournamentError::InvalidBestOf(n) => {
                write!(f, "Invalid format: best of {} (must be odd and at least 3)", n)
            }
            TournamentError::TiedScore => {
                write!(f, "Cannot finish a match while the score is level")
            }
            TournamentError::UnsupportedFormat => {
                write!(f, "Double elimination is not yet supported")
            }
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Bracket format. Double elimination is declared for the data model but the
/// engine rejects it at construction and start; there is no losers' bracket.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    #[default]
    SingleElimination,
    DoubleElimination,
}

/// One batch of matches generated together from the previous round's winners
/// (or from the initial seeding). An odd contender count leaves the last
/// seed as the round's `bye`: a slot already resolved to that player.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Round {
    pub matches: Vec<Match>,
    /// Entrant advancing to the next round without playing.
    pub bye: Option<PlayerId>,
}

impl Round {
    /// Pair consecutive seeds (0v1, 2v3, ...) into matches; an unpaired last
    /// seed becomes the bye.
    pub(crate) fn pair(seeds: &[PlayerId], best_of: u32) -> Result<Self, TournamentError> {
        let mut matches = Vec::with_capacity(seeds.len() / 2);
        for pair in seeds.chunks_exact(2) {
            matches.push(Match::new(pair[0], pair[1], best_of)?);
        }
        let bye = if seeds.len() % 2 != 0 {
            seeds.last().copied()
        } else {
            None
        };
        Ok(Self { matches, bye })
    }

    pub fn is_finished(&self) -> bool {
        self.matches.iter().all(|m| m.completed())
    }

    /// Winners in match order, with the bye entrant appended last.
    pub(crate) fn winners(&self) -> Vec<PlayerId> {
        let mut winners: Vec<PlayerId> = self.matches.iter().filter_map(|m| m.winner()).collect();
        if let Some(bye) = self.bye {
            winners.push(bye);
        }
        winners
    }
}

/// A tournament: entrant list, generated rounds, and completion flags.
/// Rounds only grow; matches are never removed or reordered.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Entrants in seeding order (shuffled when the tournament starts).
    pub entrants: Vec<PlayerId>,
    pub rounds: Vec<Round>,
    pub format: TournamentFormat,
    /// Applied uniformly to every generated match.
    pub best_of: u32,
    pub started: bool,
    pub completed: bool,
}

impl Tournament {
    /// Create an empty tournament. Double elimination is rejected with
    /// `UnsupportedFormat` rather than silently behaving like single
    /// elimination.
    pub fn new(
        name: impl Into<String>,
        format: TournamentFormat,
        best_of: u32,
    ) -> Result<Self, TournamentError> {
        if format == TournamentFormat::DoubleElimination {
            return Err(TournamentError::UnsupportedFormat);
        }
        validate_best_of(best_of)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            entrants: Vec::new(),
            rounds: Vec::new(),
            format,
            best_of,
            started: false,
            completed: false,
        })
    }

    /// Add an entrant. No-op once started or when already entered.
    pub fn add_entrant(&mut self, player: PlayerId) {
        if self.started || self.entrants.contains(&player) {
            return;
        }
        self.entrants.push(player);
    }

    /// Remove an entrant. No-op once started.
    pub fn remove_entrant(&mut self, player: PlayerId) {
        if self.started {
            return;
        }
        self.entrants.retain(|p| *p != player);
    }

    /// The champion once the tournament has completed: the winner of the
    /// last match of the last round.
    pub fn champion(&self) -> Option<PlayerId> {
        if !self.completed {
            return None;
        }
        self.rounds.last()?.matches.last()?.winner()
    }

    /// The round currently being played, derived from completed-match counts:
    /// round 1 holds `entrants / 2` matches, each later round half as many
    /// (minimum 1). Returns the first round whose matches are not all
    /// completed yet, or 0 before the tournament starts.
    pub fn current_round_number(&self) -> u32 {
        if !self.started {
            return 0;
        }
        let completed = self
            .rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .filter(|m| m.completed())
            .count();

        let mut round = 1;
        let mut matches_in_round = (self.entrants.len() / 2).max(1);
        let mut counted = 0;
        while counted + matches_in_round <= completed {
            counted += matches_in_round;
            matches_in_round = (matches_in_round / 2).max(1);
            round += 1;
        }
        round
    }

    /// Resolve a match id inside the rounds structure. Collaborators use
    /// this instead of indexing the history themselves.
    pub fn find_match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.rounds
            .iter_mut()
            .flat_map(|r| r.matches.iter_mut())
            .find(|m| m.id() == id)
    }

    pub fn find_match(&self, id: MatchId) -> Option<&Match> {
        self.rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .find(|m| m.id() == id)
    }
}
