//! Match: the best-of-N scoring state machine between two players.

use crate::models::player::PlayerId;
use crate::models::tournament::TournamentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which side of the table a score belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

/// A single match between two players. Scores count games won; the match
/// completes when one side reaches `best_of / 2 + 1` games. `completed` is
/// monotonic: once set it never reverts, and completed matches ignore
/// further score mutation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    id: MatchId,
    player_1: PlayerId,
    player_2: PlayerId,
    score_1: u32,
    score_2: u32,
    /// Best of 3, 5, 7, etc.
    best_of: u32,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl Match {
    /// Create a match at 0-0. The players must differ and `best_of` must be
    /// an odd number of at least 3.
    pub fn new(player_1: PlayerId, player_2: PlayerId, best_of: u32) -> Result<Self, TournamentError> {
        if player_1 == player_2 {
            return Err(TournamentError::IdenticalPlayers);
        }
        validate_best_of(best_of)?;
        Ok(Self {
            id: Uuid::new_v4(),
            player_1,
            player_2,
            score_1: 0,
            score_2: 0,
            best_of,
            completed: false,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn player_1(&self) -> PlayerId {
        self.player_1
    }

    pub fn player_2(&self) -> PlayerId {
        self.player_2
    }

    pub fn player(&self, side: Side) -> PlayerId {
        match side {
            Side::One => self.player_1,
            Side::Two => self.player_2,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::One => self.score_1,
            Side::Two => self.score_2,
        }
    }

    pub fn best_of(&self) -> u32 {
        self.best_of
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Games a side needs to win the match.
    pub fn games_needed_to_win(&self) -> u32 {
        self.best_of / 2 + 1
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        self.player_1 == player || self.player_2 == player
    }

    /// The winning player, or `None` while the match is in progress.
    pub fn winner(&self) -> Option<PlayerId> {
        if !self.completed {
            return None;
        }
        Some(if self.score_1 > self.score_2 {
            self.player_1
        } else {
            self.player_2
        })
    }

    /// The losing player, or `None` while the match is in progress.
    pub fn loser(&self) -> Option<PlayerId> {
        if !self.completed {
            return None;
        }
        Some(if self.score_1 > self.score_2 {
            self.player_2
        } else {
            self.player_1
        })
    }

    pub(crate) fn increment_score(&mut self, side: Side) {
        if self.completed {
            return;
        }
        match side {
            Side::One => self.score_1 += 1,
            Side::Two => self.score_2 += 1,
        }
        let needed = self.games_needed_to_win();
        if self.score_1 >= needed || self.score_2 >= needed {
            self.completed = true;
        }
    }

    pub(crate) fn decrement_score(&mut self, side: Side) {
        if self.completed {
            return;
        }
        match side {
            Side::One => self.score_1 = self.score_1.saturating_sub(1),
            Side::Two => self.score_2 = self.score_2.saturating_sub(1),
        }
    }

    pub(crate) fn force_complete(&mut self) {
        self.completed = true;
    }
}

/// Shared by match and tournament construction: best-of must be odd and ≥ 3.
pub(crate) fn validate_best_of(best_of: u32) -> Result<(), TournamentError> {
    if best_of < 3 || best_of % 2 == 0 {
        return Err(TournamentError::InvalidBestOf(best_of));
    }
    Ok(())
}
