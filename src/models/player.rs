//! Player and PlayerStats data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// Derived statistics view of a player (for API / display).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub wins: u32,
    pub losses: u32,
    pub total_matches: u32,
    pub win_rate: f64,
    pub average_points_per_match: f64,
    pub points_scored: u32,
    pub points_conceded: u32,
}

impl PlayerStats {
    pub fn from_player(p: &Player) -> Self {
        Self {
            wins: p.wins,
            losses: p.losses,
            total_matches: p.total_matches(),
            win_rate: p.win_rate(),
            average_points_per_match: p.average_points_per_match(),
            points_scored: p.points_scored,
            points_conceded: p.points_conceded,
        }
    }
}

/// A player with their cumulative match record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    /// Cumulative games scored across all completed matches.
    pub points_scored: u32,
    /// Cumulative games conceded across all completed matches.
    pub points_conceded: u32,
}

impl Player {
    /// Create a new player with the given name. Counters start at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            wins: 0,
            losses: 0,
            points_scored: 0,
            points_conceded: 0,
        }
    }

    /// Current stats as a separate struct (for API responses).
    pub fn stats(&self) -> PlayerStats {
        PlayerStats::from_player(self)
    }

    /// Record a won match and its games for this player.
    pub fn record_win(&mut self, points_scored: u32, points_conceded: u32) {
        self.wins += 1;
        self.points_scored += points_scored;
        self.points_conceded += points_conceded;
    }

    /// Record a lost match and its games for this player.
    pub fn record_loss(&mut self, points_scored: u32, points_conceded: u32) {
        self.losses += 1;
        self.points_scored += points_scored;
        self.points_conceded += points_conceded;
    }

    /// Change the display name. Identity and historical stats are untouched.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn total_matches(&self) -> u32 {
        self.wins + self.losses
    }

    /// Percentage of matches won, 0.0 when no matches have been played.
    pub fn win_rate(&self) -> f64 {
        let total = self.total_matches();
        if total == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(total) * 100.0
        }
    }

    /// Average games scored per match, 0.0 when no matches have been played.
    pub fn average_points_per_match(&self) -> f64 {
        let total = self.total_matches();
        if total == 0 {
            0.0
        } else {
            f64::from(self.points_scored) / f64::from(total)
        }
    }
}

// Identity is the id alone; name and counters are mutable.
impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}
