//! Whole-snapshot persistence of the entity graph.
//!
//! Saving always replaces the full graph: the snapshot is serialized to a
//! temp file and renamed over the target, so a reader never observes a
//! partial write. Loading recovers from a missing or unreadable file with an
//! empty snapshot.

use crate::models::{Match, PlayerId, Roster, Tournament};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// The full entity graph: the roster, free-standing matches recorded by the
/// score tracker, and all tournaments (whose bracket matches live inside
/// their rounds).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub roster: Roster,
    pub matches: Vec<Match>,
    pub tournaments: Vec<Tournament>,
}

impl Snapshot {
    /// Free-standing matches a player took part in, in recording order.
    pub fn matches_for_player(&self, player: PlayerId) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.involves(player)).collect()
    }

    /// Tournaments that have started and not yet completed.
    pub fn active_tournaments(&self) -> Vec<&Tournament> {
        self.tournaments
            .iter()
            .filter(|t| t.started && !t.completed)
            .collect()
    }
}

/// Loads and saves the snapshot at a fixed path.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the snapshot. A missing file yields an empty snapshot; an
    /// unreadable or corrupt file is logged and also yields an empty one.
    pub fn load_all(&self) -> Snapshot {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Snapshot::default(),
            Err(e) => {
                log::error!("Error loading data from {}: {}", self.path.display(), e);
                return Snapshot::default();
            }
        };
        match serde_json::from_slice(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::error!("Error parsing data in {}: {}", self.path.display(), e);
                Snapshot::default()
            }
        }
    }

    /// Save the snapshot, replacing the previous one atomically.
    pub fn save_all(&self, snapshot: &Snapshot) -> io::Result<()> {
        let json = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
    }
}
