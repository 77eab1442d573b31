//! Roster: the arena of players, addressed by id.

use crate::models::player::{Player, PlayerId};
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// All known players, in the order they joined. Matches and tournaments hold
/// `PlayerId`s; this is the table that resolves them to live records.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player by name. Names are trimmed and must be unique
    /// (case-insensitive) and non-empty. Returns the new player's id.
    pub fn add(&mut self, name: impl Into<String>) -> Result<PlayerId, TournamentError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        if self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(trimmed))
        {
            return Err(TournamentError::DuplicatePlayerName);
        }
        let player = Player::new(trimmed);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Remove a player from the roster. Historical matches keep referring to
    /// the id; they are not rewritten.
    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == id)?;
        Some(self.players.remove(idx))
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Look up a player by name, case-insensitive.
    pub fn by_name(&self, name: &str) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
