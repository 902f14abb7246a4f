use std::collections::HashMap;
use std::sync::Arc;

use super::{GameError, Session, SessionId};

/// Manager for all sessions of one game variant
#[derive(Debug)]
pub struct GameManager<S> {
    /// Map of game_id to session
    games: HashMap<SessionId, Arc<S>>,
}

impl<S: Session> GameManager<S> {
    /// Create an empty game manager
    pub fn new() -> Self {
        Self {
            games: HashMap::new(),
        }
    }

    /// Create a new session with a unique ID
    ///
    /// # Returns
    ///
    /// Shared handle to the newly created session
    pub fn create_game(&mut self) -> Arc<S> {
        let mut game_id = SessionId::new();

        // Ensure uniqueness
        while self.games.contains_key(&game_id) {
            game_id = SessionId::new();
        }

        let game = Arc::new(S::create(game_id));
        self.games.insert(game_id, Arc::clone(&game));
        tracing::info!(variant = %S::VARIANT, %game_id, "Game created");
        game
    }

    /// Retrieve a session by ID
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` if no session has that ID
    pub fn get_game(&self, game_id: &SessionId) -> Result<Arc<S>, GameError> {
        self.games
            .get(game_id)
            .cloned()
            .ok_or(GameError::SessionNotFound)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Sessions still waiting for their second player, oldest first
    pub fn open_lobbies(&self) -> Vec<Arc<S>> {
        let mut lobbies: Vec<Arc<S>> = self
            .games
            .values()
            .filter(|game| !game.can_start())
            .cloned()
            .collect();
        lobbies.sort_by_key(|game| game.created_at());
        lobbies
    }

    /// Get statistics about the sessions
    ///
    /// # Returns
    ///
    /// JSON value with game statistics
    pub fn get_stats(&self) -> serde_json::Value {
        let total_players: usize = self.games.values().map(|game| game.player_count()).sum();
        let active_games = self
            .games
            .values()
            .filter(|game| game.status().is_playing())
            .count();

        serde_json::json!({
            "total_games": self.games.len(),
            "active_games": active_games,
            "total_players": total_players,
        })
    }
}

impl<S: Session> Default for GameManager<S> {
    fn default() -> Self {
        Self::new()
    }
}
