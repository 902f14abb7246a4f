use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Session, SessionId};

/// Returned when a player creates or joins a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePlayerInfo {
    pub game_id: SessionId,
    pub player_id: PlayerId,
}

/// Session waiting for a second player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyResponse {
    pub game_id: SessionId,
    /// Unix timestamp (seconds) of session creation
    pub created_at: i64,
}

impl LobbyResponse {
    pub fn from_session<S: Session>(game: &S) -> Self {
        Self {
            game_id: game.id(),
            created_at: game.created_at().unix_timestamp(),
        }
    }
}
