//! Operations exposed to the HTTP layer, generic over the game variant.
//!
//! Each operation holds the registry lock only long enough to find the
//! session, so moves on different sessions never wait on each other.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::{
    GameError, GameManager, LiveUpdates, PlayerId, Session, SessionId, Snapshot,
};

/// Create a session and admit its first player
///
/// # Returns
///
/// The new session's ID and the first player's ID
pub async fn create_session<S: Session>(
    games: &RwLock<GameManager<S>>,
) -> Result<(SessionId, PlayerId), GameError> {
    let game = games.write().await.create_game();
    let player_id = game.add_player()?;
    Ok((game.id(), player_id))
}

/// Admit a player into an existing session
///
/// # Errors
///
/// `SessionNotFound` or `SessionFull`
pub async fn join_session<S: Session>(
    games: &RwLock<GameManager<S>>,
    game_id: &SessionId,
) -> Result<PlayerId, GameError> {
    find(games, game_id).await?.add_player()
}

/// Subscribe to a session's snapshots
pub async fn open_live_updates<S: Session>(
    games: &RwLock<GameManager<S>>,
    game_id: &SessionId,
) -> Result<LiveUpdates, GameError> {
    Ok(find(games, game_id).await?.subscribe())
}

/// Submit a move to a session
///
/// # Errors
///
/// `SessionNotFound`, or `InvalidMove` with the rejection reason
pub async fn submit_move<S: Session>(
    games: &RwLock<GameManager<S>>,
    game_id: &SessionId,
    mv: S::Move,
) -> Result<(), GameError> {
    find(games, game_id).await?.apply_move(mv)
}

/// Most recently published snapshot of a session
pub async fn current_state<S: Session>(
    games: &RwLock<GameManager<S>>,
    game_id: &SessionId,
) -> Result<Snapshot, GameError> {
    Ok(find(games, game_id).await?.latest())
}

async fn find<S: Session>(
    games: &RwLock<GameManager<S>>,
    game_id: &SessionId,
) -> Result<Arc<S>, GameError> {
    games.read().await.get_game(game_id)
}
