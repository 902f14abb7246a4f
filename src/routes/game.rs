use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::{
    core::{GameError, Session, Variant},
    models::{decode_move, parse_variant, GamePath, GamePlayerInfo, LobbyResponse},
    services::{create_session, current_state, join_session, submit_move},
    state::AppState,
};

/// Run `$body` with `$games` bound to the registry of `$variant`
///
/// Both arms must evaluate to the same type.
macro_rules! with_registry {
    ($state:expr, $variant:expr, |$games:ident| $body:expr) => {
        match $variant {
            Variant::Grid => {
                let $games = &*$state.grid_games;
                $body
            }
            Variant::Meta => {
                let $games = &*$state.meta_games;
                $body
            }
        }
    };
}

pub(crate) use with_registry;

/// Create a new game session and seat the caller as the first player
///
/// # Returns
///
/// 202 with the new game's ID and the caller's player ID
pub async fn create_game(
    Path(game_type): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GameError> {
    let variant = parse_variant(&game_type)?;
    let (game_id, player_id) = with_registry!(state, variant, |games| {
        create_session(games).await?
    });

    info!(%variant, %game_id, "Game created via API");

    Ok((
        StatusCode::ACCEPTED,
        Json(GamePlayerInfo { game_id, player_id }),
    ))
}

/// Add a player to an existing game session
///
/// # Returns
///
/// 202 with the game's ID and the new player's ID
pub async fn join_game(
    Path(path): Path<GamePath>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GameError> {
    let (variant, game_id) = path.parse()?;
    let player_id = with_registry!(state, variant, |games| {
        join_session(games, &game_id).await?
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(GamePlayerInfo { game_id, player_id }),
    ))
}

/// Submit a move
///
/// The body is decoded into the move shape of the variant named in the path.
///
/// # Returns
///
/// 202 with an empty body, or 400 with the rejection reason
pub async fn submit_game_move(
    Path(path): Path<GamePath>,
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, GameError> {
    let (variant, game_id) = path.parse()?;
    with_registry!(state, variant, |games| {
        submit_move(games, &game_id, decode_move(body)?).await?
    });

    Ok(StatusCode::ACCEPTED)
}

/// Latest snapshot of a game, without subscribing
///
/// # Returns
///
/// The snapshot payload (JSON board state, or the placeholder text)
pub async fn get_state(
    Path(path): Path<GamePath>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GameError> {
    let (variant, game_id) = path.parse()?;
    let snapshot = with_registry!(state, variant, |games| {
        current_state(games, &game_id).await?
    });

    let body = match serde_json::from_str::<serde_json::Value>(&snapshot.data) {
        Ok(value) => value,
        Err(_) => serde_json::Value::String(snapshot.data),
    };
    Ok(Json(serde_json::json!({
        "version": snapshot.version,
        "state": body,
    })))
}

/// Games of a variant that are waiting for a second player
pub async fn list_lobbies(
    Path(game_type): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GameError> {
    let variant = parse_variant(&game_type)?;
    let lobbies: Vec<LobbyResponse> = with_registry!(state, variant, |games| {
        lobbies_of(&*games.read().await)
    });

    Ok(Json(lobbies))
}

fn lobbies_of<S: Session>(manager: &crate::core::GameManager<S>) -> Vec<LobbyResponse> {
    manager
        .open_lobbies()
        .iter()
        .map(|game| LobbyResponse::from_session(game.as_ref()))
        .collect()
}

/// Registry statistics per variant
pub async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    let grid = state.grid_games.read().await.get_stats();
    let meta = state.meta_games.read().await.get_stats();

    Json(serde_json::json!({
        "ttt": grid,
        "uttt": meta,
    }))
}
