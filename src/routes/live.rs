use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
};
use futures::{Stream, StreamExt};
use std::convert::Infallible;

use super::game::with_registry;
use crate::{
    config::SseSettings,
    core::{GameError, Snapshot, Variant},
    models::GamePath,
    services::open_live_updates,
    state::AppState,
};

/// Server-sent event stream of a game's snapshots
///
/// # Flow
///
/// 1. Validate variant and game id
/// 2. Subscribe to the game's live channel
/// 3. Send the latest snapshot, then every newer one
///
/// The subscription is released when the client disconnects.
pub async fn live_updates(
    Path(path): Path<GamePath>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GameError> {
    let (variant, game_id) = path.parse()?;
    let updates = with_registry!(state, variant, |games| {
        open_live_updates(games, &game_id).await?
    });

    tracing::info!(%variant, %game_id, "Live update stream opened");

    Ok(event_stream(updates.into_stream(), state.config.sse))
}

/// Frame snapshots as server-sent events
///
/// Each snapshot becomes one event: an optional `id:` line, one `data:`
/// line per payload line, then a blank line.
pub fn event_stream<S>(
    snapshots: S,
    settings: SseSettings,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    S: Stream<Item = Snapshot> + Send + 'static,
{
    let events = snapshots.map(move |snapshot| Ok(to_event(&snapshot, settings.event_ids)));

    let sse = Sse::new(events);
    match settings.keep_alive {
        Some(interval) => sse.keep_alive(KeepAlive::new().interval(interval)),
        None => sse,
    }
}

fn to_event(snapshot: &Snapshot, with_id: bool) -> Event {
    let event = if with_id {
        Event::default().id(snapshot.version.to_string())
    } else {
        Event::default()
    };
    event.data(&snapshot.data)
}
