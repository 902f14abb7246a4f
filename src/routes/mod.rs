pub mod error;
pub mod game;
pub mod health;
pub mod live;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.config.allowed_origins.clone())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health::health_check))
        // Session creation and joining
        .route("/api/new/:game_type", post(game::create_game))
        .route("/api/join/:game_type/:game_id", post(game::join_game))
        // Live updates (GET) and moves (POST)
        .route(
            "/api/game/:game_type/:game_id",
            get(live::live_updates).post(game::submit_game_move),
        )
        .route("/api/state/:game_type/:game_id", get(game::get_state))
        .route("/api/lobbies/:game_type", get(game::list_lobbies))
        .route("/api/stats", get(game::get_stats))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}
