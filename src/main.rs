use anyhow::Context;

use tictactoe_server::{config::Config, routes::build_router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;

    // RUST_LOG wins; otherwise the environment picks the default filter
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .init();

    println!("🎮 Tic-tac-toe game server starting...");

    let addr = config.bind_address();
    let state = AppState::new(config);
    println!("🔗 Game registries initialized");

    let app = build_router(state);

    println!("🚀 Server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    println!("✅ Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    println!("👋 Shutting down game server...");
    Ok(())
}
