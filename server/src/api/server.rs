use anyhow::Result;
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::players::{self, ApiState};
use crate::db::Database;

/// Build the scoreboard router on top of any [`Database`] implementation.
pub fn router(db: Arc<dyn Database>) -> Router {
    let state = ApiState { db };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/games", get(players::list_games))
        .route("/api/players/search", post(players::search))
        .route("/api/players/top3", get(players::top3))
        .route("/api/players/top/:game_id", get(players::top_for_game))
        .route("/api/players/update-score", put(players::update_score))
        .route("/api/players/add-member", post(players::add_member))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_api_server(
    addr: &str,
    db: Arc<dyn Database>,
    cancellation_token: CancellationToken,
) -> Result<()> {
    let app = router(db);

    // Start server
    let listener = TcpListener::bind(addr).await?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancellation_token.cancelled().await })
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))
}

async fn health_check() -> &'static str {
    "OK"
}
