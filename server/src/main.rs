use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use server::api::run_api_server;
use server::config::ServerConfig;
use server::db::{Database, PgDatabase};
use server::provision;
use server::registry::GameRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if exists
    dotenv::dotenv().ok();

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = ServerConfig::from_env().context("Invalid configuration")?;
    let registry = Arc::new(
        GameRegistry::new(config.games.clone()).context("Invalid game configuration")?,
    );
    info!(
        "Loaded {} games: {}",
        registry.len(),
        registry
            .list_games()
            .map(|g| format!("{} ({})", g.id, g.display_name))
            .collect::<Vec<_>>()
            .join(", ")
    );

    // Database setup
    provision::ensure_database(&config.db, config.connect_retries, config.retry_delay).await?;

    let db_pool = provision::connect_with_retry(
        config.db.connect_options(),
        config.max_connections,
        config.connect_retries,
        config.retry_delay,
    )
    .await
    .context("Failed to create PostgreSQL connection pool")?;

    let ready = provision::ensure_tables(&db_pool, &registry).await;
    if ready < registry.len() {
        warn!(
            "Only {} of {} game tables are ready; requests for the others will fail",
            ready,
            registry.len()
        );
    }

    let db: Arc<dyn Database> = Arc::new(PgDatabase::new(db_pool.clone(), registry));

    let cancellation_token = CancellationToken::new();
    let shutdown = cancellation_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal. Shutting down gracefully...");
        }
        shutdown.cancel();
    });

    run_api_server(&config.http_addr, db, cancellation_token).await?;

    db_pool.close().await;
    info!("Server shut down successfully");
    Ok(())
}
