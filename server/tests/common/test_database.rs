use anyhow::{Context, Result};
use ::common::{Game, GameId};
use server::provision;
use server::registry::GameRegistry;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Executor, PgPool};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::info;

/// Manages a throwaway database with provisioned game tables
pub struct TestDatabase {
    /// Name of the test database
    pub name: String,
    /// Pool connected to the test database
    pub pool: PgPool,
    /// Registry for the provisioned game tables
    pub registry: Arc<GameRegistry>,
    /// Connection to postgres database for cleanup
    admin_pool: PgPool,
}

// Global counter for unique database names
static DB_COUNTER: AtomicU32 = AtomicU32::new(0);

impl TestDatabase {
    /// Admin connection string, or `None` when integration tests should be skipped.
    pub fn admin_url() -> Option<String> {
        std::env::var("TEST_DATABASE_URL").ok()
    }

    /// Create a new test database holding one table per game in `game_ids`
    pub async fn new(test_name: &str, game_ids: &[&str]) -> Result<Self> {
        let admin_url = Self::admin_url().context("TEST_DATABASE_URL is not set")?;

        // Generate unique database name
        let counter = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        let name = format!("scoreboard_test_{}_{}_{}", timestamp, std::process::id(), counter);

        info!("Creating test database: {} for test: {}", name, test_name);

        let admin_options =
            PgConnectOptions::from_str(&admin_url).context("Invalid TEST_DATABASE_URL")?;
        let admin_pool = PgPoolOptions::new()
            .max_connections(2)
            .connect_with(admin_options.clone())
            .await
            .context("Failed to connect to postgres database")?;

        let create_query = format!("CREATE DATABASE \"{}\"", name);
        admin_pool
            .execute(create_query.as_str())
            .await
            .context("Failed to create test database")?;

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(admin_options.database(&name))
            .await
            .context("Failed to connect to test database")?;

        let games = game_ids
            .iter()
            .map(|id| Game::new(GameId::parse(id).unwrap(), id.to_uppercase()))
            .collect();
        let registry = Arc::new(GameRegistry::new(games)?);

        let ready = provision::ensure_tables(&pool, &registry).await;
        anyhow::ensure!(ready == registry.len(), "Failed to provision game tables");

        Ok(Self {
            name,
            pool,
            registry,
            admin_pool,
        })
    }

    /// Number of rows in one game table
    pub async fn row_count(&self, game: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM \"{}\"", game);
        Ok(sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await?)
    }

    /// Drop the test database
    pub async fn cleanup(self) -> Result<()> {
        info!("Cleaning up test database: {}", self.name);

        // Close all connections to the test database
        self.pool.close().await;

        let drop_query = format!("DROP DATABASE \"{}\" WITH (FORCE)", self.name);
        self.admin_pool
            .execute(drop_query.as_str())
            .await
            .context("Failed to drop test database")?;

        self.admin_pool.close().await;

        Ok(())
    }
}
