//! Startup provisioning: reach the store, make sure the database and every
//! configured game table exist. Runs before the scoreboard is built.

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Executor, PgPool};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::DbSettings;
use crate::registry::{GameRegistry, GameTable};

/// SQLSTATE for "database already exists"
const DUPLICATE_DATABASE: &str = "42P04";

/// Open a pool, retrying while the server is not accepting connections yet.
pub async fn connect_with_retry(
    options: PgConnectOptions,
    max_connections: u32,
    attempts: u32,
    delay: Duration,
) -> Result<PgPool> {
    let attempts = attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt < attempts => {
                warn!(
                    "Database not ready yet (attempt {}/{}): {}. Retrying in {:?}",
                    attempt, attempts, e, delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Unable to connect to the database after {} attempts", attempt)
                });
            }
        }
    }
}

/// Create the configured database unless it already exists.
pub async fn ensure_database(settings: &DbSettings, attempts: u32, delay: Duration) -> Result<()> {
    let admin_pool = connect_with_retry(settings.maintenance_options(), 1, attempts, delay)
        .await
        .context("Failed to connect to the maintenance database")?;

    let create_query = format!("CREATE DATABASE {}", quote_ident(&settings.name));
    match admin_pool.execute(create_query.as_str()).await {
        Ok(_) => info!("Created database {}", settings.name),
        Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(DUPLICATE_DATABASE) => {
            info!("Database {} already exists", settings.name)
        }
        Err(e) => {
            admin_pool.close().await;
            return Err(e).context("Failed to create database");
        }
    }

    admin_pool.close().await;
    Ok(())
}

/// Create missing game tables and bring older ones up to the current layout.
///
/// A failure on one table is logged and does not stop the others. Returns the
/// number of tables that are ready.
pub async fn ensure_tables(pool: &PgPool, registry: &GameRegistry) -> usize {
    let mut ready = 0;
    for table in registry.tables() {
        match ensure_table(pool, table).await {
            Ok(()) => {
                info!("Table {} created or already exists", table.game());
                ready += 1;
            }
            Err(e) => error!("Error preparing table {}: {:#}", table.game(), e),
        }
    }
    ready
}

async fn ensure_table(pool: &PgPool, table: &GameTable) -> Result<()> {
    let ident = table.ident();

    let create = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {ident} (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL,
            score INTEGER NOT NULL DEFAULT 0,
            nickname VARCHAR(100)
        )
        "#
    );
    pool.execute(create.as_str())
        .await
        .context("Failed to create table")?;

    // Tables from before nicknames existed
    let add_nickname = format!("ALTER TABLE {ident} ADD COLUMN IF NOT EXISTS nickname VARCHAR(100)");
    pool.execute(add_nickname.as_str())
        .await
        .context("Failed to add nickname column")?;

    // Replaced by nickname
    let drop_anonymous = format!("ALTER TABLE {ident} DROP COLUMN IF EXISTS anonymous");
    pool.execute(drop_anonymous.as_str())
        .await
        .context("Failed to drop anonymous column")?;

    let unique_name = format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS {} ON {ident} (name)",
        quote_ident(&name_index_name(table.game().as_str()))
    );
    pool.execute(unique_name.as_str())
        .await
        .context("Failed to create unique name index")?;

    Ok(())
}

/// PostgreSQL silently truncates longer identifiers
const MAX_IDENT_LEN: usize = 63;
const NAME_INDEX_SUFFIX: &str = "_name_key";

/// Unique index name for a game table, kept within the identifier limit.
///
/// Long game ids keep a prefix plus a hash of the full id so two games that
/// share a long prefix still get distinct indexes.
fn name_index_name(game: &str) -> String {
    if game.len() + NAME_INDEX_SUFFIX.len() <= MAX_IDENT_LEN {
        return format!("{game}{NAME_INDEX_SUFFIX}");
    }

    // FNV-1a, stable across builds
    let hash = game.bytes().fold(0x811c_9dc5_u32, |h, b| {
        (h ^ u32::from(b)).wrapping_mul(0x0100_0193)
    });
    let prefix_len = MAX_IDENT_LEN - NAME_INDEX_SUFFIX.len() - 9;
    // Game ids are ASCII, so any byte offset is a char boundary
    format!("{}_{hash:08x}{NAME_INDEX_SUFFIX}", &game[..prefix_len])
}

fn quote_ident(raw: &str) -> String {
    format!("\"{}\"", raw.replace('"', "\"\""))
}
