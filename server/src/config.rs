use common::{Game, GameId};
use sqlx::postgres::PgConnectOptions;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_CONNECT_RETRIES: u32 = 5;
const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

/// Database used to issue `CREATE DATABASE` before the target database exists.
const MAINTENANCE_DB: &str = "postgres";

/// Connection settings for the PostgreSQL score store.
#[derive(Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl std::fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("name", &self.name)
            .finish()
    }
}

impl DbSettings {
    /// Options for the configured database.
    pub fn connect_options(&self) -> PgConnectOptions {
        self.options_for(&self.name)
    }

    /// Options for the maintenance database on the same server.
    pub fn maintenance_options(&self) -> PgConnectOptions {
        self.options_for(MAINTENANCE_DB)
    }

    fn options_for(&self, database: &str) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(database)
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub db: DbSettings,
    /// Games in configuration order.
    pub games: Vec<Game>,
    pub http_addr: String,
    pub max_connections: u32,
    pub connect_retries: u32,
    pub retry_delay: Duration,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        // Report every missing variable in the same order the deployment docs list them
        let db_user = required("DB_USER")?;
        let db_password = required("DB_PASSWORD")?;
        let db_host = required("DB_HOST")?;
        let db_port = required("DB_PORT")?;
        let db_name = required("DB_NAME")?;
        let game_names = required("GAME_NAMES")?;
        let game_display_names = required("GAME_DISPLAY_NAMES")?;

        let db = DbSettings {
            host: db_host,
            port: parse_number("DB_PORT", &db_port)?,
            user: db_user,
            password: db_password,
            name: db_name,
        };

        let games = parse_games(&game_names, &game_display_names)?;

        let optional = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty());

        let http_addr = optional("SCOREBOARD_HTTP_ADDR")
            .unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string());
        let max_connections = match optional("SCOREBOARD_DB_MAX_CONNECTIONS") {
            Some(v) => parse_number("SCOREBOARD_DB_MAX_CONNECTIONS", &v)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let connect_retries = match optional("SCOREBOARD_DB_CONNECT_RETRIES") {
            Some(v) => parse_number("SCOREBOARD_DB_CONNECT_RETRIES", &v)?,
            None => DEFAULT_CONNECT_RETRIES,
        };
        let retry_delay_secs = match optional("SCOREBOARD_DB_RETRY_DELAY_SECS") {
            Some(v) => parse_number("SCOREBOARD_DB_RETRY_DELAY_SECS", &v)?,
            None => DEFAULT_RETRY_DELAY_SECS,
        };

        if max_connections == 0 {
            return Err(ConfigError::InvalidVar {
                name: "SCOREBOARD_DB_MAX_CONNECTIONS",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            db,
            games,
            http_addr,
            max_connections,
            connect_retries: connect_retries.max(1),
            retry_delay: Duration::from_secs(retry_delay_secs),
        })
    }
}

fn parse_number<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidVar {
        name,
        reason: format!("'{}': {}", raw, e),
    })
}

/// Pair the comma-separated game names with their display names.
pub fn parse_games(names: &str, display_names: &str) -> Result<Vec<Game>, ConfigError> {
    let names: Vec<&str> = names.split(',').map(str::trim).collect();
    let display_names: Vec<&str> = display_names.split(',').map(str::trim).collect();

    if names.len() != display_names.len() {
        return Err(ConfigError::GameListMismatch {
            names: names.len(),
            display_names: display_names.len(),
        });
    }

    names
        .into_iter()
        .zip(display_names)
        .map(|(name, display)| -> Result<Game, ConfigError> {
            Ok(Game::new(GameId::parse(name)?, display))
        })
        .collect()
}
