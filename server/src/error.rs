use common::{GameId, InputError, PlayerKey};
use thiserror::Error;

/// Outcomes of the scoreboard operations that callers must handle.
///
/// `DuplicateMember` and `PlayerNotFound` are ordinary user-facing results;
/// `StoreUnavailable` means the transaction was rolled back and nothing changed.
#[derive(Debug, Error)]
pub enum ScoreboardError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("game '{game}' does not exist")]
    GameNotFound { game: String },

    #[error("player '{name}' already exists in game '{game}'")]
    DuplicateMember { name: String, game: GameId },

    #[error("no player with {key} in game '{game}'")]
    PlayerNotFound { game: GameId, key: PlayerKey },

    #[error("score store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),
}

impl ScoreboardError {
    /// Short machine-readable name, used in API error bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ScoreboardError::InvalidInput(_) => "invalid_input",
            ScoreboardError::GameNotFound { .. } => "game_not_found",
            ScoreboardError::DuplicateMember { .. } => "duplicate_member",
            ScoreboardError::PlayerNotFound { .. } => "player_not_found",
            ScoreboardError::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

impl From<InputError> for ScoreboardError {
    fn from(err: InputError) -> Self {
        ScoreboardError::InvalidInput(err.to_string())
    }
}

/// Startup configuration problems. Any of these stops the process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },

    #[error(
        "GAME_NAMES and GAME_DISPLAY_NAMES must have the same number of items ({names} vs {display_names})"
    )]
    GameListMismatch { names: usize, display_names: usize },

    #[error("no games configured")]
    NoGames,

    #[error(transparent)]
    InvalidGameId(#[from] common::InvalidGameId),

    #[error("game '{0}' is configured more than once")]
    DuplicateGame(GameId),
}

pub type Result<T, E = ScoreboardError> = std::result::Result<T, E>;
