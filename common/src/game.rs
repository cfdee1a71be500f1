use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::MAX_GAME_ID_LEN;

/// Stable key of a game table, e.g. `game1`.
///
/// Only lowercase ASCII letters, digits and underscores are accepted and the
/// first character must be a letter, so a `GameId` is always safe to use as a
/// SQL identifier once quoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameId(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidGameId(pub String);

impl fmt::Display for InvalidGameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid game identifier '{}': expected [a-z][a-z0-9_]* of at most {} characters",
            self.0, MAX_GAME_ID_LEN
        )
    }
}

impl std::error::Error for InvalidGameId {}

impl GameId {
    pub fn parse(raw: &str) -> Result<Self, InvalidGameId> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_GAME_ID_LEN
            && raw.starts_with(|c: char| c.is_ascii_lowercase())
            && raw
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

        if valid {
            Ok(GameId(raw.to_string()))
        } else {
            Err(InvalidGameId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl TryFrom<String> for GameId {
    type Error = InvalidGameId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        GameId::parse(&value)
    }
}

impl From<GameId> for String {
    fn from(id: GameId) -> Self {
        id.0
    }
}

/// A configured game: its table key and the name shown to people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    #[serde(rename = "name")]
    pub display_name: String,
}

impl Game {
    pub fn new(id: GameId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}
