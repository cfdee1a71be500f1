use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::constants::MAX_PLAYER_TEXT_LEN;

/// One player's row in one game table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScoreRow {
    pub id: i32,
    pub name: String,
    pub score: i32,
    pub nickname: Option<String>,
}

/// Rejected request input, reported back to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be at most {max} characters (got {len})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

fn check_text(field: &'static str, value: &str) -> Result<(), InputError> {
    if value.is_empty() {
        return Err(InputError::Empty { field });
    }
    let len = value.chars().count();
    if len > MAX_PLAYER_TEXT_LEN {
        return Err(InputError::TooLong {
            field,
            len,
            max: MAX_PLAYER_TEXT_LEN,
        });
    }
    Ok(())
}

/// Validated input for registering a member in every game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    name: String,
    nickname: Option<String>,
}

impl NewMember {
    /// Names are trimmed and must be non-empty. A blank nickname means "no nickname".
    pub fn new(name: &str, nickname: Option<&str>) -> Result<Self, InputError> {
        let name = name.trim();
        check_text("name", name)?;

        let nickname = match nickname.map(str::trim) {
            Some(nick) if !nick.is_empty() => {
                check_text("nickname", nick)?;
                Some(nick.to_string())
            }
            _ => None,
        };

        Ok(Self {
            name: name.to_string(),
            nickname,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }
}

/// Which column identifies the row a score update targets.
///
/// Exactly one lookup is made per update; there is no fallback from one
/// column to the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value", rename_all = "snake_case")]
pub enum PlayerKey {
    ByName(String),
    ByNickname(String),
}

impl PlayerKey {
    /// Builds the key from the two optional identifiers an update request carries.
    ///
    /// A present, non-blank `player_name` selects the name lookup; otherwise the
    /// nickname is used and must itself be non-blank.
    pub fn from_parts(
        player_name: Option<&str>,
        nickname: Option<&str>,
    ) -> Result<Self, InputError> {
        match player_name.map(str::trim) {
            Some(name) if !name.is_empty() => {
                check_text("playerName", name)?;
                Ok(PlayerKey::ByName(name.to_string()))
            }
            _ => {
                let nick = nickname.map(str::trim).unwrap_or_default();
                check_text("nickname", nick)?;
                Ok(PlayerKey::ByNickname(nick.to_string()))
            }
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            PlayerKey::ByName(_) => "name",
            PlayerKey::ByNickname(_) => "nickname",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            PlayerKey::ByName(value) | PlayerKey::ByNickname(value) => value,
        }
    }
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.column(), self.value())
    }
}
