//! Request and response bodies of the scoreboard HTTP API.

use serde::{Deserialize, Serialize};

use crate::game::{Game, GameId};
use crate::player::PlayerScoreRow;
use crate::ranking::RankedRow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMemberRequest {
    /// Missing and blank names are both rejected by member validation.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// The row created in one game by an add-member call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberCreated {
    pub game: GameId,
    pub player: PlayerScoreRow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMemberResponse {
    pub message: String,
    pub results: Vec<MemberCreated>,
}

/// Score submission. Leaving `player_name` out (or null, or blank) selects the
/// nickname lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScoreRequest {
    pub game_name: String,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    pub new_score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScoreResponse {
    pub message: String,
    pub updated_player: PlayerScoreRow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub game_name: String,
    /// Truncate the board after ranking; absent returns every row.
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopQuery {
    pub n: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLeaders {
    #[serde(flatten)]
    pub game: Game,
    pub leaders: Vec<RankedRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopResponse {
    pub games: Vec<GameLeaders>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}
