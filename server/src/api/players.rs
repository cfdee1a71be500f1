use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use common::api::{
    AddMemberRequest, AddMemberResponse, GameLeaders, SearchRequest, TopQuery, TopResponse,
    UpdateScoreRequest, UpdateScoreResponse,
};
use common::{AWARD_PODIUM_SIZE, BoardEntry, DEFAULT_TOP_N, Game, MAX_TOP_N, PlayerKey};
use std::sync::Arc;
use tracing::info;

use super::error::AppError;
use crate::db::Database;
use crate::error::ScoreboardError;

/// State for the scoreboard endpoints
#[derive(Clone)]
pub struct ApiState {
    pub db: Arc<dyn Database>,
}

/// List the configured games in display order
pub async fn list_games(State(state): State<ApiState>) -> Json<Vec<Game>> {
    Json(state.db.games())
}

/// Whole leaderboard of one game
pub async fn search(
    State(state): State<ApiState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Vec<BoardEntry>>, AppError> {
    let Json(req) = payload?;
    let mut board = state.db.full_board(&req.game_name).await?;
    if let Some(limit) = req.limit {
        board.truncate(limit);
    }
    Ok(Json(board))
}

/// Podium of every game for the award summary
pub async fn top3(State(state): State<ApiState>) -> Result<Json<TopResponse>, AppError> {
    top_of_every_game(&state, AWARD_PODIUM_SIZE).await.map(Json)
}

/// Top rows of one game
/// Query parameters:
/// - n: optional, defaults to 10, max 1000
pub async fn top_for_game(
    State(state): State<ApiState>,
    game_id: Result<Path<String>, PathRejection>,
    query: Result<Query<TopQuery>, QueryRejection>,
) -> Result<Json<GameLeaders>, AppError> {
    let Path(game_id) = game_id?;
    let Query(query) = query?;
    let n = query.n.unwrap_or(DEFAULT_TOP_N).min(MAX_TOP_N);
    let game = state
        .db
        .games()
        .into_iter()
        .find(|g| g.id.as_str() == game_id)
        .ok_or(ScoreboardError::GameNotFound { game: game_id })?;
    let leaders = state.db.top_n(game.id.as_str(), n).await?;
    Ok(Json(GameLeaders { game, leaders }))
}

async fn top_of_every_game(state: &ApiState, n: usize) -> Result<TopResponse, AppError> {
    let mut games = Vec::new();
    for game in state.db.games() {
        let leaders = state.db.top_n(game.id.as_str(), n).await?;
        games.push(GameLeaders { game, leaders });
    }
    Ok(TopResponse { games })
}

pub async fn update_score(
    State(state): State<ApiState>,
    payload: Result<Json<UpdateScoreRequest>, JsonRejection>,
) -> Result<Json<UpdateScoreResponse>, AppError> {
    let Json(req) = payload?;
    let key = PlayerKey::from_parts(req.player_name.as_deref(), req.nickname.as_deref())?;
    let updated_player = state
        .db
        .update_score(&req.game_name, &key, req.new_score)
        .await?;

    Ok(Json(UpdateScoreResponse {
        message: "Score updated".to_string(),
        updated_player,
    }))
}

pub async fn add_member(
    State(state): State<ApiState>,
    payload: Result<Json<AddMemberRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AddMemberResponse>), AppError> {
    let Json(req) = payload?;
    let results = state
        .db
        .add_member(&req.name, req.nickname.as_deref())
        .await?;

    info!("Member {} joined {} games via API", req.name.trim(), results.len());

    Ok((
        StatusCode::CREATED,
        Json(AddMemberResponse {
            message: "Member added to every game".to_string(),
            results,
        }),
    ))
}
