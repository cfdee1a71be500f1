use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::api::ErrorResponse;
use tracing::{error, warn};

use crate::error::ScoreboardError;

#[derive(Debug)]
pub struct AppError(pub ScoreboardError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ScoreboardError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ScoreboardError::GameNotFound { .. } => StatusCode::NOT_FOUND,
            ScoreboardError::PlayerNotFound { .. } => StatusCode::NOT_FOUND,
            ScoreboardError::DuplicateMember { .. } => StatusCode::CONFLICT,
            ScoreboardError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Store details stay in the log
        let message = match &self.0 {
            ScoreboardError::StoreUnavailable(e) => {
                error!("API error: store unavailable: {:?}", e);
                "Score store is unavailable, please try again later".to_string()
            }
            other => {
                warn!("API request rejected: {}", other);
                other.to_string()
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            kind: self.0.kind().to_string(),
        });

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<ScoreboardError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// Malformed bodies and parameters are reported like any other bad input
impl From<JsonRejection> for ScoreboardError {
    fn from(rejection: JsonRejection) -> Self {
        ScoreboardError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ScoreboardError {
    fn from(rejection: QueryRejection) -> Self {
        ScoreboardError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for ScoreboardError {
    fn from(rejection: PathRejection) -> Self {
        ScoreboardError::InvalidInput(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{GameId, InputError, PlayerKey};

    #[test]
    fn test_status_codes_per_kind() {
        let game = GameId::parse("game1").unwrap();
        let cases = [
            (AppError::from(InputError::Empty { field: "name" }), StatusCode::BAD_REQUEST),
            (
                AppError(ScoreboardError::GameNotFound {
                    game: "nope".to_string(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError(ScoreboardError::PlayerNotFound {
                    game: game.clone(),
                    key: PlayerKey::ByName("x".to_string()),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError(ScoreboardError::DuplicateMember {
                    name: "x".to_string(),
                    game,
                }),
                StatusCode::CONFLICT,
            ),
            (
                AppError::from(sqlx::Error::PoolClosed),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{:?}", err);
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
