use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain error taxonomy for the matching and trade-negotiation engine.
///
/// Race-induced duplicate creations (connection/match already inserted by a
/// concurrent swipe) are resolved inside the services by fetching the winner
/// and never reach this type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    InvalidTransition(String),

    #[error("{0}")]
    Validation(String),

    /// The requesting user's profile is missing data the operation needs
    /// (location or preferences).
    #[error("{0}")]
    Configuration(String),

    #[error("database error: {0}")]
    Store(#[from] sqlx::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::FORBIDDEN,
            AppError::InvalidTransition(_)
            | AppError::Validation(_)
            | AppError::Configuration(_) => StatusCode::BAD_REQUEST,
            AppError::Store(e) => {
                tracing::error!("store failure: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Infrastructure details stay in the logs, not in the response body.
        let message = match &self {
            AppError::Store(_) => "internal server error".to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_client_codes() {
        let cases = [
            (AppError::NotFound("plant missing".into()), StatusCode::NOT_FOUND),
            (AppError::Unauthorized("not yours".into()), StatusCode::FORBIDDEN),
            (AppError::InvalidTransition("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::Configuration("no location".into()), StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_store_errors_map_to_500() {
        let err = AppError::Store(sqlx::Error::RowNotFound);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
