use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use credit_core::CoreError;
use credit_db::DbError;
use credit_scorer::ScorerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// Database error
    Database(DbError),

    /// Domain rule violated by the request (400)
    Core(CoreError),

    /// Initial scoring failed upstream (502)
    Scorer(ScorerError),

    /// Invalid request payload
    InvalidPayload(String),

    /// Bad request (400)
    BadRequest(String),

    /// Forbidden (403)
    Forbidden(String),

    /// Internal server error
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Database(e) => write!(f, "Database error: {}", e),
            ApiError::Core(e) => write!(f, "{}", e),
            ApiError::Scorer(e) => write!(f, "Scorer error: {}", e),
            ApiError::InvalidPayload(msg) => write!(f, "Invalid payload: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error response JSON structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::Database(e @ DbError::ArticleNotFound(_)) => {
                (StatusCode::NOT_FOUND, "not_found", e.to_string())
            }
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    e.to_string(),
                )
            }
            ApiError::Core(e) => (StatusCode::BAD_REQUEST, "invalid_input", e.to_string()),
            ApiError::Scorer(e) => {
                tracing::warn!("Scorer error: {}", e);
                (StatusCode::BAD_GATEWAY, "scorer_error", e.to_string())
            }
            ApiError::InvalidPayload(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_payload", msg.clone())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
            ),
        };

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(error_response)).into_response()
    }
}

// Conversions from domain errors to ApiError
impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        ApiError::Database(e)
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::Core(e)
    }
}

impl From<ScorerError> for ApiError {
    fn from(e: ScorerError) -> Self {
        ApiError::Scorer(e)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
