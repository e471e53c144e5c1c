//! Error types for terrace-data

use crate::services::player_import::ImportError;
use crate::services::source::SourceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// External provider failed (502)
    #[error("Upstream provider error: {0}")]
    Upstream(String),

    /// External provider timed out (504)
    #[error("Upstream provider timed out")]
    UpstreamTimeout,

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Database error (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ImportError> for ApiError {
    fn from(e: ImportError) -> Self {
        match e {
            ImportError::Parameter(err) => ApiError::BadRequest(err.to_string()),
            ImportError::Source(SourceError::Timeout) => ApiError::UpstreamTimeout,
            ImportError::Source(err) => ApiError::Upstream(err.to_string()),
            ImportError::Database(err) => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg),
            ApiError::UpstreamTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "UPSTREAM_TIMEOUT",
                "Upstream provider timed out".to_string(),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            ApiError::Database(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                err.to_string(),
            ),
            ApiError::Other(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_errors_map_to_the_right_status() {
        let bad_param: ApiError = ImportError::Parameter(crate::models::InvalidParameter {
            field: "season",
        })
        .into();
        assert!(matches!(bad_param, ApiError::BadRequest(msg) if msg.contains("season")));

        let timeout: ApiError = ImportError::Source(SourceError::Timeout).into();
        assert!(matches!(timeout, ApiError::UpstreamTimeout));

        let upstream: ApiError = ImportError::Source(SourceError::Api {
            status: 500,
            message: "server exploded".to_string(),
        })
        .into();
        assert!(matches!(upstream, ApiError::Upstream(msg) if msg.contains("server exploded")));

        let db: ApiError = ImportError::Database(sqlx::Error::PoolClosed).into();
        assert!(matches!(db, ApiError::Database(_)));
    }
}
