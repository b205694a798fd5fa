//! Error types for the cache backend
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache backend.
///
/// A missing entry is not an error for the cache operations themselves
/// (they return `None` / `false`); `NotFound` is only raised by the HTTP layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Startup configuration cannot be satisfied (e.g. no driver for the target)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Document store unreachable
    #[error("Connection error: {0}")]
    Connection(String),

    /// Document store rejected an insert, remove or update
    #[error("Operation failed: {0}")]
    OperationFailed(String),

    /// Entry not found
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::OperationFailed(_) => StatusCode::BAD_GATEWAY,
            CacheError::Configuration(_) | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache backend.
pub type Result<T> = std::result::Result<T, CacheError>;
