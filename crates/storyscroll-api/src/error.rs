//! Storyscroll: API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use storyscroll_core::error::ReaderError;
use thiserror::Error;

/// Startup and runtime errors for the service binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The episode failed to load or validate.
    #[error("episode error: {0}")]
    Episode(#[from] ReaderError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `ReaderError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub ReaderError);

impl From<ReaderError> for ApiError {
    fn from(err: ReaderError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            ReaderError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "session_not_found"),
            ReaderError::UnresolvedName { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "unresolved_name")
            }
            ReaderError::SectionNotRendered(_) => (StatusCode::BAD_REQUEST, "section_not_rendered"),
            ReaderError::InvalidEpisode(_) => (StatusCode::INTERNAL_SERVER_ERROR, "invalid_episode"),
            ReaderError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
