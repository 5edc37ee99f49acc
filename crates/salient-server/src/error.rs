//! Error types for the Salient server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use salient_core::CoreError;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Artifact error: {0}")]
    Artifact(#[from] salient_model::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Input problems are the client's fault; computation faults
            // inside the model or explainer are ours.
            ServerError::InvalidRequest(_) | ServerError::Json(_) => StatusCode::BAD_REQUEST,
            ServerError::Core(err) if err.is_validation() => StatusCode::BAD_REQUEST,
            ServerError::Core(_)
            | ServerError::Artifact(_)
            | ServerError::Config(_)
            | ServerError::Io(_)
            | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // The body carries the failure message verbatim as `detail`.
        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}
