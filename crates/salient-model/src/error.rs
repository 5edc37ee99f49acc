//! Error types for artifact loading

use std::io;
use thiserror::Error;

/// Result type alias for artifact operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or evaluating artifacts
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Artifact document failed to parse
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Artifact declares a kind this build cannot evaluate
    #[error("Unsupported artifact kind: {0}")]
    UnsupportedKind(String),

    /// Vector length disagrees with the training schema
    #[error("Length mismatch in {artifact}: expected {expected} values, found {found}")]
    LengthMismatch {
        artifact: &'static str,
        expected: usize,
        found: usize,
    },

    /// Training-column schema is malformed
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}
