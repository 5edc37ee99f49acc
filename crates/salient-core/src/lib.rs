//! Salient Core - prediction engine
//!
//! This crate provides the serving-side engine around the pretrained
//! artifacts: one-hot encoding against the fixed training schema, the
//! bounded explanation cache, wall-clock/peak-memory instrumentation, and
//! the in-process performance comparison across serving modes.

pub mod cache;
pub mod encoder;
pub mod engine;
pub mod metrics;
pub mod perf;
pub mod record;

use thiserror::Error;

/// Engine error, carrying the failure kind so the API boundary can choose
/// a response status without parsing message text.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The input failed validation before reaching the model.
    #[error("{message}")]
    InvalidInput { message: String },

    /// The prediction model failed on an encoded row.
    #[error("model error: {0}")]
    Model(String),

    /// The explainer failed on an encoded row.
    #[error("explainer error: {0}")]
    Explainer(String),

    /// Artifact loading or validation failed.
    #[error("artifact error: {0}")]
    Artifact(#[from] salient_model::Error),
}

impl CoreError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            message: message.into(),
        }
    }

    /// True when the failure is an input problem rather than a
    /// computation fault.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::InvalidInput { .. })
    }
}

/// Result type for engine operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

pub use cache::ShapCache;
pub use encoder::{EncodedRow, Encoder};
pub use engine::{Explainer, PredictionEngine, Predictor};
pub use metrics::{measure, Measured, MemoryTracer, TrackingAllocator};
pub use perf::{compare_performance, PerformanceReport};
pub use record::SalesRecord;
