//! Artifact loading for Salient's pretrained regression stack
//!
//! This crate owns the on-disk format of the three artifacts the service
//! consumes at startup: the ordered training-column schema, the regression
//! model, and the additive feature-attribution explainer. Artifacts are
//! plain JSON documents produced by an offline training pipeline; this
//! crate only loads, validates and evaluates them.

pub mod error;
pub mod explainer;
pub mod loader;
pub mod model;
pub mod schema;

pub use error::{Error, Result};
pub use explainer::AdditiveExplainer;
pub use loader::ArtifactBundle;
pub use model::RegressionModel;
pub use schema::TrainingSchema;
