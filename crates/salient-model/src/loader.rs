//! Startup artifact bundle

use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::explainer::AdditiveExplainer;
use crate::model::RegressionModel;
use crate::schema::TrainingSchema;

/// The three artifacts consumed at process start, cross-validated so the
/// rest of the system can assume consistent feature widths.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub schema: TrainingSchema,
    pub model: RegressionModel,
    pub explainer: AdditiveExplainer,
}

impl ArtifactBundle {
    /// Load schema, model and explainer and verify they agree on the
    /// feature count. This is the single entry point used at startup;
    /// artifacts are immutable afterwards.
    pub fn load(model_path: &Path, explainer_path: &Path, columns_path: &Path) -> Result<Self> {
        let schema = TrainingSchema::load(columns_path)?;
        let model = RegressionModel::load(model_path)?;
        let explainer = AdditiveExplainer::load(explainer_path)?;

        if model.num_features() != schema.len() {
            return Err(Error::LengthMismatch {
                artifact: "model coefficients",
                expected: schema.len(),
                found: model.num_features(),
            });
        }
        if explainer.num_features() != schema.len() {
            return Err(Error::LengthMismatch {
                artifact: "explainer coefficients",
                expected: schema.len(),
                found: explainer.num_features(),
            });
        }

        info!(features = schema.len(), "artifact bundle loaded");
        Ok(Self {
            schema,
            model,
            explainer,
        })
    }
}
