//! Additive feature-attribution explainer artifact
//!
//! For a linear model the exact additive attribution of a prediction is
//! `phi[j] = coefficients[j] * (row[j] - baseline[j])`, where the baseline
//! holds the per-column means of the training data. The attributions
//! satisfy `expected_value + sum(phi) == prediction`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

const LINEAR_KIND: &str = "linear";

/// Additive explainer over encoded feature rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditiveExplainer {
    kind: String,
    expected_value: f64,
    baseline: Vec<f64>,
    coefficients: Vec<f64>,
}

impl AdditiveExplainer {
    pub fn new(expected_value: f64, baseline: Vec<f64>, coefficients: Vec<f64>) -> Result<Self> {
        let explainer = Self {
            kind: LINEAR_KIND.to_string(),
            expected_value,
            baseline,
            coefficients,
        };
        explainer.validate()?;
        Ok(explainer)
    }

    /// Load and validate an explainer artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        let explainer: Self = serde_json::from_slice(&data)?;
        explainer.validate()?;
        debug!(
            features = explainer.num_features(),
            path = %path.display(),
            "loaded explainer"
        );
        Ok(explainer)
    }

    fn validate(&self) -> Result<()> {
        if self.kind != LINEAR_KIND {
            return Err(Error::UnsupportedKind(self.kind.clone()));
        }
        if self.baseline.len() != self.coefficients.len() {
            return Err(Error::LengthMismatch {
                artifact: "explainer baseline",
                expected: self.coefficients.len(),
                found: self.baseline.len(),
            });
        }
        Ok(())
    }

    /// Expected model output over the training distribution.
    pub fn expected_value(&self) -> f64 {
        self.expected_value
    }

    pub fn num_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Per-feature contributions for one encoded row, in schema order.
    pub fn attributions(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.coefficients.len() {
            return Err(Error::LengthMismatch {
                artifact: "input row",
                expected: self.coefficients.len(),
                found: row.len(),
            });
        }
        Ok(self
            .coefficients
            .iter()
            .zip(&self.baseline)
            .zip(row)
            .map(|((coef, base), x)| coef * (x - base))
            .collect())
    }
}
