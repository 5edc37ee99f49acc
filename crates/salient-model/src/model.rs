//! Pretrained regression model artifact

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// The only model kind this build evaluates.
const LINEAR_KIND: &str = "linear";

/// A pretrained linear regression model evaluated over encoded feature
/// rows: `prediction = coefficients . row + intercept`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionModel {
    kind: String,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl RegressionModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            kind: LINEAR_KIND.to_string(),
            coefficients,
            intercept,
        }
    }

    /// Load and validate a model artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        let model: Self = serde_json::from_slice(&data)?;
        model.validate()?;
        debug!(
            features = model.num_features(),
            path = %path.display(),
            "loaded regression model"
        );
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.kind != LINEAR_KIND {
            return Err(Error::UnsupportedKind(self.kind.clone()));
        }
        Ok(())
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn num_features(&self) -> usize {
        self.coefficients.len()
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Evaluate the model on a single encoded row.
    pub fn predict(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.coefficients.len() {
            return Err(Error::LengthMismatch {
                artifact: "input row",
                expected: self.coefficients.len(),
                found: row.len(),
            });
        }
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(row)
            .map(|(coef, x)| coef * x)
            .sum();
        Ok(dot + self.intercept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicts_dot_product_plus_intercept() {
        let model = RegressionModel::new(vec![2.0, -1.0, 0.5], 10.0);
        let prediction = model.predict(&[3.0, 4.0, 2.0]).unwrap();
        assert!((prediction - 13.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_wrong_row_width() {
        let model = RegressionModel::new(vec![1.0, 1.0], 0.0);
        assert!(matches!(
            model.predict(&[1.0]),
            Err(Error::LengthMismatch { .. })
        ));
    }
}
