//! Prediction engine
//!
//! Owns the encoder, the explanation cache and the pretrained artifacts
//! behind seam traits, and exposes the instrumented operations the API
//! serves. The traits exist so tests can substitute counting stubs for
//! the model and explainer.

use std::sync::Arc;
use std::time::Duration;

use salient_model::{AdditiveExplainer, ArtifactBundle, RegressionModel, TrainingSchema};
use tracing::debug;

use crate::cache::ShapCache;
use crate::encoder::Encoder;
use crate::metrics::measure;
use crate::record::SalesRecord;
use crate::{CoreError, CoreResult};

/// Evaluates the pretrained model on an encoded row.
pub trait Predictor: Send + Sync {
    fn predict(&self, row: &[f64]) -> CoreResult<f64>;
}

/// Attributes a prediction to individual input features.
pub trait Explainer: Send + Sync {
    fn shap_values(&self, row: &[f64]) -> CoreResult<Vec<f64>>;
}

impl Predictor for RegressionModel {
    fn predict(&self, row: &[f64]) -> CoreResult<f64> {
        RegressionModel::predict(self, row).map_err(|e| CoreError::Model(e.to_string()))
    }
}

impl Explainer for AdditiveExplainer {
    fn shap_values(&self, row: &[f64]) -> CoreResult<Vec<f64>> {
        self.attributions(row).map_err(|e| CoreError::Explainer(e.to_string()))
    }
}

/// Instrumented outcome of a plain prediction.
#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    pub prediction: f64,
    pub execution_time: Duration,
    pub peak_memory_bytes: u64,
}

/// Instrumented outcome of an explained prediction.
#[derive(Debug, Clone)]
pub struct ExplainedOutcome {
    pub prediction: f64,
    pub shap_values: Vec<f64>,
    pub execution_time: Duration,
    pub peak_memory_bytes: u64,
}

/// The serving engine. One instance per process, shared across requests.
pub struct PredictionEngine {
    encoder: Encoder,
    predictor: Arc<dyn Predictor>,
    explainer: Arc<dyn Explainer>,
    cache: ShapCache,
}

impl PredictionEngine {
    /// Build an engine from a loaded artifact bundle.
    pub fn from_bundle(bundle: ArtifactBundle, cache_entries: usize) -> Self {
        let ArtifactBundle {
            schema,
            model,
            explainer,
        } = bundle;
        Self::new(
            Arc::new(schema),
            Arc::new(model),
            Arc::new(explainer),
            cache_entries,
        )
    }

    /// Build an engine from explicit parts.
    pub fn new(
        schema: Arc<TrainingSchema>,
        predictor: Arc<dyn Predictor>,
        explainer: Arc<dyn Explainer>,
        cache_entries: usize,
    ) -> Self {
        Self {
            encoder: Encoder::new(schema),
            predictor,
            explainer,
            cache: ShapCache::new(cache_entries),
        }
    }

    pub fn schema(&self) -> &TrainingSchema {
        self.encoder.schema()
    }

    fn validate(&self, record: &SalesRecord) -> CoreResult<()> {
        if record.product.trim().is_empty() {
            return Err(CoreError::invalid_input("product name is empty"));
        }
        Ok(())
    }

    /// Encode and predict, timing the whole call.
    pub fn predict(&self, record: &SalesRecord) -> CoreResult<PredictionOutcome> {
        self.validate(record)?;
        let measured = measure(|| {
            let row = self.encoder.encode(record);
            self.predictor.predict(row.values())
        });
        let prediction = measured.value?;
        Ok(PredictionOutcome {
            prediction,
            execution_time: measured.execution_time,
            peak_memory_bytes: measured.peak_memory_bytes,
        })
    }

    /// Encode, predict and explain, serving the explanation from the
    /// cache when this encoded row has been seen before.
    pub fn predict_with_shap(&self, record: &SalesRecord) -> CoreResult<ExplainedOutcome> {
        self.explained(record, true)
    }

    /// Encode, predict and explain, always recomputing the explanation.
    /// Comparison baseline for the cached path.
    pub fn predict_with_shap_uncached(&self, record: &SalesRecord) -> CoreResult<ExplainedOutcome> {
        self.explained(record, false)
    }

    fn explained(&self, record: &SalesRecord, use_cache: bool) -> CoreResult<ExplainedOutcome> {
        self.validate(record)?;
        let measured = measure(|| -> CoreResult<(f64, Vec<f64>)> {
            let row = self.encoder.encode(record);
            let prediction = self.predictor.predict(row.values())?;
            let shap_values = if use_cache {
                let key = row.cache_key();
                match self.cache.get(&key) {
                    Some(cached) => {
                        debug!(key = %key, "explanation cache hit");
                        cached.to_vec()
                    }
                    None => {
                        let computed = self.explainer.shap_values(row.values())?;
                        self.cache.insert(key, computed).to_vec()
                    }
                }
            } else {
                self.explainer.shap_values(row.values())?
            };
            Ok((prediction, shap_values))
        });
        let (prediction, shap_values) = measured.value?;
        Ok(ExplainedOutcome {
            prediction,
            shap_values,
            execution_time: measured.execution_time,
            peak_memory_bytes: measured.peak_memory_bytes,
        })
    }

    /// Drop every cached explanation.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}
