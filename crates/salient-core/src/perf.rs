//! In-process performance comparison across serving modes
//!
//! Runs the plain, cached-explanation and uncached-explanation paths a
//! fixed number of times each for one input and reduces the measurements
//! to per-mode averages plus the deltas of each explanation mode against
//! the no-explanation baseline.

use serde::Serialize;
use tracing::info;

use crate::engine::PredictionEngine;
use crate::record::SalesRecord;
use crate::CoreResult;

/// Iterations per mode when the caller does not specify a count.
pub const DEFAULT_REQUESTS: u32 = 100;

/// Aggregated comparison figures. Field names are the wire contract of
/// the performance endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceReport {
    pub average_time_without_shap: f64,
    pub average_time_with_shap: f64,
    pub average_time_with_shap_no_cache: f64,
    pub average_memory_without_shap: f64,
    pub average_memory_with_shap: f64,
    pub average_memory_with_shap_no_cache: f64,
    pub time_gain_with_shap: f64,
    pub memory_savings_with_shap: f64,
    pub memory_savings_percentage_with_shap: f64,
    pub time_gain_with_shap_no_cache: f64,
    pub memory_savings_with_shap_no_cache: f64,
    pub memory_savings_percentage_with_shap_no_cache: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct ModeAverages {
    time: f64,
    memory: f64,
}

/// Run all three modes `n_requests` times each for one input. The first
/// failed iteration aborts the whole comparison.
pub fn compare_performance(
    engine: &PredictionEngine,
    record: &SalesRecord,
    n_requests: u32,
) -> CoreResult<PerformanceReport> {
    let n = n_requests.max(1);
    info!(n_requests = n, "running performance comparison");

    let without_shap = average_mode(n, || {
        engine.predict(record).map(|o| (o.execution_time.as_secs_f64(), o.peak_memory_bytes))
    })?;
    let with_shap = average_mode(n, || {
        engine
            .predict_with_shap(record)
            .map(|o| (o.execution_time.as_secs_f64(), o.peak_memory_bytes))
    })?;
    let no_cache = average_mode(n, || {
        engine
            .predict_with_shap_uncached(record)
            .map(|o| (o.execution_time.as_secs_f64(), o.peak_memory_bytes))
    })?;

    Ok(PerformanceReport {
        average_time_without_shap: without_shap.time,
        average_time_with_shap: with_shap.time,
        average_time_with_shap_no_cache: no_cache.time,
        average_memory_without_shap: without_shap.memory,
        average_memory_with_shap: with_shap.memory,
        average_memory_with_shap_no_cache: no_cache.memory,
        time_gain_with_shap: without_shap.time - with_shap.time,
        memory_savings_with_shap: without_shap.memory - with_shap.memory,
        memory_savings_percentage_with_shap: savings_percentage(
            without_shap.memory,
            with_shap.memory,
        ),
        time_gain_with_shap_no_cache: without_shap.time - no_cache.time,
        memory_savings_with_shap_no_cache: without_shap.memory - no_cache.memory,
        memory_savings_percentage_with_shap_no_cache: savings_percentage(
            without_shap.memory,
            no_cache.memory,
        ),
    })
}

fn average_mode(n: u32, mut run: impl FnMut() -> CoreResult<(f64, u64)>) -> CoreResult<ModeAverages> {
    let mut total_time = 0.0;
    let mut total_memory = 0.0;
    for _ in 0..n {
        let (time, memory) = run()?;
        total_time += time;
        total_memory += memory as f64;
    }
    let requests = n as f64;
    Ok(ModeAverages {
        time: total_time / requests,
        memory: total_memory / requests,
    })
}

fn savings_percentage(baseline: f64, mode: f64) -> f64 {
    if baseline > 0.0 {
        100.0 * (baseline - mode) / baseline
    } else {
        0.0
    }
}

impl PerformanceReport {
    /// Human-readable report written next to the structured response.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Average time without SHAP: {:.4} seconds\n",
            self.average_time_without_shap
        ));
        out.push_str(&format!(
            "Average time with SHAP (cache): {:.4} seconds\n",
            self.average_time_with_shap
        ));
        out.push_str(&format!(
            "Average time with SHAP (no cache): {:.4} seconds\n",
            self.average_time_with_shap_no_cache
        ));
        out.push_str(&format!(
            "Average memory without SHAP: {:.2} bytes\n",
            self.average_memory_without_shap
        ));
        out.push_str(&format!(
            "Average memory with SHAP (cache): {:.2} bytes\n",
            self.average_memory_with_shap
        ));
        out.push_str(&format!(
            "Average memory with SHAP (no cache): {:.2} bytes\n",
            self.average_memory_with_shap_no_cache
        ));
        out.push_str(&format!(
            "Time gain with SHAP (cache): {:.4} seconds\n",
            self.time_gain_with_shap
        ));
        out.push_str(&format!(
            "Memory savings with SHAP (cache): {:.2} bytes\n",
            self.memory_savings_with_shap
        ));
        out.push_str(&format!(
            "Memory savings percentage with SHAP (cache): {:.2}%\n",
            self.memory_savings_percentage_with_shap
        ));
        out.push_str(&format!(
            "Time gain with SHAP (no cache): {:.4} seconds\n",
            self.time_gain_with_shap_no_cache
        ));
        out.push_str(&format!(
            "Memory savings with SHAP (no cache): {:.2} bytes\n",
            self.memory_savings_with_shap_no_cache
        ));
        out.push_str(&format!(
            "Memory savings percentage with SHAP (no cache): {:.2}%\n",
            self.memory_savings_percentage_with_shap_no_cache
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Explainer, Predictor};
    use crate::CoreError;
    use salient_model::TrainingSchema;
    use std::sync::Arc;

    struct FixedModel;

    impl Predictor for FixedModel {
        fn predict(&self, _row: &[f64]) -> CoreResult<f64> {
            Ok(7.0)
        }
    }

    struct FixedExplainer;

    impl Explainer for FixedExplainer {
        fn shap_values(&self, row: &[f64]) -> CoreResult<Vec<f64>> {
            Ok(vec![1.0; row.len()])
        }
    }

    struct FailingExplainer;

    impl Explainer for FailingExplainer {
        fn shap_values(&self, _row: &[f64]) -> CoreResult<Vec<f64>> {
            Err(CoreError::Explainer("down".to_string()))
        }
    }

    fn engine(explainer: Arc<dyn Explainer>) -> PredictionEngine {
        let schema = Arc::new(
            TrainingSchema::new(vec!["mes".to_string(), "produto_A".to_string()]).unwrap(),
        );
        PredictionEngine::new(schema, Arc::new(FixedModel), explainer, 16)
    }

    fn record() -> SalesRecord {
        SalesRecord {
            product: "A".to_string(),
            month: 1,
        }
    }

    #[test]
    fn deltas_are_consistent_with_averages() {
        let engine = engine(Arc::new(FixedExplainer));
        let report = compare_performance(&engine, &record(), 1).unwrap();

        let expected_gain = report.average_time_without_shap - report.average_time_with_shap;
        assert!((report.time_gain_with_shap - expected_gain).abs() < 1e-12);

        let expected_gain_no_cache =
            report.average_time_without_shap - report.average_time_with_shap_no_cache;
        assert!((report.time_gain_with_shap_no_cache - expected_gain_no_cache).abs() < 1e-12);

        let expected_savings =
            report.average_memory_without_shap - report.average_memory_with_shap;
        assert!((report.memory_savings_with_shap - expected_savings).abs() < 1e-12);
    }

    #[test]
    fn zero_memory_baseline_yields_zero_percentage() {
        // No tracking allocator in the test binary, so every memory
        // average is zero and the percentage guard must kick in.
        let engine = engine(Arc::new(FixedExplainer));
        let report = compare_performance(&engine, &record(), 2).unwrap();

        assert_eq!(report.average_memory_without_shap, 0.0);
        assert_eq!(report.memory_savings_percentage_with_shap, 0.0);
        assert_eq!(report.memory_savings_percentage_with_shap_no_cache, 0.0);
    }

    #[test]
    fn zero_requests_is_clamped_to_one() {
        let engine = engine(Arc::new(FixedExplainer));
        assert!(compare_performance(&engine, &record(), 0).is_ok());
    }

    #[test]
    fn failing_iteration_aborts_the_comparison() {
        let engine = engine(Arc::new(FailingExplainer));
        let result = compare_performance(&engine, &record(), 3);
        assert!(result.is_err());
    }

    #[test]
    fn report_text_carries_every_figure() {
        let engine = engine(Arc::new(FixedExplainer));
        let report = compare_performance(&engine, &record(), 1).unwrap();
        let text = report.render_text();

        assert_eq!(text.lines().count(), 12);
        assert!(text.contains("Average time without SHAP:"));
        assert!(text.contains("Time gain with SHAP (no cache):"));
        assert!(text.contains("Memory savings percentage with SHAP (cache):"));
    }
}
