//! Prediction and explanation handlers

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::debug;

use salient_core::record::SalesRecord;

use crate::{error::ServerResult, server::ServerState};

/// Response for the plain prediction endpoint.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: f64,
    pub execution_time: f64,
    pub memory_usage: u64,
}

/// Response for the explanation endpoints: the prediction plus one
/// contribution per training column, in schema order.
#[derive(Debug, Serialize)]
pub struct ExplainedResponse {
    pub prediction: f64,
    pub shap_values: Vec<f64>,
    pub execution_time: f64,
    pub memory_usage: u64,
}

/// Predict without explanation.
pub async fn predict(
    State(state): State<ServerState>,
    Json(record): Json<SalesRecord>,
) -> ServerResult<Json<PredictResponse>> {
    debug!(product = %record.product, month = record.month, "predict request");

    let outcome = state.engine.predict(&record)?;
    Ok(Json(PredictResponse {
        prediction: outcome.prediction,
        execution_time: outcome.execution_time.as_secs_f64(),
        memory_usage: outcome.peak_memory_bytes,
    }))
}

/// Predict and explain, serving the explanation from the cache when this
/// encoded row has been seen before.
pub async fn predict_with_shap(
    State(state): State<ServerState>,
    Json(record): Json<SalesRecord>,
) -> ServerResult<Json<ExplainedResponse>> {
    debug!(product = %record.product, month = record.month, "explained predict request");

    let outcome = state.engine.predict_with_shap(&record)?;
    Ok(Json(explained_response(outcome)))
}

/// Predict and explain with the cache bypassed; comparison baseline for
/// the cached endpoint.
pub async fn predict_with_shap_no_cache(
    State(state): State<ServerState>,
    Json(record): Json<SalesRecord>,
) -> ServerResult<Json<ExplainedResponse>> {
    debug!(product = %record.product, month = record.month, "uncached explained predict request");

    let outcome = state.engine.predict_with_shap_uncached(&record)?;
    Ok(Json(explained_response(outcome)))
}

fn explained_response(outcome: salient_core::engine::ExplainedOutcome) -> ExplainedResponse {
    ExplainedResponse {
        prediction: outcome.prediction,
        shap_values: outcome.shap_values,
        execution_time: outcome.execution_time.as_secs_f64(),
        memory_usage: outcome.peak_memory_bytes,
    }
}
