//! Performance comparison handler

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use salient_core::{compare_performance, record::SalesRecord, PerformanceReport};

use crate::{error::ServerResult, server::ServerState};

/// Request body: the input record plus an optional per-mode iteration
/// count (defaults to the configured count).
#[derive(Debug, Deserialize)]
pub struct PerformanceRequest {
    #[serde(flatten)]
    pub record: SalesRecord,
    pub n_requests: Option<u32>,
}

/// Run the three serving modes repeatedly for one input, write the text
/// report to the configured results file, and return the aggregate
/// figures.
pub async fn performance_test(
    State(state): State<ServerState>,
    Json(request): Json<PerformanceRequest>,
) -> ServerResult<Json<PerformanceReport>> {
    let n_requests = request
        .n_requests
        .unwrap_or(state.config.performance.default_requests);

    let report = compare_performance(&state.engine, &request.record, n_requests)?;

    let results_path = &state.config.performance.results_path;
    std::fs::write(results_path, report.render_text())?;
    info!(path = %results_path.display(), n_requests, "performance report written");

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_accepts_optional_count() {
        let with_count: PerformanceRequest =
            serde_json::from_str(r#"{"produto":"Produto_1","mes":1,"n_requests":5}"#).unwrap();
        assert_eq!(with_count.n_requests, Some(5));
        assert_eq!(with_count.record.product, "Produto_1");

        let without_count: PerformanceRequest =
            serde_json::from_str(r#"{"produto":"Produto_1","mes":1}"#).unwrap();
        assert_eq!(without_count.n_requests, None);
    }
}
