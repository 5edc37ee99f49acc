//! Health check handlers

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{error::ServerResult, server::ServerState};

/// Basic health check
pub async fn health_check() -> ServerResult<Json<Value>> {
    Ok(Json(json!({
        "status": "ok",
        "service": "salient-server",
        "version": crate::VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

/// Readiness check - the engine is ready once its artifacts are loaded,
/// which `SalientServer::new` guarantees; report what it is serving with.
pub async fn readiness_check(State(state): State<ServerState>) -> ServerResult<Json<Value>> {
    let features = state.engine.schema().len();
    let ready = features > 0;
    let status = if ready { "ready" } else { "not_ready" };

    Ok(Json(json!({
        "status": status,
        "service": "salient-server",
        "version": crate::VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "checks": {
            "engine": {
                "status": if ready { "ok" } else { "error" },
                "features": features,
                "cache_entries": state.engine.cache_len()
            }
        }
    })))
}

/// Liveness check - checks if server is alive
pub async fn liveness_check(State(state): State<ServerState>) -> ServerResult<Json<Value>> {
    let config_available = !state.config.bind.to_string().is_empty();
    let status = if config_available { "alive" } else { "dead" };

    Ok(Json(json!({
        "status": status,
        "service": "salient-server",
        "version": crate::VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
