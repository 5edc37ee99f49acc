//! Cache management handlers

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::debug;

use crate::{error::ServerResult, server::ServerState};

/// Drop every cached explanation. Clearing an empty cache is still a
/// success, so repeated calls are safe.
pub async fn clear_cache(State(state): State<ServerState>) -> ServerResult<Json<Value>> {
    let entries = state.engine.cache_len();
    state.engine.clear_cache();
    debug!(entries, "explanation cache cleared");

    Ok(Json(json!({ "message": "Cache cleared" })))
}
