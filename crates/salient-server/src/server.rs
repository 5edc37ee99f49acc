//! Core server implementation

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use salient_core::engine::PredictionEngine;
use salient_model::ArtifactBundle;

use crate::{
    config::ServerConfig,
    error::{ServerError, ServerResult},
    handlers,
};

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<ServerConfig>,
    pub engine: Arc<PredictionEngine>,
}

/// Salient HTTP server
pub struct SalientServer {
    config: Arc<ServerConfig>,
    state: ServerState,
}

impl SalientServer {
    /// Create a new server instance, loading the model, explainer and
    /// training schema from the configured artifact paths. Artifacts are
    /// loaded once here and never reloaded for the process lifetime.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let config = Arc::new(config);

        let bundle = ArtifactBundle::load(
            &config.artifacts.model_path,
            &config.artifacts.explainer_path,
            &config.artifacts.columns_path,
        )?;
        let engine = Arc::new(PredictionEngine::from_bundle(
            bundle,
            config.cache.max_entries,
        ));

        let state = ServerState {
            config: Arc::clone(&config),
            engine,
        };

        Ok(Self { config, state })
    }

    /// Start the server
    pub async fn start(self) -> ServerResult<()> {
        let app = create_router(self.state.clone());
        let addr = self.config.bind;

        info!("Starting Salient server on {}", addr);

        let listener = TcpListener::bind(addr).await.map_err(ServerError::Io)?;

        info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get server state
    pub fn state(&self) -> &ServerState {
        &self.state
    }
}

/// Build the application router for the given state. Exposed separately
/// so tests can drive the handlers without binding a socket.
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        // Prediction endpoints
        .route("/predict", post(handlers::predict::predict))
        .route(
            "/predict_with_shap",
            post(handlers::predict::predict_with_shap),
        )
        .route(
            "/predict_with_shap_no_cache",
            post(handlers::predict::predict_with_shap_no_cache),
        )
        // Performance comparison
        .route(
            "/performance_test",
            post(handlers::performance::performance_test),
        )
        // Cache management
        .route("/clear_cache", post(handlers::cache::clear_cache))
        // Health endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .route("/health/live", get(handlers::health::liveness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run server with graceful shutdown handling
pub async fn run_server(server: SalientServer) -> ServerResult<()> {
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for shutdown signal");
        info!("Shutdown signal received");
    };

    tokio::select! {
        result = server.start() => {
            if let Err(e) = result {
                warn!("Server error: {}", e);
                return Err(e);
            }
        }
        _ = shutdown_signal => {
            info!("Graceful shutdown initiated");
        }
    }

    Ok(())
}
