//! Integration tests for salient-server
//!
//! These tests drive the full router end to end: request decoding,
//! handler logic, engine behavior and error mapping.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use salient_core::engine::PredictionEngine;
use salient_model::{AdditiveExplainer, RegressionModel, TrainingSchema};
use salient_server::{
    config::ServerConfig,
    server::{create_router, ServerState},
};

const COEFFICIENTS: [f64; 4] = [10.0, 50.0, -20.0, 5.0];
const INTERCEPT: f64 = 100.0;

fn test_state(config: ServerConfig) -> ServerState {
    let schema = TrainingSchema::new(vec![
        "mes".to_string(),
        "produto_Produto_1".to_string(),
        "produto_Produto_2".to_string(),
        "produto_Produto_3".to_string(),
    ])
    .unwrap();
    let baseline = vec![6.5, 0.25, 0.25, 0.25];
    let expected_value = INTERCEPT
        + COEFFICIENTS
            .iter()
            .zip(&baseline)
            .map(|(c, b)| c * b)
            .sum::<f64>();

    let model = RegressionModel::new(COEFFICIENTS.to_vec(), INTERCEPT);
    let explainer =
        AdditiveExplainer::new(expected_value, baseline, COEFFICIENTS.to_vec()).unwrap();
    let engine = PredictionEngine::new(
        Arc::new(schema),
        Arc::new(model),
        Arc::new(explainer),
        16,
    );

    ServerState {
        config: Arc::new(config),
        engine: Arc::new(engine),
    }
}

fn test_router() -> Router {
    create_router(test_state(ServerConfig::default()))
}

async fn send_json(router: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json_body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    router.oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn predict_returns_prediction_and_metrics() {
    let router = test_router();
    let response = send_json(
        router,
        Method::POST,
        "/predict",
        Some(json!({"produto": "Produto_1", "mes": 2})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    // 100 + 10*2 + 50 = 170
    assert!((body["prediction"].as_f64().unwrap() - 170.0).abs() < 1e-9);
    assert!(body["execution_time"].as_f64().unwrap() >= 0.0);
    assert!(body["memory_usage"].as_u64().is_some());
    assert!(body.get("shap_values").is_none());
}

#[tokio::test]
async fn explained_prediction_is_additive_and_stable_across_calls() {
    let router = test_router();
    let request = json!({"produto": "Produto_2", "mes": 7});

    let first = json_body(
        send_json(
            router.clone(),
            Method::POST,
            "/predict_with_shap",
            Some(request.clone()),
        )
        .await,
    )
    .await;
    let second = json_body(
        send_json(router, Method::POST, "/predict_with_shap", Some(request)).await,
    )
    .await;

    // Same encoded row, so the cached vector is returned unchanged.
    assert_eq!(first["shap_values"], second["shap_values"]);

    let shap: Vec<f64> = first["shap_values"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    assert_eq!(shap.len(), 4);

    // expected_value + sum(shap) reconstructs the prediction
    let prediction = first["prediction"].as_f64().unwrap();
    let expected_value = 100.0 + 10.0 * 6.5 + (50.0 - 20.0 + 5.0) * 0.25;
    let reconstructed = expected_value + shap.iter().sum::<f64>();
    assert!((reconstructed - prediction).abs() < 1e-9);
}

#[tokio::test]
async fn uncached_endpoint_matches_cached_values() {
    let router = test_router();
    let request = json!({"produto": "Produto_3", "mes": 4});

    let cached = json_body(
        send_json(
            router.clone(),
            Method::POST,
            "/predict_with_shap",
            Some(request.clone()),
        )
        .await,
    )
    .await;
    let uncached = json_body(
        send_json(
            router,
            Method::POST,
            "/predict_with_shap_no_cache",
            Some(request),
        )
        .await,
    )
    .await;

    assert_eq!(cached["shap_values"], uncached["shap_values"]);
    assert_eq!(cached["prediction"], uncached["prediction"]);
}

#[tokio::test]
async fn clear_cache_confirms_and_is_idempotent() {
    let router = test_router();

    // Populate, then clear twice; both clears must succeed.
    send_json(
        router.clone(),
        Method::POST,
        "/predict_with_shap",
        Some(json!({"produto": "Produto_1", "mes": 1})),
    )
    .await;

    for _ in 0..2 {
        let response = send_json(router.clone(), Method::POST, "/clear_cache", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Cache cleared");
    }
}

#[tokio::test]
async fn malformed_input_is_a_client_error() {
    let router = test_router();

    // Missing field
    let response = send_json(
        router.clone(),
        Method::POST,
        "/predict",
        Some(json!({"produto": "Produto_1"})),
    )
    .await;
    assert!(response.status().is_client_error());

    // Wrong type
    let response = send_json(
        router.clone(),
        Method::POST,
        "/predict",
        Some(json!({"produto": "Produto_1", "mes": "march"})),
    )
    .await;
    assert!(response.status().is_client_error());

    // No body at all
    let response = send_json(router, Method::POST, "/predict", None).await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn empty_product_returns_bad_request_with_detail() {
    let router = test_router();
    let response = send_json(
        router,
        Method::POST,
        "/predict",
        Some(json!({"produto": "", "mes": 1})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["detail"].as_str().unwrap().contains("product"));
}

#[tokio::test]
async fn performance_test_writes_report_and_returns_consistent_figures() {
    let dir = tempfile::tempdir().unwrap();
    let results_path = dir.path().join("results.txt");

    let mut config = ServerConfig::default();
    config.performance.results_path = results_path.clone();
    let router = create_router(test_state(config));

    let response = send_json(
        router,
        Method::POST,
        "/performance_test",
        Some(json!({"produto": "Produto_1", "mes": 1, "n_requests": 1})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    let avg_without = body["average_time_without_shap"].as_f64().unwrap();
    let avg_with = body["average_time_with_shap"].as_f64().unwrap();
    let gain = body["time_gain_with_shap"].as_f64().unwrap();
    assert!((gain - (avg_without - avg_with)).abs() < 1e-12);

    let report = std::fs::read_to_string(&results_path).unwrap();
    assert_eq!(report.lines().count(), 12);
    assert!(report.contains("Average time without SHAP:"));
}

#[tokio::test]
async fn performance_test_defaults_the_request_count() {
    let dir = tempfile::tempdir().unwrap();

    let mut config = ServerConfig::default();
    config.performance.results_path = dir.path().join("results.txt");
    config.performance.default_requests = 2;
    let router = create_router(test_state(config));

    let response = send_json(
        router,
        Method::POST,
        "/performance_test",
        Some(json!({"produto": "Produto_1", "mes": 1})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_endpoints_respond() {
    let router = test_router();

    let response = send_json(router.clone(), Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "salient-server");

    let response = send_json(router.clone(), Method::GET, "/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["engine"]["features"], 4);

    let response = send_json(router, Method::GET, "/health/live", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
