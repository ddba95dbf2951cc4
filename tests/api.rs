//! REST API integration tests

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use common::adas_graph;
use reqtrace::server::{build_router, AppState};
use reqtrace::{GraphEngine, SchemaRegistry, TraceOrchestrator};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let engine = Arc::new(GraphEngine::new());
    let graph = adas_graph();
    let id = engine.upsert_graph(graph);
    engine.set_default_graph(&id).expect("default graph");

    let orchestrator = TraceOrchestrator::new(Arc::new(SchemaRegistry::empty()));
    build_router(Arc::new(AppState::new(engine, orchestrator)))
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn trace_happy_path() {
    let (status, body) = post_json(
        app(),
        "/api/trace",
        json!({"entity_id": "SYS-1", "query_type": "full_trace", "depth": 3}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["query_entity"]["id"], "SYS-1");
    assert!(body["data"]["downstream_chain"].is_array());
    assert!(body["data"]["upstream_chain"].is_array());
    assert!(body["data"]["test_coverage"].is_object());
    assert!(body["performance"]["duration_ms"].is_u64());
}

#[tokio::test]
async fn trace_defaults_query_type_and_depth() {
    let (status, body) = post_json(app(), "/api/trace", json!({"entity_id": "SYS-1"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["query_type"], "full_trace");
    assert_eq!(body["data"]["depth"], 3);
}

#[tokio::test]
async fn trace_missing_entity_id_is_400() {
    let (status, body) = post_json(app(), "/api/trace", json!({"depth": 3})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn trace_unknown_query_type_is_400() {
    let (status, body) = post_json(
        app(),
        "/api/trace",
        json!({"entity_id": "SYS-1", "query_type": "sideways_trace"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_QUERY_TYPE");
}

#[tokio::test]
async fn trace_depth_zero_is_422() {
    let (status, body) = post_json(
        app(),
        "/api/trace",
        json!({"entity_id": "SYS-1", "depth": 0}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_TRACE_DEPTH");
}

#[tokio::test]
async fn trace_depth_six_is_422() {
    let (status, body) = post_json(
        app(),
        "/api/trace",
        json!({"entity_id": "SYS-1", "depth": 6}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_TRACE_DEPTH");
}

#[tokio::test]
async fn trace_unknown_entity_is_404() {
    let (status, body) = post_json(
        app(),
        "/api/trace",
        json!({"entity_id": "GHOST", "depth": 3}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "ENTITY_NOT_FOUND");
}

#[tokio::test]
async fn trace_unknown_graph_is_404() {
    let (status, body) = post_json(
        app(),
        "/api/trace",
        json!({"entity_id": "SYS-1", "graph_id": "graph_nope"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "GRAPH_NOT_FOUND");
}

#[tokio::test]
async fn trace_explicit_graph_id_resolves() {
    let (status, body) = post_json(
        app(),
        "/api/trace",
        json!({"entity_id": "SYS-1", "graph_id": "graph_adas01"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn batch_trace_reports_per_entity_outcomes() {
    let (status, body) = post_json(
        app(),
        "/api/trace/batch",
        json!({"entity_ids": ["X", "SYS-1"], "query_type": "downstream_tasks", "depth": 2}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = body["data"].as_array().expect("results array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["entity_id"], "X");
    assert_eq!(results[0]["success"], false);
    assert_eq!(results[1]["entity_id"], "SYS-1");
    assert_eq!(results[1]["success"], true);
    assert_eq!(body["summary"]["total"], 2);
    assert_eq!(body["summary"]["success"], 1);
    assert_eq!(body["summary"]["failed"], 1);
}

#[tokio::test]
async fn batch_trace_requires_entity_ids() {
    let (status, body) = post_json(app(), "/api/trace/batch", json!({"entity_ids": []})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn batch_trace_validates_depth() {
    let (status, body) = post_json(
        app(),
        "/api/trace/batch",
        json!({"entity_ids": ["SYS-1"], "depth": 6}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_TRACE_DEPTH");
}

#[tokio::test]
async fn path_endpoint_returns_root_paths() {
    let (status, body) = get(app(), "/api/path/MOD-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["entity_id"], "MOD-1");
    assert_eq!(body["data"]["path_count"], 1);
    let path = body["data"]["paths"][0].as_array().expect("path");
    assert_eq!(path[0]["id"], "PROJ-1");
    assert_eq!(path[0]["label"], "L2+行泊一体");
}

#[tokio::test]
async fn path_endpoint_is_lenient_about_unknown_entities() {
    let (status, body) = get(app(), "/api/path/GHOST").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["path_count"], 0);
}

#[tokio::test]
async fn coverage_endpoint_rolls_up_tests() {
    let (status, body) = get(app(), "/api/coverage/SWR-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["coverage"]["total_test_cases"], 2);
    assert_eq!(body["data"]["coverage"]["passed"], 1);
    assert_eq!(body["data"]["coverage"]["failed"], 1);
}

#[tokio::test]
async fn health_reports_graph_count() {
    let (status, body) = get(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["graphs"], 1);
}
