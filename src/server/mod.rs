//! REST API surface for the traceability engine
//!
//! Thin boundary over the orchestrator: request validation (including the
//! depth range the engine itself does not re-check), graph resolution, and
//! the `{success, data} / {success, error}` response envelope.

mod error;

pub use error::ApiError;

use crate::graph::GraphEngine;
use crate::trace::{coverage, QueryType, RootPaths, TraceOrchestrator};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Trace depth bounds enforced at this boundary
const MIN_DEPTH: i64 = 1;
const MAX_DEPTH: i64 = 5;

/// Shared state handed to every handler
pub struct AppState {
    pub engine: Arc<GraphEngine>,
    pub orchestrator: TraceOrchestrator,
}

impl AppState {
    pub fn new(engine: Arc<GraphEngine>, orchestrator: TraceOrchestrator) -> Self {
        Self { engine, orchestrator }
    }
}

/// Build the API router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/trace", post(handle_trace))
        .route("/api/trace/batch", post(handle_trace_batch))
        .route("/api/path/:entity_id", get(handle_path))
        .route("/api/coverage/:entity_id", get(handle_coverage))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API on the given address until the process exits
pub async fn serve(addr: std::net::SocketAddr, state: Arc<AppState>) -> std::io::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "reqtrace API listening");
    axum::serve(listener, router).await
}

#[derive(Debug, Deserialize)]
struct TraceRequest {
    entity_id: Option<String>,
    #[serde(default = "default_query_type")]
    query_type: String,
    #[serde(default = "default_depth")]
    depth: i64,
    graph_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BatchTraceRequest {
    #[serde(default)]
    entity_ids: Vec<String>,
    #[serde(default = "default_query_type")]
    query_type: String,
    #[serde(default = "default_depth")]
    depth: i64,
    graph_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphSelector {
    graph_id: Option<String>,
}

fn default_query_type() -> String {
    QueryType::FullTrace.as_str().to_string()
}

fn default_depth() -> i64 {
    3
}

/// Validate query type and depth before any traversal begins
fn validate_query(query_type: &str, depth: i64) -> Result<u32, ApiError> {
    if QueryType::parse(query_type).is_none() {
        return Err(ApiError::InvalidQueryType(query_type.to_string()));
    }
    if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
        return Err(ApiError::InvalidTraceDepth(depth));
    }
    Ok(depth as u32)
}

async fn handle_trace(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TraceRequest>,
) -> Result<Json<Value>, ApiError> {
    let entity_id = req
        .entity_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::InvalidParameter("entity_id is required".to_string()))?;
    let depth = validate_query(&req.query_type, req.depth)?;

    let graph = state.engine.resolve(req.graph_id.as_deref())?;
    let started = Instant::now();
    let result = state
        .orchestrator
        .trace(&entity_id, &req.query_type, depth, &graph)?;

    Ok(Json(json!({
        "success": true,
        "data": result,
        "performance": {
            "duration_ms": started.elapsed().as_millis() as u64,
            "query_time": Utc::now(),
        }
    })))
}

async fn handle_trace_batch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchTraceRequest>,
) -> Result<Json<Value>, ApiError> {
    if req.entity_ids.is_empty() {
        return Err(ApiError::InvalidParameter(
            "entity_ids must be a non-empty array".to_string(),
        ));
    }
    let depth = validate_query(&req.query_type, req.depth)?;

    let graph = state.engine.resolve(req.graph_id.as_deref())?;
    let report = state
        .orchestrator
        .trace_batch(&req.entity_ids, &req.query_type, depth, &graph);

    Ok(Json(json!({
        "success": true,
        "data": report.results,
        "summary": report.summary,
    })))
}

async fn handle_path(
    State(state): State<Arc<AppState>>,
    Path(entity_id): Path<String>,
    Query(selector): Query<GraphSelector>,
) -> Result<Json<Value>, ApiError> {
    let graph = state.engine.resolve(selector.graph_id.as_deref())?;
    let paths = RootPaths::for_entity(entity_id.as_str()).execute(&graph);
    let path_count = paths.len();

    Ok(Json(json!({
        "success": true,
        "data": {
            "entity_id": entity_id,
            "paths": paths,
            "path_count": path_count,
        }
    })))
}

async fn handle_coverage(
    State(state): State<Arc<AppState>>,
    Path(entity_id): Path<String>,
    Query(selector): Query<GraphSelector>,
) -> Result<Json<Value>, ApiError> {
    let graph = state.engine.resolve(selector.graph_id.as_deref())?;
    let report = coverage(&crate::graph::EntityId::from(entity_id.as_str()), &graph);

    Ok(Json(json!({
        "success": true,
        "data": {
            "entity_id": entity_id,
            "coverage": report,
        }
    })))
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "graphs": state.engine.graph_count(),
    }))
}
