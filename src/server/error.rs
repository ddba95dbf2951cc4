//! API error responses

use crate::graph::EngineError;
use crate::trace::TraceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors surfaced to HTTP clients, each carrying a stable error code.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed request field (400)
    InvalidParameter(String),
    /// Unrecognized trace query type (400)
    InvalidQueryType(String),
    /// Trace depth outside [1, 5] (422)
    InvalidTraceDepth(i64),
    /// Entity id does not resolve in the requested graph (404)
    EntityNotFound(String),
    /// Unknown graph id, or no default graph loaded (404)
    GraphNotFound(String),
    /// Anything else (500)
    Internal(String),
}

impl ApiError {
    fn status_code_and_message(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::InvalidParameter(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_PARAMETER", msg.clone())
            }
            Self::InvalidQueryType(query_type) => (
                StatusCode::BAD_REQUEST,
                "INVALID_QUERY_TYPE",
                format!(
                    "query_type must be one of: full_trace, impact_analysis, downstream_tasks (got {})",
                    query_type
                ),
            ),
            Self::InvalidTraceDepth(depth) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_TRACE_DEPTH",
                format!("depth must be within [1, 5] (got {})", depth),
            ),
            Self::EntityNotFound(id) => (
                StatusCode::NOT_FOUND,
                "ENTITY_NOT_FOUND",
                format!("entity not found: {}", id),
            ),
            Self::GraphNotFound(msg) => {
                (StatusCode::NOT_FOUND, "GRAPH_NOT_FOUND", msg.clone())
            }
            Self::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "TRACE_ERROR", msg.clone())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (_, code, message) = self.status_code_and_message();
        write!(f, "{}: {}", code, message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.status_code_and_message();
        let body = Json(json!({
            "success": false,
            "error": {
                "code": code,
                "message": message,
            }
        }));
        (status, body).into_response()
    }
}

impl From<TraceError> for ApiError {
    fn from(err: TraceError) -> Self {
        match err {
            TraceError::EntityNotFound(id) => Self::EntityNotFound(id.to_string()),
            // A bad query type is client input, so 400 rather than 500.
            TraceError::UnsupportedQueryType(query_type) => Self::InvalidQueryType(query_type),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::GraphNotFound(_) | EngineError::NoDefaultGraph => {
                Self::GraphNotFound(err.to_string())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}
