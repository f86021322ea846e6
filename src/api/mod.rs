//! Graph API Routes
//!
//! Routes:
//! - GET /api/graph       - full payload (DOT text, details, adjacency)
//! - GET /api/graph.dot   - DOT text only
//! - GET /health          - liveness
//!
//! Every request reads a fresh snapshot of the rows; nothing is cached
//! between requests.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::config::GraphConfig;
use crate::error::GraphError;
use crate::graph::load_graph;
use crate::source::{RowSource, SourceLocator};
use progress_graph_types::GraphResponse;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// ============================================================================
// State
// ============================================================================

#[derive(Clone)]
pub struct GraphState {
    config: Arc<GraphConfig>,
    locator: SourceLocator,
    bound: Option<Arc<dyn RowSource>>,
}

impl GraphState {
    pub fn new(config: GraphConfig) -> Self {
        let locator = SourceLocator::new(config.workbook_root.clone());
        Self {
            config: Arc::new(config),
            locator,
            bound: None,
        }
    }

    /// Serve from `source` regardless of the configured data-source id.
    pub fn with_bound_source(mut self, source: Arc<dyn RowSource>) -> Self {
        self.bound = Some(source);
        self
    }

    fn load(&self) -> Result<GraphResponse, GraphError> {
        let source = self.locator.resolve(self.bound.clone(), self.config.as_ref())?;
        load_graph(source.as_ref(), self.config.as_ref())
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_graph_router(state: GraphState) -> Router {
    Router::new()
        .route("/api/graph", get(get_graph))
        .route("/api/graph.dot", get(get_graph_dot))
        .route("/health", get(health))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: GraphError) -> ApiError {
    if err.is_configuration() {
        tracing::error!(code = err.code(), "Graph source misconfigured: {}", err);
    } else {
        tracing::warn!(code = err.code(), "Failed to load graph: {}", err);
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: err.to_string(),
            code: err.code().to_string(),
        }),
    )
}

async fn load_snapshot(state: GraphState) -> Result<GraphResponse, ApiError> {
    // Sheet reads block; keep them off the async workers.
    tokio::task::spawn_blocking(move || state.load())
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Graph task failed: {}", e),
                    code: "TASK".to_string(),
                }),
            )
        })?
        .map_err(error_response)
}

/// GET /api/graph - full payload for the front end
async fn get_graph(State(state): State<GraphState>) -> Result<Json<GraphResponse>, ApiError> {
    let response = load_snapshot(state).await?;
    tracing::info!(
        nodes = response.node_details.len(),
        edges = response.edge_details.len(),
        "Served graph"
    );
    Ok(Json(response))
}

/// GET /api/graph.dot - DOT text only
async fn get_graph_dot(State(state): State<GraphState>) -> Result<Response, ApiError> {
    let response = load_snapshot(state).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/vnd.graphviz; charset=utf-8")],
        response.graph_text,
    )
        .into_response())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryRowSource;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn demo_state() -> GraphState {
        let source = MemoryRowSource::new(
            vec![
                vec!["A".into(), "Start".into(), "".into(), "ToDo".into()],
                vec!["B".into(), "End".into(), "".into(), "Done".into()],
            ],
            vec![vec!["A".into(), "B".into()]],
        );
        GraphState::new(GraphConfig::default()).with_bound_source(Arc::new(source))
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_graph_endpoint() {
        let (status, body) = get(create_graph_router(demo_state()), "/api/graph").await;
        assert_eq!(status, StatusCode::OK);

        let payload: GraphResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(payload.node_details.len(), 2);
        assert_eq!(payload.edge_details[0].id, "A_B");
        assert_eq!(payload.adjacency.get("B").unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_dot_endpoint() {
        let (status, body) = get(create_graph_router(demo_state()), "/api/graph.dot").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("digraph G {"));
        assert!(body.contains("\"A\" -> \"B\" [id=\"A_B\"];"));
    }

    #[tokio::test]
    async fn test_unconfigured_source_is_500() {
        let router = create_graph_router(GraphState::new(GraphConfig::default()));
        let (status, body) = get(router, "/api/graph").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("NO_ROW_SOURCE"));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(create_graph_router(demo_state()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);
    }
}
