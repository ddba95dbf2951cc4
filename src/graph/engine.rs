//! GraphEngine: holds the loaded graphs and hands out snapshots

use super::snapshot::{GraphId, GraphSnapshot};
use dashmap::DashMap;
use std::sync::RwLock;
use thiserror::Error;

/// Errors that can occur in engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("graph not found: {0}")]
    GraphNotFound(GraphId),

    #[error("no default graph is configured")]
    NoDefaultGraph,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// The multi-graph engine.
///
/// Holds every loaded graph and hands out cloned snapshots, so concurrent
/// trace requests never observe a graph mutated mid-traversal.
#[derive(Debug, Default)]
pub struct GraphEngine {
    /// All graphs managed by this engine
    graphs: DashMap<GraphId, GraphSnapshot>,
    /// Graph used when a request carries no graph id
    default_graph: RwLock<Option<GraphId>>,
}

impl GraphEngine {
    /// Create a new empty engine
    pub fn new() -> Self {
        Self {
            graphs: DashMap::new(),
            default_graph: RwLock::new(None),
        }
    }

    /// Create or replace a graph. Returns the graph id.
    pub fn upsert_graph(&self, graph: GraphSnapshot) -> GraphId {
        let id = graph.id.clone();
        self.graphs.insert(id.clone(), graph);
        id
    }

    /// Get a cloned snapshot of a graph by id
    pub fn get_graph(&self, id: &GraphId) -> Option<GraphSnapshot> {
        self.graphs.get(id).map(|r| r.clone())
    }

    /// Remove a graph
    pub fn remove_graph(&self, id: &GraphId) -> Option<GraphSnapshot> {
        self.graphs.remove(id).map(|(_, graph)| graph)
    }

    /// List all graph ids
    pub fn list_graphs(&self) -> Vec<GraphId> {
        self.graphs.iter().map(|r| r.key().clone()).collect()
    }

    /// Number of loaded graphs
    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    /// Check if a graph exists
    pub fn has_graph(&self, id: &GraphId) -> bool {
        self.graphs.contains_key(id)
    }

    /// Mark a loaded graph as the default for requests without a graph id
    pub fn set_default_graph(&self, id: &GraphId) -> EngineResult<()> {
        if !self.graphs.contains_key(id) {
            return Err(EngineError::GraphNotFound(id.clone()));
        }
        if let Ok(mut guard) = self.default_graph.write() {
            *guard = Some(id.clone());
        }
        Ok(())
    }

    /// The id of the default graph, if one is configured
    pub fn default_graph_id(&self) -> Option<GraphId> {
        self.default_graph.read().ok().and_then(|guard| guard.clone())
    }

    /// Resolve an optional request-level graph id to a snapshot.
    ///
    /// `None` falls back to the default graph.
    pub fn resolve(&self, graph_id: Option<&str>) -> EngineResult<GraphSnapshot> {
        match graph_id {
            Some(gid) => {
                let id = GraphId::from(gid);
                self.get_graph(&id).ok_or(EngineError::GraphNotFound(id))
            }
            None => {
                let id = self.default_graph_id().ok_or(EngineError::NoDefaultGraph)?;
                self.get_graph(&id).ok_or(EngineError::GraphNotFound(id))
            }
        }
    }
}
