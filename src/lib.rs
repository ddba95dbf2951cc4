//! Reqtrace: requirement traceability and impact analysis engine
//!
//! Operates on typed knowledge graphs of automotive/ADAS engineering
//! artifacts: requirements, software modules, test cases, defects, and
//! release packages, linked by directed, confidence-weighted relations.
//!
//! # Core Concepts
//!
//! - **Entities**: typed nodes with open attribute bags, read-only here
//! - **Relations**: directed links; direction separates upstream sources
//!   from downstream impacts
//! - **Trace queries**: bounded chain walks, test-coverage roll-ups,
//!   risk-scored change-impact reports, and root-path resolution
//!
//! # Example
//!
//! ```
//! use reqtrace::GraphEngine;
//!
//! let engine = GraphEngine::new();
//! assert_eq!(engine.graph_count(), 0);
//! ```

mod graph;
pub mod schema;
pub mod server;
pub mod storage;
pub mod trace;

pub use graph::{
    EngineError, EngineResult, Entity, EntityId, GraphEngine, GraphId, GraphMetadata,
    GraphSnapshot, Properties, Relation, RelationFilter, RelationId, DEFAULT_CONFIDENCE,
};
pub use schema::SchemaRegistry;
pub use storage::{JsonStore, StorageError, StorageResult};
pub use trace::{
    ChainWalk, CoverageReport, Direction, ImpactClassifier, ImpactReport, PathSegment, QueryType,
    RiskLevel, RootPaths, TraceChainEntry, TraceError, TraceOrchestrator, TraceResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
