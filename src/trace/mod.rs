//! Traceability and impact-analysis engine
//!
//! Pure read-side queries over a graph snapshot: bounded chain walks,
//! coverage aggregation, change-impact assessment, and root-path
//! resolution, composed by the [`TraceOrchestrator`].

pub mod coverage;
mod impact;
mod orchestrator;
mod path;
mod types;
mod walker;

pub use coverage::{coverage, FINDS, STATUS_FAILED, STATUS_PASSED, VERIFIED_BY};
pub use impact::ImpactClassifier;
pub use orchestrator::{TraceError, TraceOrchestrator};
pub use path::{RootPaths, ROOT_TYPE};
pub use types::{
    AffectedEntities, BatchSummary, BatchTraceItem, BatchTraceReport, CoverageReport, Direction,
    ImpactReport, IssueRef, PathSegment, QueryEntity, QueryType, RiskLevel, TraceChainEntry,
    TraceResult,
};
pub use walker::ChainWalk;
