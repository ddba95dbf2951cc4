//! Trace query types and result structures

use crate::graph::{EntityId, Properties};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Direction for chain traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Traverse incoming relations, toward originating requirements
    Upstream,
    /// Traverse outgoing relations, toward derived artifacts and impacts
    Downstream,
}

/// The trace query variants understood by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    FullTrace,
    ImpactAnalysis,
    DownstreamTasks,
}

impl QueryType {
    /// Parse a wire-level query type string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "full_trace" => Some(Self::FullTrace),
            "impact_analysis" => Some(Self::ImpactAnalysis),
            "downstream_tasks" => Some(Self::DownstreamTasks),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullTrace => "full_trace",
            Self::ImpactAnalysis => "impact_analysis",
            Self::DownstreamTasks => "downstream_tasks",
        }
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entity discovered during a bounded chain traversal.
///
/// `level` starts at 1 for direct neighbors of the start entity. The
/// entity's own attributes are flattened into the serialized record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceChainEntry {
    pub level: u32,
    pub entity_type: String,
    pub entity_id: EntityId,
    /// Relation type traversed to reach this entity
    pub relation: String,
    /// Confidence carried by that relation (1.0 when unscored)
    pub trace_confidence: f64,
    #[serde(flatten)]
    pub data: Properties,
}

/// The entity a trace query was anchored at, with flattened attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryEntity {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Schema display label for the type, when the registry knows it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_label: Option<String>,
    #[serde(flatten)]
    pub data: Properties,
}

/// Result of one trace query; sections are present per query type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceResult {
    pub query_entity: QueryEntity,
    pub query_type: QueryType,
    pub depth: u32,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_chain: Option<Vec<TraceChainEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downstream_chain: Option<Vec<TraceChainEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_coverage: Option<CoverageReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_impact: Option<ImpactReport>,
}

/// One issue found by a test case, flattened for reporting.
///
/// Issue rows are emitted once per test-case association, so the same
/// issue id can appear more than once in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRef {
    pub issue_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
}

/// Pass/fail roll-up over the test cases verifying an entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverageReport {
    pub total_test_cases: usize,
    pub passed: usize,
    pub failed: usize,
    pub issues: Vec<IssueRef>,
}

/// Risk classification for a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Downstream entity ids grouped by impact bucket
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffectedEntities {
    pub swr: Vec<EntityId>,
    pub modules: Vec<EntityId>,
    pub packages: Vec<EntityId>,
}

/// Risk-scored summary of a downstream chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactReport {
    pub affected_entities: AffectedEntities,
    pub notified_owners: Vec<String>,
    pub risk_level: RiskLevel,
    pub estimated_effort: String,
    pub impact_score: usize,
    pub recommendation: String,
}

/// One step on a root-to-entity path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSegment {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub label: String,
}

/// Per-entity outcome of a batch trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchTraceItem {
    pub entity_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<TraceResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Roll-up counts for a batch trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

/// Result of a batch trace: one item per requested entity id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchTraceReport {
    pub results: Vec<BatchTraceItem>,
    pub summary: BatchSummary,
}
