//! Trace orchestration: the public query entry point

use super::coverage::coverage;
use super::impact::ImpactClassifier;
use super::types::{
    BatchSummary, BatchTraceItem, BatchTraceReport, Direction, QueryEntity, QueryType,
    TraceResult,
};
use super::walker::ChainWalk;
use crate::graph::{EntityId, GraphSnapshot};
use crate::schema::SchemaRegistry;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Errors surfaced by trace queries
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("unsupported query type: {0}")]
    UnsupportedQueryType(String),
}

/// The public entry point for trace queries.
///
/// Collaborators arrive by injection so fixture graphs can drive isolated
/// tests; there is no process-wide graph state. Every query is a pure read
/// over the snapshot it is handed.
#[derive(Debug, Clone)]
pub struct TraceOrchestrator {
    schema: Arc<SchemaRegistry>,
    classifier: ImpactClassifier,
}

impl TraceOrchestrator {
    /// Create an orchestrator over the given schema registry
    pub fn new(schema: Arc<SchemaRegistry>) -> Self {
        Self {
            schema,
            classifier: ImpactClassifier::default(),
        }
    }

    /// Replace the impact classifier
    pub fn with_classifier(mut self, classifier: ImpactClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Run one trace query.
    ///
    /// `depth` is expected to be pre-validated to `[1, 5]` by the calling
    /// boundary; the orchestrator does not re-check it.
    pub fn trace(
        &self,
        entity_id: &str,
        query_type: &str,
        depth: u32,
        graph: &GraphSnapshot,
    ) -> Result<TraceResult, TraceError> {
        let query = QueryType::parse(query_type)
            .ok_or_else(|| TraceError::UnsupportedQueryType(query_type.to_string()))?;

        let id = EntityId::from(entity_id);
        let Some(entity) = graph.get_entity(&id) else {
            warn!(entity_id = %id, graph = %graph.id, "trace target does not resolve");
            return Err(TraceError::EntityNotFound(id));
        };

        let mut result = TraceResult {
            query_entity: QueryEntity {
                id: entity.id.clone(),
                entity_type: entity.entity_type.clone(),
                type_label: self
                    .schema
                    .entity_label(&entity.entity_type)
                    .map(str::to_string),
                data: entity.data.clone(),
            },
            query_type: query,
            depth,
            timestamp: Utc::now(),
            upstream_chain: None,
            downstream_chain: None,
            test_coverage: None,
            change_impact: None,
        };

        match query {
            QueryType::FullTrace => {
                result.upstream_chain = Some(
                    ChainWalk::from(id.clone())
                        .direction(Direction::Upstream)
                        .depth(depth)
                        .execute(graph),
                );
                result.downstream_chain = Some(
                    ChainWalk::from(id.clone())
                        .direction(Direction::Downstream)
                        .depth(depth)
                        .execute(graph),
                );
                result.test_coverage = Some(coverage(&id, graph));
            }
            QueryType::ImpactAnalysis => {
                let downstream = ChainWalk::from(id.clone())
                    .direction(Direction::Downstream)
                    .depth(depth)
                    .execute(graph);
                result.change_impact = Some(self.classifier.assess(&downstream));
                result.downstream_chain = Some(downstream);
            }
            QueryType::DownstreamTasks => {
                result.downstream_chain = Some(
                    ChainWalk::from(id.clone())
                        .direction(Direction::Downstream)
                        .depth(depth)
                        .execute(graph),
                );
            }
        }

        Ok(result)
    }

    /// Run a trace for several entities, isolating failures per entry.
    ///
    /// One unresolvable id never aborts the batch; its item carries
    /// `success: false` and the error message instead.
    pub fn trace_batch(
        &self,
        entity_ids: &[String],
        query_type: &str,
        depth: u32,
        graph: &GraphSnapshot,
    ) -> BatchTraceReport {
        let results: Vec<BatchTraceItem> = entity_ids
            .iter()
            .map(|entity_id| match self.trace(entity_id, query_type, depth, graph) {
                Ok(data) => BatchTraceItem {
                    entity_id: entity_id.clone(),
                    success: true,
                    data: Some(data),
                    error: None,
                },
                Err(err) => BatchTraceItem {
                    entity_id: entity_id.clone(),
                    success: false,
                    data: None,
                    error: Some(err.to_string()),
                },
            })
            .collect();

        let success = results.iter().filter(|r| r.success).count();
        let summary = BatchSummary {
            total: results.len(),
            success,
            failed: results.len() - success,
        };

        BatchTraceReport { results, summary }
    }
}
