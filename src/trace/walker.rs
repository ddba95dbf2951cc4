//! Bounded-depth chain traversal

use super::types::{Direction, TraceChainEntry};
use crate::graph::{EntityId, GraphSnapshot};
use std::collections::HashSet;

/// Query for walking relation chains from a start entity in one direction.
///
/// The walk is depth-first over an explicit work list with a per-invocation
/// visited set, so it terminates on cyclic graphs and no entity appears
/// twice in the output. Source data does contain cycles, so this is a
/// correctness requirement rather than an optimization.
#[derive(Debug, Clone)]
pub struct ChainWalk {
    /// Starting entity id
    pub origin: EntityId,
    /// Direction to walk relations
    pub direction: Direction,
    /// Maximum level to emit; levels start at 1 for direct neighbors.
    /// The caller validates the range; `max_depth < 1` yields an empty walk.
    pub max_depth: u32,
}

impl ChainWalk {
    /// Create a new walk from a starting entity
    pub fn from(origin: impl Into<EntityId>) -> Self {
        Self {
            origin: origin.into(),
            direction: Direction::Downstream,
            max_depth: 3,
        }
    }

    /// Set the traversal direction
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the maximum traversal depth
    pub fn depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Execute the walk against a graph snapshot.
    ///
    /// Entries come back sorted ascending by level (stable, preserving
    /// discovery order within a level). A relation whose far endpoint does
    /// not resolve is skipped: imported data is often incomplete, so a
    /// dangling relation is a dead end, not an error.
    pub fn execute(&self, graph: &GraphSnapshot) -> Vec<TraceChainEntry> {
        let mut chain: Vec<TraceChainEntry> = Vec::new();
        let mut visited: HashSet<EntityId> = HashSet::new();
        visited.insert(self.origin.clone());

        // Work items carry the level their neighbors will be emitted at.
        let mut stack: Vec<(EntityId, u32)> = vec![(self.origin.clone(), 1)];

        while let Some((current, level)) = stack.pop() {
            if level > self.max_depth {
                continue;
            }

            let relations = match self.direction {
                Direction::Downstream => graph.relations_from(&current),
                Direction::Upstream => graph.relations_to(&current),
            };

            let mut discovered: Vec<(EntityId, u32)> = Vec::new();
            for relation in relations {
                let next_id = match self.direction {
                    Direction::Downstream => &relation.target,
                    Direction::Upstream => &relation.source,
                };

                let Some(next) = graph.get_entity(next_id) else {
                    continue;
                };
                if visited.contains(next_id) {
                    continue;
                }
                visited.insert(next_id.clone());

                chain.push(TraceChainEntry {
                    level,
                    entity_type: next.entity_type.clone(),
                    entity_id: next.id.clone(),
                    relation: relation.relation_type.clone(),
                    trace_confidence: relation.confidence(),
                    data: next.data.clone(),
                });
                discovered.push((next_id.clone(), level + 1));
            }

            // LIFO work list: push in reverse so the first relation found
            // is also the first branch expanded.
            for item in discovered.into_iter().rev() {
                stack.push(item);
            }
        }

        chain.sort_by_key(|entry| entry.level);
        chain
    }
}
