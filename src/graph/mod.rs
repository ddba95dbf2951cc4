//! Core graph data structures

mod engine;
mod entity;
mod relation;
mod snapshot;

pub use engine::{EngineError, EngineResult, GraphEngine};
pub use entity::{Entity, EntityId, Properties};
pub use relation::{Relation, RelationId, DEFAULT_CONFIDENCE};
pub use snapshot::{GraphId, GraphMetadata, GraphSnapshot, RelationFilter};
