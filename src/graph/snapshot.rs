//! GraphSnapshot: one knowledge graph's entities and relations

use super::entity::{Entity, EntityId};
use super::relation::Relation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a graph
///
/// Serializes as a plain string (generated `graph_xxxxxxxx` or a semantic
/// id assigned by the importing side).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(String);

impl GraphId {
    /// Generate a new short random GraphId
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4().simple().to_string();
        Self(format!("graph_{}", &uuid[..8]))
    }

    /// Create a GraphId from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GraphId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GraphId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for GraphId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Metadata about a graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphMetadata {
    /// When the graph was created
    pub created_at: Option<DateTime<Utc>>,
    /// When the graph was last updated
    pub updated_at: Option<DateTime<Utc>>,
    /// Who created the graph
    pub created_by: Option<String>,
    /// Tags for categorization
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Filter criteria for querying relations
///
/// All criteria are optional; an empty filter matches every relation.
#[derive(Debug, Clone, Default)]
pub struct RelationFilter {
    /// Match relations originating at this entity
    pub source: Option<EntityId>,
    /// Match relations targeting this entity
    pub target: Option<EntityId>,
    /// Match relations of this type
    pub relation_type: Option<String>,
}

impl RelationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by source entity
    pub fn with_source(mut self, source: impl Into<EntityId>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Filter by target entity
    pub fn with_target(mut self, target: impl Into<EntityId>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Filter by relation type
    pub fn with_type(mut self, relation_type: impl Into<String>) -> Self {
        self.relation_type = Some(relation_type.into());
        self
    }

    /// Check if a relation matches all criteria
    pub fn matches(&self, relation: &Relation) -> bool {
        if let Some(ref source) = self.source {
            if &relation.source != source {
                return false;
            }
        }
        if let Some(ref target) = self.target {
            if &relation.target != target {
                return false;
            }
        }
        if let Some(ref relation_type) = self.relation_type {
            if &relation.relation_type != relation_type {
                return false;
            }
        }
        true
    }
}

/// One knowledge graph: entities, relations, and descriptive metadata.
///
/// The trace engine operates on an immutable snapshot per call; mutation
/// happens in external CRUD collaborators before a snapshot is taken.
/// A relation's endpoints SHOULD resolve to existing entities, but a
/// dangling relation is tolerated: traversal treats it as a dead end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Unique identifier
    pub id: GraphId,
    /// Human-readable name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Schema the graph's type codes refer to
    pub schema_id: Option<String>,
    /// Entities in this graph
    pub nodes: HashMap<EntityId, Entity>,
    /// Relations in this graph
    pub edges: Vec<Relation>,
    /// Graph metadata
    pub metadata: GraphMetadata,
}

impl GraphSnapshot {
    /// Create a new empty graph with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(GraphId::generate(), name)
    }

    /// Create a new empty graph with a specific id and name
    pub fn with_id(id: GraphId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            schema_id: None,
            nodes: HashMap::new(),
            edges: Vec::new(),
            metadata: GraphMetadata {
                created_at: Some(Utc::now()),
                ..Default::default()
            },
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an entity, replacing any entity with the same id
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = entity.id.clone();
        self.nodes.insert(id.clone(), entity);
        self.touch();
        id
    }

    /// Add a relation
    pub fn add_relation(&mut self, relation: Relation) {
        self.edges.push(relation);
        self.touch();
    }

    /// Get an entity by id
    pub fn get_entity(&self, id: &EntityId) -> Option<&Entity> {
        self.nodes.get(id)
    }

    /// Get all entities
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.nodes.values()
    }

    /// Get all relations
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.edges.iter()
    }

    /// Relations matching the filter, in insertion order
    pub fn relations_where(&self, filter: &RelationFilter) -> Vec<&Relation> {
        self.edges.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Relations originating at the given entity
    pub fn relations_from(&self, id: &EntityId) -> Vec<&Relation> {
        self.edges.iter().filter(|r| &r.source == id).collect()
    }

    /// Relations targeting the given entity
    pub fn relations_to(&self, id: &EntityId) -> Vec<&Relation> {
        self.edges.iter().filter(|r| &r.target == id).collect()
    }

    /// Number of entities
    pub fn entity_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of relations
    pub fn relation_count(&self) -> usize {
        self.edges.len()
    }

    /// Update the last modified timestamp
    fn touch(&mut self) {
        self.metadata.updated_at = Some(Utc::now());
    }
}
