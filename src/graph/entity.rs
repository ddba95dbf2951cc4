//! Entity representation in the traceability graph

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unique identifier for an entity within a graph.
///
/// Serializes as a plain string. Imported ids are semantic
/// (e.g. "REQ-BRAKE-001"), so the id is not generated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an EntityId from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Open property bag carried by entities and relations.
///
/// Imported data has no fixed schema, so attributes stay as raw JSON and
/// consumers do presence checks instead of assuming fields exist.
pub type Properties = serde_json::Map<String, Value>;

/// A typed entity (node) in the traceability graph.
///
/// Entities are created and updated by external CRUD collaborators; the
/// trace engine only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier
    pub id: EntityId,
    /// Entity type code (a key into the schema registry)
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Domain attributes (owner, status, priority, estimated_hours, ...)
    #[serde(default)]
    pub data: Properties,
}

impl Entity {
    /// Create a new entity with the given id and type
    pub fn new(id: impl Into<EntityId>, entity_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entity_type: entity_type.into(),
            data: Properties::new(),
        }
    }

    /// Add a data attribute to the entity
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Read a string attribute, if present and a string
    pub fn str_data(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}
