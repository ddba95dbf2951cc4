//! Relation representation: typed, directed, confidence-weighted links

use super::entity::{EntityId, Properties};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Unique identifier for a relation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationId(String);

impl RelationId {
    /// Create a RelationId from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RelationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RelationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Confidence assumed for relations that carry no explicit score.
pub const DEFAULT_CONFIDENCE: f64 = 1.0;

/// A directed, typed relation (edge) between two entities.
///
/// Direction matters: upstream traversal walks against relation direction
/// (incoming), downstream walks with it (outgoing).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    /// Unique identifier
    pub id: RelationId,
    /// Source entity id
    pub source: EntityId,
    /// Target entity id
    pub target: EntityId,
    /// Relation type code (a key into the schema registry)
    #[serde(rename = "type")]
    pub relation_type: String,
    /// Open attributes; conventionally includes `confidence` in [0, 1]
    #[serde(default)]
    pub data: Properties,
}

impl Relation {
    /// Create a new relation
    pub fn new(
        id: impl Into<RelationId>,
        source: impl Into<EntityId>,
        target: impl Into<EntityId>,
        relation_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            relation_type: relation_type.into(),
            data: Properties::new(),
        }
    }

    /// Set the confidence score
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.data
            .insert("confidence".to_string(), Value::from(confidence));
        self
    }

    /// Add a data attribute to the relation
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Confidence recorded on the relation, `DEFAULT_CONFIDENCE` when the
    /// attribute is absent or not numeric.
    pub fn confidence(&self) -> f64 {
        self.data
            .get("confidence")
            .and_then(Value::as_f64)
            .unwrap_or(DEFAULT_CONFIDENCE)
    }
}
