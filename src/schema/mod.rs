//! Schema registry: entity and relation type definitions
//!
//! The registry maps type codes to display labels and declared properties.
//! The trace engine consumes it read-only, for labeling and for the
//! entity-type classification used in impact analysis.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A declared property on an entity or relation type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Property value type ("string", "integer", "float", "enum", ...)
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An entity type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTypeDef {
    pub code: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub properties: HashMap<String, PropertyDef>,
}

/// A relation type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationTypeDef {
    pub code: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared source entity type, when the schema constrains it
    #[serde(
        default,
        rename = "sourceType",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_type: Option<String>,
    /// Declared target entity type, when the schema constrains it
    #[serde(
        default,
        rename = "targetType",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_type: Option<String>,
    #[serde(default)]
    pub properties: HashMap<String, PropertyDef>,
}

/// The schema registry for one domain.
///
/// Never mutated by the engine; loaded once and shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaRegistry {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, rename = "entityTypes")]
    pub entity_types: HashMap<String, EntityTypeDef>,
    #[serde(default, rename = "relationTypes")]
    pub relation_types: HashMap<String, RelationTypeDef>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl SchemaRegistry {
    /// An empty registry: every label lookup misses
    pub fn empty() -> Self {
        Self {
            version: default_version(),
            entity_types: HashMap::new(),
            relation_types: HashMap::new(),
        }
    }

    /// Display label for an entity type code
    pub fn entity_label(&self, code: &str) -> Option<&str> {
        self.entity_types.get(code).map(|t| t.label.as_str())
    }

    /// Display label for a relation type code
    pub fn relation_label(&self, code: &str) -> Option<&str> {
        self.relation_types.get(code).map(|t| t.label.as_str())
    }

    /// Check whether an entity type code is registered
    pub fn has_entity_type(&self, code: &str) -> bool {
        self.entity_types.contains_key(code)
    }

    /// Check whether a relation type code is registered
    pub fn has_relation_type(&self, code: &str) -> bool {
        self.relation_types.contains_key(code)
    }
}
