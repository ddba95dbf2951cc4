//! JSON data-directory loader

use super::{StorageError, StorageResult};
use crate::graph::{Entity, GraphEngine, GraphId, GraphSnapshot, Relation};
use crate::schema::SchemaRegistry;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Graph file name loaded as the default graph when present at the root
const LEGACY_DATA_FILE: &str = "sample-data.json";
/// Subdirectory scanned for one file per graph
const GRAPHS_DIR: &str = "graphs";
/// Schema registry file name
const SCHEMA_FILE: &str = "schema.json";

/// On-disk graph payload: either wrapped in a `data` envelope (multi-graph
/// exports) or bare `nodes`/`edges` at the top level (legacy single-graph
/// files).
#[derive(Debug, Deserialize)]
struct GraphFile {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    #[serde(rename = "schemaId")]
    schema_id: Option<String>,
    data: Option<GraphData>,
    #[serde(default)]
    nodes: Vec<Entity>,
    #[serde(default)]
    edges: Vec<Relation>,
}

#[derive(Debug, Deserialize)]
struct GraphData {
    #[serde(default)]
    nodes: Vec<Entity>,
    #[serde(default)]
    edges: Vec<Relation>,
}

impl GraphFile {
    fn into_snapshot(self, fallback_id: &str) -> GraphSnapshot {
        let id = GraphId::from_string(self.id.unwrap_or_else(|| fallback_id.to_string()));
        let name = self.name.unwrap_or_else(|| id.as_str().to_string());
        let mut graph = GraphSnapshot::with_id(id, name);
        graph.description = self.description;
        graph.schema_id = self.schema_id;

        let (nodes, edges) = match self.data {
            Some(data) => (data.nodes, data.edges),
            None => (self.nodes, self.edges),
        };
        for entity in nodes {
            graph.add_entity(entity);
        }
        for relation in edges {
            graph.add_relation(relation);
        }
        graph
    }
}

/// Read-only store over a data directory.
///
/// Layout: `<root>/schema.json`, `<root>/graphs/*.json`, and optionally a
/// legacy `<root>/sample-data.json` loaded as the graph `default`.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Open a store over the given directory. No files are touched until
    /// a load is requested.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this store reads from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the schema registry. A missing schema file is not an error:
    /// label lookups just miss.
    pub fn load_schema(&self) -> StorageResult<SchemaRegistry> {
        let path = self.root.join(SCHEMA_FILE);
        if !path.exists() {
            warn!(path = %path.display(), "no schema file, using empty registry");
            return Ok(SchemaRegistry::empty());
        }
        let raw = fs::read_to_string(&path)?;
        let schema: SchemaRegistry = serde_json::from_str(&raw)?;
        info!(
            entity_types = schema.entity_types.len(),
            relation_types = schema.relation_types.len(),
            "schema loaded"
        );
        Ok(schema)
    }

    /// Load every graph into the engine and pick a default graph.
    ///
    /// Files are visited in name order so the default is deterministic:
    /// the legacy file wins, otherwise the first graph file. Returns the
    /// number of graphs loaded.
    pub fn load_graphs(&self, engine: &GraphEngine) -> StorageResult<usize> {
        let mut loaded: Vec<GraphId> = Vec::new();

        let legacy = self.root.join(LEGACY_DATA_FILE);
        if legacy.exists() {
            let graph = self.load_graph_file(&legacy, "default")?;
            info!(
                graph = %graph.id,
                nodes = graph.entity_count(),
                edges = graph.relation_count(),
                "graph loaded"
            );
            loaded.push(engine.upsert_graph(graph));
        }

        let graphs_dir = self.root.join(GRAPHS_DIR);
        if graphs_dir.is_dir() {
            let mut paths: Vec<PathBuf> = fs::read_dir(&graphs_dir)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
                .filter(|p| p.file_name().is_some_and(|n| n != "index.json"))
                .collect();
            paths.sort();

            for path in paths {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| GraphId::generate().as_str().to_string());
                let graph = self.load_graph_file(&path, &stem)?;
                info!(
                    graph = %graph.id,
                    nodes = graph.entity_count(),
                    edges = graph.relation_count(),
                    "graph loaded"
                );
                loaded.push(engine.upsert_graph(graph));
            }
        }

        if let Some(first) = loaded.first() {
            // Cannot fail: the graph was inserted just above.
            if let Err(err) = engine.set_default_graph(first) {
                warn!(graph = %first, %err, "could not set default graph");
            }
        } else {
            warn!(root = %self.root.display(), "no graph files found");
        }

        Ok(loaded.len())
    }

    fn load_graph_file(&self, path: &Path, fallback_id: &str) -> StorageResult<GraphSnapshot> {
        let raw = fs::read_to_string(path)?;
        let file: GraphFile =
            serde_json::from_str(&raw).map_err(|err| StorageError::InvalidGraphFile {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?;
        Ok(file.into_snapshot(fallback_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(path, contents).expect("write file");
    }

    #[test]
    fn loads_wrapped_graph_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            &dir.path().join("graphs/adas.json"),
            r#"{
                "id": "graph_adas01",
                "name": "ADAS追溯",
                "schemaId": "core-domain-v2",
                "data": {
                    "nodes": [
                        {"id": "REQ-1", "type": "SystemRequirement", "data": {"title": "感知"}},
                        {"id": "SWR-1", "type": "SWR", "data": {}}
                    ],
                    "edges": [
                        {"id": "e1", "source": "REQ-1", "target": "SWR-1", "type": "refines",
                         "data": {"confidence": 0.8}}
                    ]
                }
            }"#,
        );

        let engine = GraphEngine::new();
        let count = JsonStore::open(dir.path()).load_graphs(&engine).expect("load");
        assert_eq!(count, 1);

        let graph = engine.resolve(Some("graph_adas01")).expect("graph");
        assert_eq!(graph.name, "ADAS追溯");
        assert_eq!(graph.entity_count(), 2);
        assert_eq!(graph.edges[0].confidence(), 0.8);
        assert_eq!(engine.default_graph_id(), Some(GraphId::from("graph_adas01")));
    }

    #[test]
    fn loads_legacy_bare_file_as_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            &dir.path().join(LEGACY_DATA_FILE),
            r#"{
                "version": "0.1.0",
                "nodes": [{"id": "A", "type": "SWR"}],
                "edges": []
            }"#,
        );

        let engine = GraphEngine::new();
        JsonStore::open(dir.path()).load_graphs(&engine).expect("load");
        let graph = engine.resolve(None).expect("default graph");
        assert_eq!(graph.id, GraphId::from("default"));
        assert_eq!(graph.entity_count(), 1);
    }

    #[test]
    fn file_stem_is_the_fallback_id() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            &dir.path().join("graphs/braking.json"),
            r#"{"data": {"nodes": [], "edges": []}}"#,
        );

        let engine = GraphEngine::new();
        JsonStore::open(dir.path()).load_graphs(&engine).expect("load");
        assert!(engine.has_graph(&GraphId::from("braking")));
    }

    #[test]
    fn index_file_is_not_a_graph() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(&dir.path().join("graphs/index.json"), r#"{"graphs": {}}"#);
        write(
            &dir.path().join("graphs/real.json"),
            r#"{"data": {"nodes": [], "edges": []}}"#,
        );

        let engine = GraphEngine::new();
        let count = JsonStore::open(dir.path()).load_graphs(&engine).expect("load");
        assert_eq!(count, 1);
    }

    #[test]
    fn malformed_graph_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(&dir.path().join("graphs/broken.json"), "{not json");

        let engine = GraphEngine::new();
        let err = JsonStore::open(dir.path()).load_graphs(&engine);
        assert!(matches!(err, Err(StorageError::InvalidGraphFile { .. })));
    }

    #[test]
    fn missing_schema_falls_back_to_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let schema = JsonStore::open(dir.path()).load_schema().expect("schema");
        assert!(schema.entity_types.is_empty());
    }

    #[test]
    fn schema_file_is_parsed() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            &dir.path().join(SCHEMA_FILE),
            r#"{"version": "2.0.0", "entityTypes": {"SWR": {"code": "SWR", "label": "软件需求"}}}"#,
        );
        let schema = JsonStore::open(dir.path()).load_schema().expect("schema");
        assert_eq!(schema.version, "2.0.0");
        assert_eq!(schema.entity_label("SWR"), Some("软件需求"));
    }

    #[test]
    fn empty_directory_loads_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let engine = GraphEngine::new();
        let count = JsonStore::open(dir.path()).load_graphs(&engine).expect("load");
        assert_eq!(count, 0);
        assert!(engine.default_graph_id().is_none());
    }
}
