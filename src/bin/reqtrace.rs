//! Reqtrace CLI — traceability engine with a REST server.
//!
//! Usage:
//!   reqtrace serve [--data path] [--addr ip:port]
//!   reqtrace graph <subcommand> [--data path]

use clap::{Parser, Subcommand};
use reqtrace::server::{serve, AppState};
use reqtrace::{GraphEngine, GraphId, JsonStore, TraceOrchestrator};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "reqtrace",
    version,
    about = "Requirement traceability and impact analysis engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server
    Serve {
        /// Data directory with schema.json and graphs/
        #[arg(long)]
        data: Option<PathBuf>,
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:3001")]
        addr: SocketAddr,
    },
    /// Inspect loaded graphs
    Graph {
        #[command(subcommand)]
        action: GraphAction,
        /// Data directory with schema.json and graphs/
        #[arg(long, global = true)]
        data: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum GraphAction {
    /// List all graphs
    List,
    /// Show entity and relation counts by type for a graph
    Stats {
        /// Graph id
        id: String,
    },
}

/// Get the default data directory (~/.local/share/reqtrace)
fn default_data_dir() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join("reqtrace")
}

fn load_engine(data: Option<PathBuf>) -> Result<(GraphEngine, JsonStore), String> {
    let root = data.unwrap_or_else(default_data_dir);
    let store = JsonStore::open(&root);
    let engine = GraphEngine::new();
    store
        .load_graphs(&engine)
        .map_err(|e| format!("Failed to load graphs from {}: {}", root.display(), e))?;
    Ok((engine, store))
}

fn cmd_graph_list(engine: &GraphEngine) -> i32 {
    let mut ids = engine.list_graphs();
    if ids.is_empty() {
        println!("No graphs loaded.");
        return 0;
    }
    ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    println!("{:<24}  {:<28}  {:>8}  {:>8}", "ID", "NAME", "NODES", "EDGES");
    println!("{}", "-".repeat(74));
    for id in ids {
        if let Some(graph) = engine.get_graph(&id) {
            let marker = if engine.default_graph_id().as_ref() == Some(&id) {
                "*"
            } else {
                ""
            };
            println!(
                "{:<24}  {:<28}  {:>8}  {:>8}{}",
                id,
                graph.name,
                graph.entity_count(),
                graph.relation_count(),
                marker
            );
        }
    }
    0
}

fn cmd_graph_stats(engine: &GraphEngine, id: &str) -> i32 {
    let Some(graph) = engine.get_graph(&GraphId::from(id)) else {
        eprintln!("Error: graph '{}' not found", id);
        return 1;
    };

    let mut entity_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entity in graph.entities() {
        *entity_counts.entry(entity.entity_type.as_str()).or_default() += 1;
    }
    let mut relation_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for relation in graph.relations() {
        *relation_counts.entry(relation.relation_type.as_str()).or_default() += 1;
    }

    println!("Graph: {} ({})", graph.name, graph.id);
    println!("\nEntities ({} total):", graph.entity_count());
    for (entity_type, count) in entity_counts {
        println!("  {:<28} {:>6}", entity_type, count);
    }
    println!("\nRelations ({} total):", graph.relation_count());
    for (relation_type, count) in relation_counts {
        println!("  {:<28} {:>6}", relation_type, count);
    }
    0
}

fn cmd_serve(data: Option<PathBuf>, addr: SocketAddr) -> i32 {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let root = data.unwrap_or_else(default_data_dir);
    let store = JsonStore::open(&root);
    let engine = Arc::new(GraphEngine::new());

    let schema = match store.load_schema() {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("Error: failed to load schema: {}", e);
            return 1;
        }
    };
    if let Err(e) = store.load_graphs(&engine) {
        eprintln!("Error: failed to load graphs: {}", e);
        return 1;
    }

    let orchestrator = TraceOrchestrator::new(Arc::new(schema));
    let state = Arc::new(AppState::new(engine, orchestrator));

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            return 1;
        }
    };

    match rt.block_on(serve(addr, state)) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: server failed: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Serve { data, addr } => cmd_serve(data, addr),
        Commands::Graph { action, data } => match load_engine(data) {
            Ok((engine, _store)) => match action {
                GraphAction::List => cmd_graph_list(&engine),
                GraphAction::Stats { id } => cmd_graph_stats(&engine, &id),
            },
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
    };
    std::process::exit(code);
}
