//! Read-only JSON-file storage
//!
//! Graphs and the schema are produced by an external editing front end and
//! land on disk as JSON; this layer only loads them into the engine.

mod json;

pub use json::JsonStore;

use thiserror::Error;

/// Errors that can occur while loading data files
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid graph file {path}: {reason}")]
    InvalidGraphFile { path: String, reason: String },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
