//! Error types for graph construction, loading, and configuration.

use crate::graph::VertexId;
use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by graph mutation and metric queries.
///
/// `DuplicateEdge` and `EdgeNotFound` are ordinary outcomes rather than
/// corruption: the graph is left untouched and the caller picks the policy.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("vertex {index} is out of range (graph has {vertex_count} vertices)")]
    InvalidVertex { index: VertexId, vertex_count: usize },

    #[error("edge {from} -> {to} already exists")]
    DuplicateEdge { from: VertexId, to: VertexId },

    #[error("edge {from} -> {to} not found")]
    EdgeNotFound { from: VertexId, to: VertexId },

    #[error("invalid edge weight {weight}: weights must be finite and non-negative")]
    InvalidWeight { weight: f64 },

    #[error("self-loop on vertex {vertex} is not allowed in an undirected graph")]
    SelfLoop { vertex: VertexId },

    #[error("graph has no vertices")]
    EmptyGraph,
}

pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that abort an edge-list load.
///
/// Malformed lines never show up here; they are counted in the load report.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read error: {0}")]
    Io(#[from] io::Error),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
