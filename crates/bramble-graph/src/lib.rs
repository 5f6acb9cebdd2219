//! Bramble Graph - structural metrics for edge-list graphs
//!
//! This crate builds an adjacency-list graph from a plain-text edge list and
//! computes degree statistics, average shortest-path length, and degree
//! assortativity.
//!
//! # Architecture
//!
//! - [`Graph`] holds the vertices and adjacency lists and nothing else
//! - [`GraphLoader`] streams edge records in, remapping arbitrary integer
//!   ids to dense indexes through a [`VertexLabelIndex`]
//! - [`dijkstra`] runs single-source shortest paths on a binary-heap
//!   [`PriorityQueue`] and returns a self-contained [`ShortestPaths`]
//! - the [`metrics`] functions aggregate over every vertex
//!
//! # Example
//!
//! ```
//! use bramble_graph::{average_shortest_path_length, load_from_reader, Graph};
//!
//! let mut graph = Graph::create(100, false, false)?;
//! let report = load_from_reader(&mut graph, "1 2\n2 3\n".as_bytes())?;
//!
//! assert_eq!(report.edges_inserted, 2);
//! assert_eq!(graph.edge_count(), 2);
//!
//! let apl = average_shortest_path_length(&graph)?;
//! assert!((apl - 4.0 / 3.0).abs() < 1e-9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod graph;
mod label_index;
mod loader;
pub mod metrics;
mod queue;
mod shortest_path;

pub use config::{GraphConfig, DEFAULT_INITIAL_CAPACITY};
pub use error::{ConfigError, GraphError, LoadError, Result};
pub use graph::{AdjacencyEntry, Graph, GrowthPolicy, VertexId};
pub use label_index::VertexLabelIndex;
pub use loader::{load_from_file, load_from_reader, EdgeRecord, GraphLoader, LoadReport, Record};
pub use metrics::{
    average_shortest_path_length, degree_assortativity, path_length_stats, summarize,
    GraphSummary, PathLengthStats,
};
pub use queue::{PriorityQueue, QueueItem};
pub use shortest_path::{dijkstra, ShortestPaths};
