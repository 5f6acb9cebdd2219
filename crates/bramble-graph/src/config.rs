//! Graph configuration.
//!
//! Read from a JSON file so a dataset's shape (directed, weighted) can be
//! checked in next to it instead of repeated on every command line.

use crate::error::ConfigError;
use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Initial vertex capacity used when nothing else is configured.
pub const DEFAULT_INITIAL_CAPACITY: usize = 100;

/// Shape and sizing of a graph to be built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Store edges one-way only.
    pub directed: bool,

    /// Honor the optional third weight column.
    pub weighted: bool,

    /// Vertex slots to reserve up front. The graph grows past this as needed.
    pub initial_capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            directed: false,
            weighted: false,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl GraphConfig {
    /// Parses a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Creates an empty graph with this configuration.
    pub fn build_graph(&self) -> crate::Result<Graph> {
        Graph::create(self.initial_capacity, self.directed, self.weighted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GraphConfig::default();
        assert!(!config.directed);
        assert!(!config.weighted);
        assert_eq!(config.initial_capacity, DEFAULT_INITIAL_CAPACITY);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GraphConfig::from_json(r#"{ "weighted": true }"#).unwrap();
        assert!(config.weighted);
        assert!(!config.directed);
        assert_eq!(config.initial_capacity, DEFAULT_INITIAL_CAPACITY);
    }

    #[test]
    fn test_invalid_json() {
        let err = GraphConfig::from_json("{ directed: yes }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file_builds_graph() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "directed": true, "weighted": false, "initial_capacity": 8 }}"#
        )
        .unwrap();

        let config = GraphConfig::from_file(file.path()).unwrap();
        let graph = config.build_graph().unwrap();
        assert!(graph.is_directed());
        assert!(graph.capacity() >= 8);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GraphConfig::from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
