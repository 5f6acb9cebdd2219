//! Edge-list loader.
//!
//! Reads whitespace-separated `<u> <v> [<weight>]` records, one per line,
//! and builds the graph as it goes. Vertex ids in the file are arbitrary
//! integers; they become vertex labels and are remapped to dense indexes
//! through a [`VertexLabelIndex`].
//!
//! Blank lines and comments (`#` or `%`) are ignored. Lines that do not
//! parse are counted and skipped. Only a failing reader aborts the load.

use crate::error::{GraphError, LoadError};
use crate::graph::Graph;
use crate::label_index::VertexLabelIndex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// One parsed edge record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRecord {
    pub source: i64,
    pub target: i64,
    pub weight: Option<f64>,
}

/// Classification of a single input line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Record {
    Blank,
    Comment,
    Edge(EdgeRecord),
    Malformed,
}

impl Record {
    /// Parses one line.
    ///
    /// The weight column is only read when `weighted` is set; a weighted
    /// line whose third column is not a number is malformed. Columns past
    /// the third are ignored.
    pub fn parse(line: &str, weighted: bool) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Record::Blank;
        }
        if line.starts_with('#') || line.starts_with('%') {
            return Record::Comment;
        }

        let mut fields = line.split_whitespace();
        let (Some(source), Some(target)) = (fields.next(), fields.next()) else {
            return Record::Malformed;
        };
        let (Ok(source), Ok(target)) = (source.parse::<i64>(), target.parse::<i64>()) else {
            return Record::Malformed;
        };

        let weight = match (weighted, fields.next()) {
            (true, Some(raw)) => match raw.parse::<f64>() {
                Ok(weight) => Some(weight),
                Err(_) => return Record::Malformed,
            },
            _ => None,
        };

        Record::Edge(EdgeRecord {
            source,
            target,
            weight,
        })
    }
}

/// Counters describing one load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Lines read, including blanks and comments.
    pub lines: u64,
    pub edges_inserted: u64,
    /// Records naming an edge that was already present.
    pub duplicate_edges: u64,
    /// Records the graph refused (self-loops, bad weights).
    pub rejected_edges: u64,
    pub malformed_lines: u64,
    pub comment_lines: u64,
    pub vertices_created: u64,
    pub duration_ms: u64,
}

/// Streams edge records into a graph.
///
/// The loader can be reused across several inputs; labels resolve to the
/// same vertices in every one of them.
pub struct GraphLoader<'g> {
    graph: &'g mut Graph,
    index: VertexLabelIndex,
}

impl<'g> GraphLoader<'g> {
    /// Creates a loader for `graph`, picking up any vertices it already has.
    pub fn new(graph: &'g mut Graph) -> Self {
        let index = VertexLabelIndex::from_graph(graph);
        Self { graph, index }
    }

    /// Loads every record from `reader`.
    pub fn load_from_reader<R: BufRead>(&mut self, reader: R) -> Result<LoadReport, LoadError> {
        let start = Instant::now();
        let weighted = self.graph.is_weighted();
        let mut report = LoadReport::default();

        for (line_no, raw) in reader.split(b'\n').enumerate() {
            let raw = raw?;
            report.lines += 1;

            let record = match std::str::from_utf8(&raw) {
                Ok(line) => Record::parse(line, weighted),
                Err(_) => Record::Malformed,
            };

            match record {
                Record::Blank => {}
                Record::Comment => report.comment_lines += 1,
                Record::Malformed => {
                    debug!("Skipping malformed line {}", line_no + 1);
                    report.malformed_lines += 1;
                }
                Record::Edge(edge) => self.apply(edge, line_no + 1, &mut report)?,
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;

        if report.malformed_lines > 0 {
            warn!("Skipped {} malformed lines", report.malformed_lines);
        }
        info!(
            "Loaded {} edges and {} new vertices from {} lines in {}ms",
            report.edges_inserted, report.vertices_created, report.lines, report.duration_ms
        );

        Ok(report)
    }

    /// Opens `path` and loads every record from it.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Reading edge list from {}", path.display());
        self.load_from_reader(BufReader::new(file))
    }

    /// The label index built so far.
    pub fn index(&self) -> &VertexLabelIndex {
        &self.index
    }

    /// Finishes loading and hands back the label index.
    pub fn into_index(self) -> VertexLabelIndex {
        self.index
    }

    fn apply(
        &mut self,
        edge: EdgeRecord,
        line_no: usize,
        report: &mut LoadReport,
    ) -> Result<(), LoadError> {
        let (u, created_u) = self
            .index
            .resolve_or_insert(self.graph, &edge.source.to_string())?;
        let (v, created_v) = self
            .index
            .resolve_or_insert(self.graph, &edge.target.to_string())?;
        report.vertices_created += u64::from(created_u) + u64::from(created_v);

        match self.graph.insert_edge(u, v, edge.weight.unwrap_or(1.0)) {
            Ok(()) => report.edges_inserted += 1,
            Err(GraphError::DuplicateEdge { .. }) => {
                debug!(
                    "Line {}: duplicate edge {} {}",
                    line_no, edge.source, edge.target
                );
                report.duplicate_edges += 1;
            }
            Err(e @ (GraphError::SelfLoop { .. } | GraphError::InvalidWeight { .. })) => {
                debug!("Line {}: rejected edge: {}", line_no, e);
                report.rejected_edges += 1;
            }
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }
}

/// Loads an edge list from `reader` into `graph`.
pub fn load_from_reader<R: BufRead>(
    graph: &mut Graph,
    reader: R,
) -> Result<LoadReport, LoadError> {
    GraphLoader::new(graph).load_from_reader(reader)
}

/// Loads an edge-list file into `graph`.
pub fn load_from_file<P: AsRef<Path>>(
    graph: &mut Graph,
    path: P,
) -> Result<LoadReport, LoadError> {
    GraphLoader::new(graph).load_from_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn load(input: &str) -> (Graph, LoadReport, VertexLabelIndex) {
        let mut graph = Graph::create(4, false, false).unwrap();
        let mut loader = GraphLoader::new(&mut graph);
        let report = loader.load_from_reader(Cursor::new(input)).unwrap();
        let index = loader.into_index();
        (graph, report, index)
    }

    #[test]
    fn test_parse_record() {
        assert_eq!(Record::parse("", false), Record::Blank);
        assert_eq!(Record::parse("   \t", false), Record::Blank);
        assert_eq!(Record::parse("# header", false), Record::Comment);
        assert_eq!(Record::parse("% konect", false), Record::Comment);
        assert_eq!(Record::parse("foo bar", false), Record::Malformed);
        assert_eq!(Record::parse("1", false), Record::Malformed);
        assert_eq!(Record::parse("1 x", false), Record::Malformed);
        assert_eq!(
            Record::parse("1 2", false),
            Record::Edge(EdgeRecord {
                source: 1,
                target: 2,
                weight: None
            })
        );
    }

    #[test]
    fn test_parse_weight_column() {
        assert_eq!(
            Record::parse("1 2 0.5", true),
            Record::Edge(EdgeRecord {
                source: 1,
                target: 2,
                weight: Some(0.5)
            })
        );
        assert_eq!(Record::parse("1 2 heavy", true), Record::Malformed);
        // Unweighted graphs never look at the third column.
        assert!(matches!(Record::parse("1 2 heavy", false), Record::Edge(_)));
        // Missing weight falls back to the default.
        assert!(matches!(
            Record::parse("1 2", true),
            Record::Edge(EdgeRecord { weight: None, .. })
        ));
    }

    #[test]
    fn test_load_two_lines() {
        let (graph, report, index) = load("1 2\n2 3\n");

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(report.edges_inserted, 2);
        assert_eq!(report.vertices_created, 3);

        let two = index.resolve("2").unwrap();
        let one = index.resolve("1").unwrap();
        assert_eq!(graph.degree(two), Some(2));
        assert_eq!(graph.degree(one), Some(1));
        assert_eq!(graph.label(two), Some("2"));
    }

    #[test]
    fn test_malformed_line_skipped() {
        let (graph, report, _) = load("1 2\nfoo bar\n2 3\n");
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(report.malformed_lines, 1);
        assert_eq!(report.lines, 3);
    }

    #[test]
    fn test_comments_blank_and_duplicates() {
        let input = "% bip unweighted\n# comment\n\n10 20\n20 10\n10 20\n10 10\n";
        let (graph, report, _) = load(input);

        assert_eq!(report.comment_lines, 2);
        assert_eq!(report.edges_inserted, 1);
        assert_eq!(report.duplicate_edges, 2);
        assert_eq!(report.rejected_edges, 1);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn test_labels_are_canonical_integers() {
        let (graph, _, index) = load("007 +8\n");
        assert_eq!(graph.vertex_count(), 2);
        assert!(index.resolve("7").is_some());
        assert!(index.resolve("8").is_some());
        assert!(index.resolve("007").is_none());
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let mut graph = Graph::create(4, false, false).unwrap();
        let bytes: &[u8] = b"1 2\n\xff\xfe 3\n2 3\n";
        let report = load_from_reader(&mut graph, bytes).unwrap();
        assert_eq!(report.malformed_lines, 1);
        assert_eq!(report.edges_inserted, 2);
    }

    #[test]
    fn test_weighted_load() {
        let mut graph = Graph::create(4, false, true).unwrap();
        let report = load_from_reader(&mut graph, Cursor::new("1 2 2.5\n2 3\n3 4 -1\n")).unwrap();

        assert_eq!(report.edges_inserted, 2);
        assert_eq!(report.rejected_edges, 1);
        let weights: Vec<f64> = graph.neighbors(1).map(|e| e.weight).collect();
        assert!(weights.contains(&2.5));
        assert!(weights.contains(&1.0));
    }

    #[test]
    fn test_loader_extends_existing_graph() {
        let mut graph = Graph::create(4, false, false).unwrap();
        graph.insert_vertex("5").unwrap();

        let report = load_from_reader(&mut graph, Cursor::new("5 6\n")).unwrap();
        assert_eq!(report.vertices_created, 1);
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.degree(0), Some(1));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1 2").unwrap();
        writeln!(file, "2 3").unwrap();
        writeln!(file, "3 1").unwrap();

        let mut graph = Graph::create(2, false, false).unwrap();
        let report = load_from_file(&mut graph, file.path()).unwrap();
        assert_eq!(report.edges_inserted, 3);
        assert_eq!(graph.vertex_count(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut graph = Graph::create(2, false, false).unwrap();
        let err = load_from_file(&mut graph, dir.path().join("missing.edges")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert!(graph.is_empty());
    }
}
