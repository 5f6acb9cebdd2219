//! Structural metrics over a whole graph.
//!
//! Average shortest-path length runs one Dijkstra per vertex, so it costs
//! O(V (V + E) log V) and dominates everything else in the crate.

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::shortest_path::dijkstra;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// Aggregate of all finite distances between ordered pairs of distinct vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathLengthStats {
    /// Sum of every finite pair distance.
    pub total_distance: f64,
    /// Ordered pairs (i, j), i != j, with a path from i to j.
    pub reachable_pairs: u64,
    /// `total_distance / reachable_pairs`, or 0 when nothing is connected.
    pub average: f64,
    /// Largest finite pair distance.
    pub diameter: f64,
}

/// Average shortest-path length over all reachable ordered pairs.
///
/// Returns 0.0 when no pair is connected.
pub fn average_shortest_path_length(graph: &Graph) -> Result<f64> {
    Ok(path_length_stats(graph, |_, _| {})?.average)
}

/// Runs Dijkstra from every vertex in index order and aggregates the result.
///
/// `progress` is called after each source with `(done, total)`.
pub fn path_length_stats<F>(graph: &Graph, mut progress: F) -> Result<PathLengthStats>
where
    F: FnMut(usize, usize),
{
    let n = graph.vertex_count();
    if n == 0 {
        return Err(GraphError::EmptyGraph);
    }

    let start = Instant::now();
    let mut total_distance = 0.0f64;
    let mut reachable_pairs = 0u64;
    let mut diameter = 0.0f64;

    for source in graph.vertex_indexes() {
        let paths = dijkstra(graph, source)?;
        for (target, &distance) in paths.distances().iter().enumerate() {
            if target == source || !distance.is_finite() {
                continue;
            }
            total_distance += distance;
            reachable_pairs += 1;
            diameter = diameter.max(distance);
        }
        progress(source + 1, n);
    }

    let average = if reachable_pairs == 0 {
        0.0
    } else {
        total_distance / reachable_pairs as f64
    };

    info!(
        "Average path length {:.4} over {} pairs ({} sources) in {}ms",
        average,
        reachable_pairs,
        n,
        start.elapsed().as_millis()
    );

    Ok(PathLengthStats {
        total_distance,
        reachable_pairs,
        average,
        diameter,
    })
}

/// Degree assortativity: Pearson correlation of the degrees at either end
/// of each edge.
///
/// Undirected graphs correlate the degrees of both endpoints over every
/// mirrored entry. Directed graphs correlate the source's out-degree with
/// the target's in-degree. `None` if there are no edges or either side has
/// zero variance (every endpoint has the same degree).
pub fn degree_assortativity(graph: &Graph) -> Option<f64> {
    let in_degrees = graph.in_degrees();

    let mut m = 0.0f64;
    let (mut sum_x, mut sum_y) = (0.0f64, 0.0f64);
    let (mut sum_xx, mut sum_yy, mut sum_xy) = (0.0f64, 0.0f64, 0.0f64);

    for u in graph.vertex_indexes() {
        let x = graph.degree(u).unwrap_or(0) as f64;
        for entry in graph.neighbors(u) {
            let y = if graph.is_directed() {
                in_degrees[entry.target] as f64
            } else {
                graph.degree(entry.target).unwrap_or(0) as f64
            };
            m += 1.0;
            sum_x += x;
            sum_y += y;
            sum_xx += x * x;
            sum_yy += y * y;
            sum_xy += x * y;
        }
    }

    if m == 0.0 {
        return None;
    }

    let cov = sum_xy / m - (sum_x / m) * (sum_y / m);
    let var_x = sum_xx / m - (sum_x / m).powi(2);
    let var_y = sum_yy / m - (sum_y / m).powi(2);
    let denom = (var_x * var_y).sqrt();

    if denom <= f64::EPSILON {
        return None;
    }
    Some(cov / denom)
}

/// Report of every metric, ready to print or serialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSummary {
    pub vertex_count: usize,
    pub edge_count: u64,
    pub directed: bool,
    pub weighted: bool,
    pub average_degree: Option<f64>,
    pub max_degree: Option<usize>,
    /// Label of the first vertex with the maximum degree.
    pub max_degree_vertex: Option<String>,
    pub assortativity: Option<f64>,
    /// Absent when path metrics were skipped or the graph is empty.
    pub paths: Option<PathLengthStats>,
}

/// Computes a summary. Path metrics are the expensive part and can be skipped.
pub fn summarize<F>(graph: &Graph, include_paths: bool, progress: F) -> Result<GraphSummary>
where
    F: FnMut(usize, usize),
{
    let max = graph.max_degree();
    let paths = if include_paths && !graph.is_empty() {
        Some(path_length_stats(graph, progress)?)
    } else {
        None
    };

    Ok(GraphSummary {
        vertex_count: graph.vertex_count(),
        edge_count: graph.edge_count(),
        directed: graph.is_directed(),
        weighted: graph.is_weighted(),
        average_degree: graph.average_degree(),
        max_degree: max.map(|(degree, _)| degree),
        max_degree_vertex: max.and_then(|(_, v)| graph.label(v)).map(str::to_string),
        assortativity: degree_assortativity(graph),
        paths,
    })
}
