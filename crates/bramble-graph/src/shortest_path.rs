//! Single-source shortest paths (Dijkstra).
//!
//! Each run owns its scratch state in a [`ShortestPaths`] context, so runs
//! never interfere with each other or with the graph.

use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId};
use crate::queue::{PriorityQueue, QueueItem};
use tracing::trace;

/// Distances and predecessors from one source vertex.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: VertexId,
    distance: Vec<f64>,
    predecessor: Vec<Option<VertexId>>,
    visited: Vec<bool>,
}

impl ShortestPaths {
    fn new(vertex_count: usize, source: VertexId) -> Self {
        let mut distance = vec![f64::INFINITY; vertex_count];
        distance[source] = 0.0;
        Self {
            source,
            distance,
            predecessor: vec![None; vertex_count],
            visited: vec![false; vertex_count],
        }
    }

    /// The vertex the run started from.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Shortest distance to `v`, or `+inf` if `v` is unreachable or invalid.
    pub fn distance(&self, v: VertexId) -> f64 {
        self.distance.get(v).copied().unwrap_or(f64::INFINITY)
    }

    /// Previous vertex on a shortest path to `v`. `None` for the source and
    /// for unreachable vertices.
    pub fn predecessor(&self, v: VertexId) -> Option<VertexId> {
        self.predecessor.get(v).copied().flatten()
    }

    pub fn is_reachable(&self, v: VertexId) -> bool {
        self.distance(v).is_finite()
    }

    /// All distances, indexed by vertex.
    pub fn distances(&self) -> &[f64] {
        &self.distance
    }

    /// Number of vertices reachable from the source, the source included.
    pub fn reachable_count(&self) -> usize {
        self.distance.iter().filter(|d| d.is_finite()).count()
    }

    /// Number of vertices the run settled.
    pub fn settled_count(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }

    /// Walks the predecessor chain back from `target`.
    ///
    /// Returns the vertices from source to target inclusive, or `None` if
    /// `target` is unreachable.
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        if !self.is_reachable(target) {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while let Some(prev) = self.predecessor(current) {
            path.push(prev);
            current = prev;
        }

        path.reverse();
        Some(path)
    }
}

/// Runs Dijkstra from `source` over every vertex of `graph`.
///
/// Unweighted graphs count 1.0 per hop.
pub fn dijkstra(graph: &Graph, source: VertexId) -> Result<ShortestPaths> {
    let n = graph.vertex_count();
    if source >= n {
        return Err(GraphError::InvalidVertex {
            index: source,
            vertex_count: n,
        });
    }

    let mut paths = ShortestPaths::new(n, source);
    let mut queue = PriorityQueue::with_capacity(n);
    queue.push(QueueItem::new(source, 0.0));

    while let Some(QueueItem { vertex: u, .. }) = queue.pop_min() {
        // Stale entry left behind by a later improvement.
        if paths.visited[u] {
            continue;
        }
        paths.visited[u] = true;

        let base = paths.distance[u];
        for entry in graph.neighbors(u) {
            let candidate = base + entry.weight;
            if candidate < paths.distance[entry.target] {
                paths.distance[entry.target] = candidate;
                paths.predecessor[entry.target] = Some(u);
                queue.push(QueueItem::new(entry.target, candidate));
            }
        }
    }

    trace!(
        "Dijkstra from {} settled {} of {} vertices",
        source,
        paths.settled_count(),
        n
    );

    Ok(paths)
}
