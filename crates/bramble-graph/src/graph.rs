//! Core graph data structure.
//!
//! Vertices live in a dense, growable array and are addressed by their
//! position in it. Each vertex owns its label and its adjacency list. The
//! graph is purely structural: shortest-path scratch state is kept in a
//! per-run context (see [`crate::shortest_path`]), so a `&Graph` can be
//! searched from any number of sources without mutation.

use crate::error::{GraphError, Result};
use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Dense internal index of a vertex, in `0..vertex_count()`.
pub type VertexId = usize;

/// One directed link from a vertex to a neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyEntry {
    /// The neighbor this entry points at.
    pub target: VertexId,

    /// Edge weight. Always 1.0 in an unweighted graph.
    pub weight: f64,
}

#[derive(Debug, Clone)]
struct Vertex {
    label: String,
    /// Stored in insertion order; exposed newest-first.
    adjacency: Vec<AdjacencyEntry>,
}

impl Vertex {
    fn new(label: String) -> Self {
        Self {
            label,
            adjacency: Vec::new(),
        }
    }

    fn position_of(&self, target: VertexId) -> Option<usize> {
        self.adjacency.iter().position(|entry| entry.target == target)
    }
}

/// How the vertex array grows once it is full.
///
/// The new capacity is `old + old * percent / 100`, and always at least
/// `old + 1` so an empty graph can still grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    percent: usize,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self { percent: 50 }
    }
}

impl GrowthPolicy {
    /// Creates a policy that grows by `percent` of the current capacity.
    pub fn new(percent: usize) -> Self {
        Self { percent }
    }

    /// Returns the capacity to grow to from `current`.
    pub fn next_capacity(&self, current: usize) -> usize {
        let grown = current.saturating_add(current.saturating_mul(self.percent) / 100);
        grown.max(current.saturating_add(1))
    }
}

/// An adjacency-list graph with stable, dense vertex indices.
///
/// Vertices can be added but never removed. Edges can be added and removed.
/// In an undirected graph every edge is stored as two mirrored entries that
/// are always inserted and removed together.
#[derive(Debug, Clone)]
pub struct Graph {
    vertices: Vec<Vertex>,
    directed: bool,
    weighted: bool,
    growth: GrowthPolicy,
}

impl Graph {
    /// Creates an empty graph with room for `initial_capacity` vertices.
    ///
    /// Fails only if the vertex array cannot be allocated.
    pub fn create(initial_capacity: usize, directed: bool, weighted: bool) -> Result<Self> {
        let mut vertices = Vec::new();
        vertices.try_reserve_exact(initial_capacity)?;

        Ok(Self {
            vertices,
            directed,
            weighted,
            growth: GrowthPolicy::default(),
        })
    }

    /// Replaces the growth policy used when the vertex array is full.
    pub fn with_growth_policy(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    /// Appends a vertex and returns its index.
    ///
    /// Grows the vertex array first if it is full. If growing fails the graph
    /// is left unchanged.
    pub fn insert_vertex(&mut self, label: impl Into<String>) -> Result<VertexId> {
        if self.vertices.len() == self.vertices.capacity() {
            let current = self.vertices.capacity();
            let target = self.growth.next_capacity(current);
            self.vertices.try_reserve_exact(target - self.vertices.len())?;
            debug!("Grew vertex array from {} to {}", current, target);
        }

        let index = self.vertices.len();
        self.vertices.push(Vertex::new(label.into()));
        Ok(index)
    }

    /// Inserts the edge `u -> v` (and `v -> u` when undirected).
    ///
    /// Unweighted graphs ignore `weight` and store 1.0. Either both mirrored
    /// entries are inserted or neither is.
    pub fn insert_edge(&mut self, u: VertexId, v: VertexId, weight: f64) -> Result<()> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;

        if !self.directed && u == v {
            return Err(GraphError::SelfLoop { vertex: u });
        }

        let weight = if self.weighted {
            if !weight.is_finite() || weight < 0.0 {
                return Err(GraphError::InvalidWeight { weight });
            }
            weight
        } else {
            1.0
        };

        if self.vertices[u].position_of(v).is_some() {
            return Err(GraphError::DuplicateEdge { from: u, to: v });
        }
        if !self.directed && self.vertices[v].position_of(u).is_some() {
            return Err(GraphError::DuplicateEdge { from: v, to: u });
        }

        // Reserve both slots before touching either list.
        self.vertices[u].adjacency.try_reserve(1)?;
        if !self.directed {
            self.vertices[v].adjacency.try_reserve(1)?;
        }

        self.vertices[u]
            .adjacency
            .push(AdjacencyEntry { target: v, weight });
        if !self.directed {
            self.vertices[v]
                .adjacency
                .push(AdjacencyEntry { target: u, weight });
        }

        Ok(())
    }

    /// Removes the edge `u -> v` (and its mirror when undirected).
    ///
    /// In an undirected graph both entries are located before either is
    /// removed, so a missing mirror leaves the graph untouched.
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) -> Result<()> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;

        let forward = self.vertices[u]
            .position_of(v)
            .ok_or(GraphError::EdgeNotFound { from: u, to: v })?;

        if self.directed {
            self.vertices[u].adjacency.remove(forward);
            return Ok(());
        }

        let mirror = self.vertices[v]
            .position_of(u)
            .ok_or(GraphError::EdgeNotFound { from: v, to: u })?;

        self.vertices[u].adjacency.remove(forward);
        self.vertices[v].adjacency.remove(mirror);
        Ok(())
    }

    /// Returns true if the entry `u -> v` exists.
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.vertices
            .get(u)
            .is_some_and(|vertex| vertex.position_of(v).is_some())
    }

    /// Number of adjacency entries of `v` (its out-degree when directed).
    pub fn degree(&self, v: VertexId) -> Option<usize> {
        self.vertices.get(v).map(|vertex| vertex.adjacency.len())
    }

    /// Number of entries pointing at `v`.
    ///
    /// Equal to `degree` in an undirected graph. Scans every list.
    pub fn in_degree(&self, v: VertexId) -> Option<usize> {
        if v >= self.vertices.len() {
            return None;
        }
        if !self.directed {
            return self.degree(v);
        }
        Some(
            self.vertices
                .iter()
                .flat_map(|vertex| vertex.adjacency.iter())
                .filter(|entry| entry.target == v)
                .count(),
        )
    }

    /// In-degree of every vertex, computed in a single pass.
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut counts = vec![0; self.vertices.len()];
        for entry in self.vertices.iter().flat_map(|vertex| vertex.adjacency.iter()) {
            counts[entry.target] += 1;
        }
        counts
    }

    /// Mean number of adjacency entries per vertex. `None` for an empty graph.
    pub fn average_degree(&self) -> Option<f64> {
        if self.vertices.is_empty() {
            return None;
        }
        Some(self.entry_count() as f64 / self.vertices.len() as f64)
    }

    /// Largest degree and the first vertex that has it. `None` for an empty graph.
    pub fn max_degree(&self) -> Option<(usize, VertexId)> {
        let mut best: Option<(usize, VertexId)> = None;
        for (index, vertex) in self.vertices.iter().enumerate() {
            let degree = vertex.adjacency.len();
            match best {
                Some((max, _)) if degree <= max => {}
                _ => best = Some((degree, index)),
            }
        }
        best
    }

    /// Number of logical edges.
    ///
    /// Counts adjacency entries, halved for undirected graphs so each mirrored
    /// pair is reported once.
    pub fn edge_count(&self) -> u64 {
        let entries = self.entry_count();
        if self.directed {
            entries
        } else {
            entries / 2
        }
    }

    fn entry_count(&self) -> u64 {
        self.vertices
            .iter()
            .map(|vertex| vertex.adjacency.len() as u64)
            .sum()
    }

    /// Label of vertex `v`.
    pub fn label(&self, v: VertexId) -> Option<&str> {
        self.vertices.get(v).map(|vertex| vertex.label.as_str())
    }

    /// Iterates over `(index, label)` for every vertex.
    pub fn labels(&self) -> impl Iterator<Item = (VertexId, &str)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| (index, vertex.label.as_str()))
    }

    /// Adjacency entries of `v`, newest first.
    ///
    /// Callers must not rely on the order. Empty for an invalid index.
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = &AdjacencyEntry> {
        self.vertices
            .get(v)
            .into_iter()
            .flat_map(|vertex| vertex.adjacency.iter().rev())
    }

    /// Iterates over all vertex indices.
    pub fn vertex_indexes(&self) -> std::ops::Range<VertexId> {
        0..self.vertices.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.vertices.capacity()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Exports every adjacency entry into a petgraph `DiGraph`.
    ///
    /// Node indices match vertex indices. Undirected edges appear as two
    /// opposite arcs.
    pub fn to_petgraph(&self) -> DiGraph<String, f64> {
        let mut out = DiGraph::with_capacity(self.vertices.len(), self.entry_count() as usize);
        let nodes: Vec<_> = self
            .vertices
            .iter()
            .map(|vertex| out.add_node(vertex.label.clone()))
            .collect();

        for (index, vertex) in self.vertices.iter().enumerate() {
            for entry in &vertex.adjacency {
                out.add_edge(nodes[index], nodes[entry.target], entry.weight);
            }
        }

        out
    }

    /// Releases the graph and everything it owns.
    pub fn release(self) {
        debug!(
            "Releasing graph with {} vertices and {} edges",
            self.vertex_count(),
            self.edge_count()
        );
    }

    fn check_vertex(&self, index: VertexId) -> Result<()> {
        if index < self.vertices.len() {
            Ok(())
        } else {
            Err(GraphError::InvalidVertex {
                index,
                vertex_count: self.vertices.len(),
            })
        }
    }
}
