use crate::error::Result;
use crate::graph::{Graph, VertexId};
use std::collections::HashMap;

/// Maps external vertex labels to dense graph indexes and back.
///
/// Used while loading: every label seen in the input resolves to exactly one
/// vertex. The index keeps its own copies of the labels; the graph keeps
/// the originals.
#[derive(Debug, Default, Clone)]
pub struct VertexLabelIndex {
    /// Label to vertex index.
    by_label: HashMap<String, VertexId>,

    /// Vertex index to label, dense.
    by_index: Vec<String>,
}

impl VertexLabelIndex {
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index covering every vertex already in `graph`.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut index = Self {
            by_label: HashMap::with_capacity(graph.vertex_count()),
            by_index: Vec::with_capacity(graph.vertex_count()),
        };
        for (id, label) in graph.labels() {
            index.insert(label.to_string(), id);
        }
        index
    }

    /// Records that `label` names vertex `id`.
    ///
    /// Indexes are expected to arrive densely, in insertion order.
    pub fn insert(&mut self, label: String, id: VertexId) {
        if id >= self.by_index.len() {
            self.by_index.resize(id + 1, String::new());
        }
        self.by_index[id] = label.clone();
        self.by_label.insert(label, id);
    }

    /// Resolves a label to its vertex index.
    pub fn resolve(&self, label: &str) -> Option<VertexId> {
        self.by_label.get(label).copied()
    }

    /// Returns the label recorded for a vertex index.
    pub fn label_of(&self, id: VertexId) -> Option<&str> {
        self.by_index.get(id).map(String::as_str)
    }

    /// Resolves `label`, inserting a new vertex into `graph` if it is unknown.
    ///
    /// Returns the index and whether a vertex was created.
    pub fn resolve_or_insert(
        &mut self,
        graph: &mut Graph,
        label: &str,
    ) -> Result<(VertexId, bool)> {
        if let Some(id) = self.resolve(label) {
            return Ok((id, false));
        }

        let id = graph.insert_vertex(label)?;
        self.insert(label.to_string(), id);
        Ok((id, true))
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }

    /// Clears the index.
    pub fn clear(&mut self) {
        self.by_label.clear();
        self.by_index.clear();
    }
}
