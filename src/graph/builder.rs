//! Graph construction module

use std::collections::HashMap;

use crate::graph::{CompressedGraph, NodeId};

/// Builder for incrementally constructing a [`CompressedGraph`].
///
/// Repeated edges are deduplicated when the graph is built. A self-loop
/// `add_edge(u, u)` registers `u` as a node but records no edge.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Mapping from external ids to node indices
    id_to_index: HashMap<NodeId, u32>,

    /// External ids in insertion order
    node_ids: Vec<NodeId>,

    /// Adjacency lists for each node (may contain duplicates until build)
    adjacency_lists: Vec<Vec<u32>>,

    /// Self-loops dropped so far
    ignored_self_loops: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new graph builder with the given node capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
            ignored_self_loops: 0,
        }
    }

    /// Get or create the index for the given id
    pub fn add_node(&mut self, id: NodeId) -> u32 {
        if let Some(&idx) = self.id_to_index.get(&id) {
            return idx;
        }

        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(id, idx);
        self.node_ids.push(id);
        self.adjacency_lists.push(Vec::new());

        idx
    }

    /// Add an undirected edge, inserting both endpoints if absent
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) {
        let a = self.add_node(u);
        if u == v {
            self.ignored_self_loops += 1;
            return;
        }
        let b = self.add_node(v);

        self.adjacency_lists[a as usize].push(b);
        self.adjacency_lists[b as usize].push(a);
    }

    /// Number of distinct nodes inserted so far
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Number of self-loops that were dropped
    pub fn ignored_self_loops(&self) -> usize {
        self.ignored_self_loops
    }

    /// Build the compressed graph
    pub fn build(mut self) -> CompressedGraph {
        for list in &mut self.adjacency_lists {
            // Sorted lists allow binary search in has_edge
            list.sort_unstable();
            list.dedup();
        }

        if self.ignored_self_loops > 0 {
            log::debug!("Ignored {} self-loop edge(s)", self.ignored_self_loops);
        }

        CompressedGraph::from_adjacency(self.node_ids, self.adjacency_lists)
    }
}

impl FromIterator<(NodeId, NodeId)> for CompressedGraph {
    fn from_iter<I: IntoIterator<Item = (NodeId, NodeId)>>(iter: I) -> Self {
        let mut builder = GraphBuilder::new();
        for (u, v) in iter {
            builder.add_edge(u, v);
        }
        builder.build()
    }
}
