//! Memory-efficient undirected graph representation

use std::collections::HashMap;
use std::iter::FusedIterator;
use std::mem;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::graph::NodeId;

/// Compressed sparse representation of a simple undirected graph.
///
/// Every edge {u, v} is stored twice, once in the neighbor list of each
/// endpoint, so adjacency is symmetric by construction. Neighbor lists are
/// sorted and free of duplicates and self-loops. Instances are produced by
/// [`crate::graph::GraphBuilder`] or by subgraph extraction and are never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressedGraph {
    /// Number of nodes in the graph
    pub(crate) node_count: usize,

    /// Number of undirected edges
    pub(crate) edge_count: usize,

    /// Offset array: offsets[i] to offsets[i+1] defines the neighbor range for node i
    pub(crate) offsets: Vec<u32>,

    /// Concatenated neighbor lists (internal indices)
    pub(crate) edges: Vec<u32>,

    /// Mapping from internal index to external node id
    pub(crate) node_ids: Vec<NodeId>,

    /// Reverse mapping from external node id to internal index
    #[serde(skip)]
    pub(crate) id_to_index: HashMap<NodeId, u32>,
}

impl CompressedGraph {
    /// Assemble a graph from already sorted, deduplicated, symmetric adjacency lists
    pub(crate) fn from_adjacency(node_ids: Vec<NodeId>, adjacency: Vec<Vec<u32>>) -> Self {
        let node_count = node_ids.len();
        let total: usize = adjacency.iter().map(Vec::len).sum();

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut edges = Vec::with_capacity(total);
        offsets.push(0);
        for list in &adjacency {
            edges.extend_from_slice(list);
            offsets.push(edges.len() as u32);
        }

        let id_to_index = node_ids
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx as u32))
            .collect();

        Self {
            node_count,
            edge_count: total / 2,
            offsets,
            edges,
            node_ids,
            id_to_index,
        }
    }

    /// Rebuild the id lookup table, needed after deserialization
    pub fn reindex(&mut self) {
        self.id_to_index = self
            .node_ids
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx as u32))
            .collect();
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Node ids in internal index order
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.id_to_index.contains_key(&id)
    }

    /// Internal index of a node id
    pub fn index_of(&self, id: NodeId) -> Result<usize> {
        self.id_to_index
            .get(&id)
            .map(|&idx| idx as usize)
            .ok_or(AnalysisError::NodeNotFound(id))
    }

    /// External id of an internal index
    pub fn id_of(&self, index: usize) -> NodeId {
        self.node_ids[index]
    }

    /// Neighbors of a node by internal index
    pub fn neighbor_indices(&self, index: usize) -> &[u32] {
        let start = self.offsets[index] as usize;
        let end = self.offsets[index + 1] as usize;
        &self.edges[start..end]
    }

    /// Degree of a node by internal index
    pub fn degree_at(&self, index: usize) -> usize {
        (self.offsets[index + 1] - self.offsets[index]) as usize
    }

    /// Lazy, restartable sequence of the neighbors of `id`
    pub fn neighbors(&self, id: NodeId) -> Result<Neighbors<'_>> {
        let index = self.index_of(id)?;
        Ok(Neighbors {
            inner: self.neighbor_indices(index).iter(),
            node_ids: &self.node_ids,
        })
    }

    /// Number of neighbors of `id`
    pub fn degree(&self, id: NodeId) -> Result<usize> {
        self.index_of(id).map(|index| self.degree_at(index))
    }

    /// Check if there's an edge between two internal indices
    pub fn has_edge_at(&self, a: usize, b: usize) -> bool {
        self.neighbor_indices(a).binary_search(&(b as u32)).is_ok()
    }

    /// Check if there's an edge between two node ids
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> Result<bool> {
        let a = self.index_of(u)?;
        let b = self.index_of(v)?;
        Ok(self.has_edge_at(a, b))
    }

    /// Degrees of all nodes in index order
    pub fn degrees(&self) -> Vec<usize> {
        (0..self.node_count).map(|i| self.degree_at(i)).collect()
    }

    /// Each undirected edge once, as (smaller index, larger index)
    pub fn edge_indices(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.node_count).flat_map(move |src| {
            self.neighbor_indices(src)
                .iter()
                .map(|&dst| dst as usize)
                .filter(move |&dst| src < dst)
                .map(move |dst| (src, dst))
        })
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let edges = self.edges.capacity() * mem::size_of::<u32>();
        let ids = self.node_ids.capacity() * mem::size_of::<NodeId>();
        let lookup = self.id_to_index.capacity() * (mem::size_of::<NodeId>() + mem::size_of::<u32>());

        base + offsets + edges + ids + lookup
    }
}

/// Iterator over the neighbor ids of one node.
///
/// Cloning yields an independent iterator starting from the current position.
#[derive(Debug, Clone)]
pub struct Neighbors<'a> {
    inner: std::slice::Iter<'a, u32>,
    node_ids: &'a [NodeId],
}

impl Iterator for Neighbors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.inner.next().map(|&idx| self.node_ids[idx as usize])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Neighbors<'_> {}
impl FusedIterator for Neighbors<'_> {}
