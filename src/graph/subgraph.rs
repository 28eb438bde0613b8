//! Induced subgraph extraction

use crate::error::Result;
use crate::graph::{CompressedGraph, NodeId};

impl CompressedGraph {
    /// Extract the subgraph induced by `nodes`.
    ///
    /// The result keeps the parent's index order, contains every parent edge
    /// whose endpoints are both selected, and owns its data. Duplicate ids in
    /// `nodes` are ignored; unknown ids are an error.
    pub fn induced_subgraph(&self, nodes: &[NodeId]) -> Result<CompressedGraph> {
        let mut selected = vec![false; self.node_count];
        for &id in nodes {
            selected[self.index_of(id)?] = true;
        }
        Ok(self.filter_nodes(&selected))
    }

    /// Subgraph induced by the `k` highest-degree nodes.
    ///
    /// Ties are broken by index order (earlier inserted nodes win).
    pub fn top_degree_subgraph(&self, k: usize) -> CompressedGraph {
        let mut order: Vec<usize> = (0..self.node_count).collect();
        // Stable sort keeps index order among equal degrees
        order.sort_by(|&a, &b| self.degree_at(b).cmp(&self.degree_at(a)));

        let mut selected = vec![false; self.node_count];
        for &idx in order.iter().take(k) {
            selected[idx] = true;
        }

        let subgraph = self.filter_nodes(&selected);
        log::info!(
            "Extracted top-{} degree subgraph with {} nodes and {} edges",
            k,
            subgraph.node_count(),
            subgraph.edge_count()
        );
        subgraph
    }

    /// Filter a graph to only include nodes whose flag is set
    fn filter_nodes(&self, pass_filter: &[bool]) -> CompressedGraph {
        // Create mapping from original to filtered indices
        let mut orig_to_filtered = vec![u32::MAX; self.node_count];
        let mut node_ids = Vec::new();
        for node in 0..self.node_count {
            if pass_filter[node] {
                orig_to_filtered[node] = node_ids.len() as u32;
                node_ids.push(self.node_ids[node]);
            }
        }

        let adjacency = (0..self.node_count)
            .filter(|&node| pass_filter[node])
            .map(|node| {
                // Parent lists are sorted and the mapping is monotone, so these stay sorted
                self.neighbor_indices(node)
                    .iter()
                    .filter(|&&target| pass_filter[target as usize])
                    .map(|&target| orig_to_filtered[target as usize])
                    .collect()
            })
            .collect();

        CompressedGraph::from_adjacency(node_ids, adjacency)
    }
}
