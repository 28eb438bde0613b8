//! Community structure: partitions, modularity and Louvain detection

pub mod louvain;
pub mod modularity;

pub use louvain::{louvain, LevelSummary, LouvainOutcome};
pub use modularity::modularity;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::graph::{CompressedGraph, NodeId};

/// Assignment of each node to exactly one community
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    assignments: BTreeMap<NodeId, usize>,
    community_count: usize,
}

impl Partition {
    /// Partition from explicit assignments; community ids are kept as given
    pub fn from_assignments(assignments: BTreeMap<NodeId, usize>) -> Self {
        let community_count = assignments.values().collect::<BTreeSet<_>>().len();
        Self {
            assignments,
            community_count,
        }
    }

    /// Partition from per-index labels.
    ///
    /// Labels are renumbered to `0..count` in order of first appearance
    /// along the graph's index order.
    pub(crate) fn from_dense(graph: &CompressedGraph, labels: &[usize]) -> Self {
        let (renumbered, community_count) = renumber(labels);
        let assignments = graph.node_ids().iter().copied().zip(renumbered).collect();
        Self {
            assignments,
            community_count,
        }
    }

    /// Every node in its own community
    pub fn singletons(graph: &CompressedGraph) -> Self {
        let labels: Vec<usize> = (0..graph.node_count()).collect();
        Self::from_dense(graph, &labels)
    }

    pub fn community_of(&self, node: NodeId) -> Option<usize> {
        self.assignments.get(&node).copied()
    }

    /// Number of distinct communities
    pub fn community_count(&self) -> usize {
        self.community_count
    }

    /// Number of assigned nodes
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        self.assignments.iter().map(|(&node, &community)| (node, community))
    }

    /// Members of every community, keyed by community id
    pub fn communities(&self) -> BTreeMap<usize, Vec<NodeId>> {
        let mut groups: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
        for (node, community) in self.iter() {
            groups.entry(community).or_default().push(node);
        }
        groups
    }
}

/// Renumber labels to `0..count` by first appearance
pub(crate) fn renumber(labels: &[usize]) -> (Vec<usize>, usize) {
    let mut mapping: HashMap<usize, usize> = HashMap::new();
    let renumbered = labels
        .iter()
        .map(|&label| {
            let next = mapping.len();
            *mapping.entry(label).or_insert(next)
        })
        .collect();
    (renumbered, mapping.len())
}
