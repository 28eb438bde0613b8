//! Result types and per-node metric aggregation

pub mod aggregate;

pub use aggregate::{AnalysisReport, GraphSummary, NodeMetrics, RankedNode, SubgraphSummary};

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::graph::{CompressedGraph, NodeId};

/// Score per node, keyed by node id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeScores {
    scores: BTreeMap<NodeId, f64>,
}

impl NodeScores {
    /// Pair dense per-index values with the graph's node ids
    pub(crate) fn from_dense(graph: &CompressedGraph, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), graph.node_count());
        let scores = graph.node_ids().iter().copied().zip(values).collect();
        Self { scores }
    }

    pub fn get(&self, id: NodeId) -> Option<f64> {
        self.scores.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterate in ascending node id order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.scores.iter().map(|(&id, &score)| (id, score))
    }

    pub fn sum(&self) -> f64 {
        self.scores.values().sum()
    }

    /// The `k` highest scores, descending; equal scores are ordered by node id
    pub fn top(&self, k: usize) -> Vec<RankedNode> {
        self.iter()
            .map(|(node, score)| RankedNode { node, score })
            .sorted_by(|a, b| b.score.total_cmp(&a.score).then(a.node.cmp(&b.node)))
            .take(k)
            .collect()
    }
}

/// Why a metric was not computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum NotComputedReason {
    EmptyGraph,
    Disconnected { components: usize },
    TooLarge { nodes: usize, limit: usize },
    Undefined { detail: String },
}

impl fmt::Display for NotComputedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGraph => write!(f, "graph is empty"),
            Self::Disconnected { components } => {
                write!(f, "graph is disconnected ({} components)", components)
            }
            Self::TooLarge { nodes, limit } => {
                write!(f, "graph too large ({} nodes, limit {})", nodes, limit)
            }
            Self::Undefined { detail } => write!(f, "undefined: {}", detail),
        }
    }
}

/// A metric value, or the reason it could not be computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Metric<T> {
    Computed { value: T },
    NotComputed(NotComputedReason),
}

impl<T> Metric<T> {
    pub fn computed(value: T) -> Self {
        Self::Computed { value }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Computed { value } => Some(value),
            Self::NotComputed(_) => None,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed { .. })
    }
}

/// Output of a bounded iterative algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationOutcome<T> {
    pub value: T,
    pub iterations: usize,
    pub converged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_breaks_ties_by_node_id() {
        let graph: CompressedGraph = vec![(3, 1), (1, 2)].into_iter().collect();
        let scores = NodeScores::from_dense(&graph, vec![0.5, 0.5, 0.25]);
        let top = scores.top(2);

        assert_eq!(top[0].node, 1);
        assert_eq!(top[1].node, 3);
    }

    #[test]
    fn metric_serializes_with_status() {
        let metric: Metric<usize> = Metric::NotComputed(NotComputedReason::Disconnected { components: 2 });
        let json = serde_json::to_value(&metric).unwrap();
        assert_eq!(json["status"], "not_computed");
        assert_eq!(json["reason"], "disconnected");
        assert_eq!(json["components"], 2);

        let json = serde_json::to_value(Metric::computed(4usize)).unwrap();
        assert_eq!(json["value"], 4);
    }
}
