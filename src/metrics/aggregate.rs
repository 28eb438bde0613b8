//! Per-node metric records and the analysis report

use serde::{Deserialize, Serialize};

use crate::community::Partition;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::graph::{CompressedGraph, NodeId};
use crate::metrics::{Metric, NodeScores};

/// A node and its score in a ranking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    pub node: NodeId,
    pub score: f64,
}

/// Exported attributes of one subgraph node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeMetrics {
    pub node: NodeId,

    /// Degree in the full graph
    pub degree: usize,

    /// `PageRank` over the full graph
    pub pagerank: f64,

    /// Eigenvector centrality over the subgraph
    pub eigenvector: f64,

    /// Community within the subgraph
    pub community: usize,
}

impl NodeMetrics {
    /// Assemble one record per subgraph node.
    ///
    /// Fails if any subgraph node is missing from the full graph or from one
    /// of the score mappings.
    pub fn assemble(
        full: &CompressedGraph,
        subgraph: &CompressedGraph,
        pagerank: &NodeScores,
        eigenvector: &NodeScores,
        partition: &Partition,
    ) -> Result<Vec<NodeMetrics>> {
        subgraph
            .node_ids()
            .iter()
            .map(|&node| -> Result<NodeMetrics> {
                let missing = |metric| AnalysisError::MissingMetric { node, metric };
                Ok(NodeMetrics {
                    node,
                    degree: full.degree(node)?,
                    pagerank: pagerank.get(node).ok_or_else(|| missing("pagerank"))?,
                    eigenvector: eigenvector.get(node).ok_or_else(|| missing("eigenvector"))?,
                    community: partition.community_of(node).ok_or_else(|| missing("community"))?,
                })
            })
            .collect()
    }
}

/// Statistics of the full graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
    pub density: f64,
    pub average_degree: f64,
    pub components: usize,
    pub largest_component: usize,

    /// Double-sweep estimate on the largest component
    pub approximate_diameter: Metric<usize>,
}

/// Statistics of the top-degree subgraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubgraphSummary {
    pub nodes: usize,
    pub edges: usize,
    pub average_clustering: Metric<f64>,
    pub degree_assortativity: Metric<f64>,
    pub average_shortest_path_length: Metric<f64>,
}

/// Everything one analysis pass reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub config: AnalysisConfig,
    pub graph: GraphSummary,
    pub subgraph: SubgraphSummary,

    pub top_degree: Vec<RankedNode>,
    pub top_pagerank: Vec<RankedNode>,
    pub pagerank_iterations: usize,
    pub pagerank_converged: bool,

    pub top_closeness: Vec<RankedNode>,
    pub top_betweenness: Vec<RankedNode>,
    pub top_eigenvector: Vec<RankedNode>,
    pub eigenvector_converged: bool,

    pub community_count: usize,
    pub modularity: f64,
    pub louvain_levels: usize,

    pub diffusion_seed: Option<NodeId>,
    pub diffusion_infected: usize,
    pub diffusion_history: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn assemble_requires_every_metric() {
        let full: CompressedGraph = vec![(1, 2), (2, 3), (3, 4)].into_iter().collect();
        let sub = full.induced_subgraph(&[2, 3]).unwrap();
        let pagerank = NodeScores::from_dense(&full, vec![0.1, 0.4, 0.4, 0.1]);
        let eigenvector = NodeScores::from_dense(&sub, vec![0.7, 0.7]);
        let partition = Partition::from_assignments(BTreeMap::from([(2, 0), (3, 0)]));

        let rows = NodeMetrics::assemble(&full, &sub, &pagerank, &eigenvector, &partition).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].node, 2);
        assert_eq!(rows[0].degree, 2);
        assert_eq!(rows[1].pagerank, 0.4);

        let partial = Partition::from_assignments(BTreeMap::from([(2, 0)]));
        assert!(matches!(
            NodeMetrics::assemble(&full, &sub, &pagerank, &eigenvector, &partial),
            Err(AnalysisError::MissingMetric { node: 3, metric: "community" })
        ));
    }
}
