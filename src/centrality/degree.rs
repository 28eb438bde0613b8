//! Degree centrality

use crate::error::{AnalysisError, Result};
use crate::graph::CompressedGraph;
use crate::metrics::NodeScores;

/// Degree centrality: `degree(v) / (n - 1)`.
///
/// Undefined for graphs with fewer than two nodes.
pub fn degree_centrality(graph: &CompressedGraph) -> Result<NodeScores> {
    let n = graph.node_count();
    if n <= 1 {
        return Err(AnalysisError::TooFewNodes { required: 2, found: n });
    }

    let denominator = (n - 1) as f64;
    let values = (0..n).map(|i| graph.degree_at(i) as f64 / denominator).collect();

    Ok(NodeScores::from_dense(graph, values))
}
