//! Closeness centrality

use rayon::prelude::*;

use crate::graph::traversal::bfs;
use crate::graph::CompressedGraph;
use crate::metrics::NodeScores;

/// Closeness centrality from one BFS per node.
///
/// For a node that reaches `r` nodes (itself included) with total distance
/// `d`, the score is `(r - 1) / d` scaled by `(r - 1) / (n - 1)`, so only
/// the node's own component contributes and small components are not
/// over-rewarded. On a connected graph this reduces to `(n - 1) / d`.
/// Isolated nodes score 0.
pub fn closeness_centrality(graph: &CompressedGraph) -> NodeScores {
    let n = graph.node_count();
    log::debug!("Computing closeness centrality for {} nodes", n);

    let values = (0..n)
        .into_par_iter()
        .map(|source| {
            let result = bfs(graph, source);
            let total = result.distance_sum();
            let reachable = result.reached() - 1;
            if total == 0 || n <= 1 {
                return 0.0;
            }
            let closeness = reachable as f64 / total as f64;
            closeness * reachable as f64 / (n - 1) as f64
        })
        .collect();

    NodeScores::from_dense(graph, values)
}
