//! Newman modularity of a partition

use std::collections::HashMap;

use crate::community::Partition;
use crate::error::{AnalysisError, Result};
use crate::graph::CompressedGraph;

/// `Q = Σ_c [ L_c / m - (d_c / 2m)^2 ]`, where `L_c` counts edges inside
/// community `c`, `d_c` sums the degrees of its members and `m` is the edge
/// count.
///
/// Every graph node must be assigned. A graph without edges has `Q = 0`.
pub fn modularity(graph: &CompressedGraph, partition: &Partition) -> Result<f64> {
    let mut labels = Vec::with_capacity(graph.node_count());
    for &node in graph.node_ids() {
        let community = partition.community_of(node).ok_or(AnalysisError::MissingMetric {
            node,
            metric: "community",
        })?;
        labels.push(community);
    }

    let m = graph.edge_count() as f64;
    if m == 0.0 {
        return Ok(0.0);
    }

    let mut internal: HashMap<usize, f64> = HashMap::new();
    let mut degree_sum: HashMap<usize, f64> = HashMap::new();
    for node in 0..graph.node_count() {
        *degree_sum.entry(labels[node]).or_default() += graph.degree_at(node) as f64;
    }
    for (a, b) in graph.edge_indices() {
        if labels[a] == labels[b] {
            *internal.entry(labels[a]).or_default() += 1.0;
        }
    }

    // Sum in a fixed community order so repeated calls agree bit for bit
    let mut communities: Vec<usize> = degree_sum.keys().copied().collect();
    communities.sort_unstable();

    Ok(communities
        .iter()
        .map(|c| {
            let within = internal.get(c).copied().unwrap_or(0.0);
            let degrees = degree_sum[c];
            within / m - (degrees / (2.0 * m)).powi(2)
        })
        .sum())
}
