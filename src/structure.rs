//! Whole-graph structural statistics

use rayon::prelude::*;
use statrs::statistics::Statistics;

use crate::graph::CompressedGraph;
use crate::metrics::{Metric, NotComputedReason};

/// Edge density `2m / (n (n - 1))`; zero for graphs with fewer than two nodes
pub fn density(graph: &CompressedGraph) -> f64 {
    let n = graph.node_count();
    if n <= 1 {
        return 0.0;
    }
    2.0 * graph.edge_count() as f64 / (n * (n - 1)) as f64
}

/// Mean degree `2m / n`; zero for the empty graph
pub fn average_degree(graph: &CompressedGraph) -> f64 {
    if graph.is_empty() {
        return 0.0;
    }
    2.0 * graph.edge_count() as f64 / graph.node_count() as f64
}

/// Fraction of a node's neighbor pairs that are themselves connected
fn local_clustering(graph: &CompressedGraph, node: usize) -> f64 {
    let neighbors = graph.neighbor_indices(node);
    let degree = neighbors.len();
    if degree < 2 {
        return 0.0;
    }

    let mut triangles = 0usize;
    for (i, &a) in neighbors.iter().enumerate() {
        for &b in &neighbors[i + 1..] {
            if graph.has_edge_at(a as usize, b as usize) {
                triangles += 1;
            }
        }
    }

    2.0 * triangles as f64 / (degree * (degree - 1)) as f64
}

/// Mean local clustering coefficient over all nodes (degree < 2 counts as 0)
pub fn average_clustering(graph: &CompressedGraph) -> Metric<f64> {
    let n = graph.node_count();
    if n == 0 {
        return Metric::NotComputed(NotComputedReason::EmptyGraph);
    }

    let coefficients: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|node| local_clustering(graph, node))
        .collect();

    Metric::computed(coefficients.iter().sum::<f64>() / n as f64)
}

/// Degree assortativity: Pearson correlation of the degrees at both ends of
/// every edge, each edge taken in both orientations.
///
/// Undefined when there are no edges or all endpoint degrees are equal.
pub fn degree_assortativity(graph: &CompressedGraph) -> Metric<f64> {
    if graph.edge_count() == 0 {
        return Metric::NotComputed(NotComputedReason::Undefined {
            detail: "graph has no edges".to_string(),
        });
    }

    let mut source_degrees = Vec::with_capacity(2 * graph.edge_count());
    let mut target_degrees = Vec::with_capacity(2 * graph.edge_count());
    for (a, b) in graph.edge_indices() {
        let da = graph.degree_at(a) as f64;
        let db = graph.degree_at(b) as f64;
        source_degrees.extend([da, db]);
        target_degrees.extend([db, da]);
    }

    let covariance = source_degrees.iter().population_covariance(target_degrees.iter());
    let spread = source_degrees.iter().population_std_dev() * target_degrees.iter().population_std_dev();
    let coefficient = covariance / spread;

    if !coefficient.is_finite() || spread == 0.0 {
        return Metric::NotComputed(NotComputedReason::Undefined {
            detail: "all endpoint degrees are equal".to_string(),
        });
    }

    Metric::computed(coefficient)
}
