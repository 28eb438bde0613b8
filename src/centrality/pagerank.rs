//! `PageRank` by power iteration over the undirected transition matrix.
//!
//! Each iteration reads the previous score vector and writes a fresh one, so
//! per-node updates run in parallel without read-after-write hazards. The
//! dangling mass and the L1 change are reduced sequentially to keep results
//! bit-identical across thread counts.

use rayon::prelude::*;

use crate::config::PageRankConfig;
use crate::error::{AnalysisError, Result};
use crate::graph::CompressedGraph;
use crate::metrics::{IterationOutcome, NodeScores};

/// Compute `PageRank` for every node.
///
/// Dangling (degree 0) nodes spread their mass uniformly over all nodes.
/// Hitting `max_iterations` is not an error; the outcome reports
/// `converged: false` with the last iterate.
pub fn pagerank(graph: &CompressedGraph, config: &PageRankConfig) -> Result<IterationOutcome<NodeScores>> {
    let n = graph.node_count();
    if n == 0 {
        return Err(AnalysisError::EmptyGraph);
    }

    let alpha = config.damping;
    let uniform = 1.0 / n as f64;
    let degrees = graph.degrees();

    let mut scores = vec![uniform; n];
    let mut next = vec![0.0; n];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;

        let dangling: f64 = (0..n).filter(|&i| degrees[i] == 0).map(|i| scores[i]).sum();
        let base = (1.0 - alpha) * uniform + alpha * dangling * uniform;

        // Contribution each node sends along each of its edges
        let share: Vec<f64> = scores
            .iter()
            .zip(&degrees)
            .map(|(&score, &degree)| if degree == 0 { 0.0 } else { score / degree as f64 })
            .collect();

        next.par_iter_mut().enumerate().for_each(|(node, value)| {
            let incoming: f64 = graph
                .neighbor_indices(node)
                .iter()
                .map(|&neighbor| share[neighbor as usize])
                .sum();
            *value = base + alpha * incoming;
        });

        let change: f64 = scores.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut scores, &mut next);

        if change < config.tolerance {
            converged = true;
            break;
        }
    }

    // Remove accumulated rounding drift
    let total: f64 = scores.iter().sum();
    for score in &mut scores {
        *score /= total;
    }

    if converged {
        log::debug!("PageRank converged after {} iterations", iterations);
    } else {
        log::warn!("PageRank stopped at max_iterations = {} without converging", iterations);
    }

    Ok(IterationOutcome {
        value: NodeScores::from_dense(graph, scores),
        iterations,
        converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn triangle_is_uniform() {
        let graph: CompressedGraph = vec![(1, 2), (2, 3), (3, 1)].into_iter().collect();
        let outcome = pagerank(&graph, &PageRankConfig::default()).unwrap();

        assert!(outcome.converged);
        for (_, score) in outcome.value.iter() {
            assert!((score - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn star_center_ranks_first() {
        let graph: CompressedGraph = (1..=4).map(|leaf| (0, leaf)).collect();
        let outcome = pagerank(&graph, &PageRankConfig::default()).unwrap();

        let top = outcome.value.top(1);
        assert_eq!(top[0].node, 0);
        assert!((outcome.value.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn dangling_nodes_keep_mass() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(1, 2);
        builder.add_node(3);
        let graph = builder.build();
        let outcome = pagerank(&graph, &PageRankConfig::default()).unwrap();

        assert!((outcome.value.sum() - 1.0).abs() < 1e-9);
        assert!(outcome.value.get(3).unwrap() > 0.0);
        assert!(outcome.value.get(1).unwrap() > outcome.value.get(3).unwrap());
    }

    #[test]
    fn iteration_cap_is_not_an_error() {
        let graph: CompressedGraph = vec![(1, 2), (2, 3), (3, 4), (4, 1), (1, 3), (4, 5)]
            .into_iter()
            .collect();
        let config = PageRankConfig {
            max_iterations: 1,
            tolerance: 1e-15,
            ..PageRankConfig::default()
        };
        let outcome = pagerank(&graph, &config).unwrap();

        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 1);
        assert!((outcome.value.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_graph_is_an_error() {
        let graph: CompressedGraph = std::iter::empty().collect();
        assert!(matches!(
            pagerank(&graph, &PageRankConfig::default()),
            Err(AnalysisError::EmptyGraph)
        ));
    }
}
