//! Approximate betweenness centrality.
//!
//! Brandes' accumulation for unweighted graphs ("A Faster Algorithm for
//! Betweenness Centrality", Algorithm 1), run from a seeded sample of `k`
//! pivot nodes and rescaled by `n / k`.

use std::collections::VecDeque;

use rand::seq::index;
use rayon::prelude::*;

use crate::config::BetweennessConfig;
use crate::graph::CompressedGraph;
use crate::metrics::NodeScores;
use crate::random::{streams, RandomSource};

/// Pivots handled by one sequential accumulation task
const PIVOT_CHUNK: usize = 16;

/// Dependency of every node on shortest paths from `source`, added into `acc`
fn accumulate_from(graph: &CompressedGraph, source: usize, acc: &mut [f64]) {
    let n = graph.node_count();

    let mut sigma = vec![0.0f64; n];
    let mut distance = vec![usize::MAX; n];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut delta = vec![0.0f64; n];
    let mut queue = VecDeque::new();
    let mut stack = Vec::new();

    sigma[source] = 1.0;
    distance[source] = 0;
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        for &w in graph.neighbor_indices(v) {
            let w = w as usize;
            if distance[w] == usize::MAX {
                distance[w] = distance[v] + 1;
                queue.push_back(w);
            }
            if distance[w] == distance[v] + 1 {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != source {
            acc[w] += delta[w];
        }
    }
}

/// Pivot indices; every node when the sample covers the graph
fn sample_pivots(n: usize, samples: usize, random: &RandomSource) -> Vec<usize> {
    if samples >= n {
        return (0..n).collect();
    }
    let mut rng = random.stream(&[streams::BETWEENNESS]);
    let mut pivots = index::sample(&mut rng, n, samples).into_vec();
    // Fixed order so the floating point sums do not depend on the sample permutation
    pivots.sort_unstable();
    pivots
}

/// Normalized betweenness centrality estimated from sampled pivots.
///
/// With `samples >= n` the result is exact and lies in `[0, 1]`. Scores are
/// normalized by `1 / ((n - 1)(n - 2))`, which for undirected graphs accounts
/// for each pair being seen from both endpoints; graphs with at most two
/// nodes score zero everywhere.
///
/// Sampled scores are unbiased estimates of the exact ones and can exceed 1:
/// in a star where no pivot is the center, every leaf pivot credits the
/// center with `n - 2` and the `n / k` rescale overshoots.
pub fn betweenness_centrality(
    graph: &CompressedGraph,
    config: &BetweennessConfig,
    random: &RandomSource,
) -> NodeScores {
    let n = graph.node_count();
    if n <= 2 {
        return NodeScores::from_dense(graph, vec![0.0; n]);
    }

    let pivots = sample_pivots(n, config.samples.max(1), random);
    log::debug!("Betweenness from {} of {} pivot nodes", pivots.len(), n);

    // Each chunk is summed sequentially and chunks are combined in order
    let partials: Vec<Vec<f64>> = pivots
        .par_chunks(PIVOT_CHUNK)
        .map(|chunk| {
            let mut acc = vec![0.0; n];
            for &source in chunk {
                accumulate_from(graph, source, &mut acc);
            }
            acc
        })
        .collect();

    let mut betweenness = vec![0.0; n];
    for partial in partials {
        for (total, value) in betweenness.iter_mut().zip(partial) {
            *total += value;
        }
    }

    let scale = 1.0 / ((n - 1) * (n - 2)) as f64 * n as f64 / pivots.len() as f64;
    for value in &mut betweenness {
        *value *= scale;
    }

    NodeScores::from_dense(graph, betweenness)
}
