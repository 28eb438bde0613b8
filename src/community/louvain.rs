//! Louvain modularity optimization.
//!
//! Alternates local moving (greedy single-node moves between neighboring
//! communities) with aggregation (each community collapses into a weighted
//! super-node) until a level no longer improves modularity. Local moving is
//! sequential because every gain depends on the assignments made so far.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::community::{modularity, renumber, Partition};
use crate::config::LouvainConfig;
use crate::error::{AnalysisError, Result};
use crate::graph::CompressedGraph;
use crate::random::{streams, RandomSource};

/// One level of the aggregation hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub communities: usize,
    pub modularity: f64,
}

/// Final partition plus the dendrogram that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LouvainOutcome {
    pub partition: Partition,

    /// Standard modularity (resolution 1) of `partition`, whatever
    /// `LouvainConfig::resolution` was used for the search
    pub modularity: f64,

    /// One entry per kept level; `modularity` here is measured at the
    /// configured resolution, so it only matches the outcome's value when
    /// that resolution is 1
    pub levels: Vec<LevelSummary>,
}

/// Weighted graph of one aggregation level
struct LevelGraph {
    /// Neighbor lists without self entries, sorted by neighbor
    adjacency: Vec<Vec<(usize, f64)>>,

    /// Self-loop weight, twice the edge weight folded into each super-node
    loops: Vec<f64>,

    /// Weighted degree of each node, loops included
    degrees: Vec<f64>,

    /// Total edge weight m
    total_weight: f64,
}

impl LevelGraph {
    fn from_graph(graph: &CompressedGraph) -> Self {
        let adjacency: Vec<Vec<(usize, f64)>> = (0..graph.node_count())
            .map(|node| {
                graph
                    .neighbor_indices(node)
                    .iter()
                    .map(|&neighbor| (neighbor as usize, 1.0))
                    .collect()
            })
            .collect();
        Self::new(adjacency, vec![0.0; graph.node_count()])
    }

    fn new(adjacency: Vec<Vec<(usize, f64)>>, loops: Vec<f64>) -> Self {
        let degrees: Vec<f64> = adjacency
            .iter()
            .zip(&loops)
            .map(|(list, &self_loop)| self_loop + list.iter().map(|&(_, w)| w).sum::<f64>())
            .collect();
        let total_weight = degrees.iter().sum::<f64>() / 2.0;
        Self {
            adjacency,
            loops,
            degrees,
            total_weight,
        }
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Modularity of `labels` on this level, with resolution
    fn modularity(&self, labels: &[usize], community_count: usize, resolution: f64) -> f64 {
        let m = self.total_weight;
        let mut internal = vec![0.0; community_count];
        let mut totals = vec![0.0; community_count];

        for node in 0..self.node_count() {
            let c = labels[node];
            totals[c] += self.degrees[node];
            internal[c] += self.loops[node];
            for &(neighbor, weight) in &self.adjacency[node] {
                if labels[neighbor] == c {
                    internal[c] += weight;
                }
            }
        }

        // internal holds twice the intra-community weight
        internal
            .iter()
            .zip(&totals)
            .map(|(&twice_within, &total)| twice_within / (2.0 * m) - resolution * (total / (2.0 * m)).powi(2))
            .sum()
    }

    /// Collapse each community into one node
    fn aggregate(&self, labels: &[usize], community_count: usize) -> LevelGraph {
        let mut loops = vec![0.0; community_count];
        let mut links: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); community_count];

        for node in 0..self.node_count() {
            let c = labels[node];
            loops[c] += self.loops[node];
            for &(neighbor, weight) in &self.adjacency[node] {
                let d = labels[neighbor];
                if c == d {
                    // Seen from both endpoints, so this adds twice the edge weight
                    loops[c] += weight;
                } else {
                    *links[c].entry(d).or_default() += weight;
                }
            }
        }

        let adjacency = links.into_iter().map(|map| map.into_iter().collect()).collect();
        LevelGraph::new(adjacency, loops)
    }
}

/// Greedy local moving until a full pass changes nothing.
///
/// Returns the labels and whether any node moved.
fn local_moving(level: &LevelGraph, config: &LouvainConfig, rng: &mut StdRng) -> (Vec<usize>, bool) {
    let n = level.node_count();
    let two_m = 2.0 * level.total_weight;
    let mut labels: Vec<usize> = (0..n).collect();
    let mut totals = level.degrees.clone();

    let mut order: Vec<usize> = (0..n).collect();
    let mut link_weight = vec![0.0f64; n];
    let mut touched: Vec<usize> = Vec::new();
    let mut any_moved = false;

    for pass in 0..config.max_passes {
        if config.shuffle {
            order.shuffle(rng);
        }

        let mut moves = 0usize;
        for &node in &order {
            let current = labels[node];
            let k = level.degrees[node];

            // Weight from node into each neighboring community, in adjacency order
            for &(neighbor, weight) in &level.adjacency[node] {
                let c = labels[neighbor];
                if link_weight[c] == 0.0 {
                    touched.push(c);
                }
                link_weight[c] += weight;
            }

            totals[current] -= k;
            let gain = |c: usize, link: f64| link - config.resolution * totals[c] * k / two_m;

            let mut best = current;
            let mut best_gain = gain(current, link_weight[current]);
            for &c in &touched {
                let candidate = gain(c, link_weight[c]);
                if candidate - best_gain > config.min_gain {
                    best = c;
                    best_gain = candidate;
                }
            }

            totals[best] += k;
            if best != current {
                labels[node] = best;
                moves += 1;
            }

            for &c in &touched {
                link_weight[c] = 0.0;
            }
            touched.clear();
        }

        log::debug!("Louvain pass {}: {} move(s)", pass + 1, moves);
        if moves == 0 {
            break;
        }
        any_moved = true;
    }

    (labels, any_moved)
}

/// Detect communities with the Louvain method.
///
/// Node visiting order is drawn from `random` when `config.shuffle` is set
/// and is index order otherwise; equal gains keep the node where it is or
/// prefer the community met first in adjacency order. The same graph, config
/// and seed therefore always yield the same partition.
pub fn louvain(graph: &CompressedGraph, config: &LouvainConfig, random: &RandomSource) -> Result<LouvainOutcome> {
    let n = graph.node_count();
    if n == 0 {
        return Err(AnalysisError::EmptyGraph);
    }

    let mut membership: Vec<usize> = (0..n).collect();
    let mut levels = Vec::new();

    if graph.edge_count() == 0 {
        log::info!("Graph has no edges; every node is its own community");
        let partition = Partition::from_dense(graph, &membership);
        return Ok(LouvainOutcome {
            partition,
            modularity: 0.0,
            levels,
        });
    }

    let mut rng = random.stream(&[streams::LOUVAIN]);
    let mut level = LevelGraph::from_graph(graph);
    let singletons: Vec<usize> = (0..n).collect();
    let mut current_modularity = level.modularity(&singletons, n, config.resolution);

    loop {
        let (labels, moved) = local_moving(&level, config, &mut rng);
        if !moved {
            break;
        }

        let (labels, community_count) = renumber(&labels);
        let next_modularity = level.modularity(&labels, community_count, config.resolution);
        if next_modularity - current_modularity < config.min_modularity_gain {
            break;
        }

        for community in &mut membership {
            *community = labels[*community];
        }
        levels.push(LevelSummary {
            communities: community_count,
            modularity: next_modularity,
        });
        log::debug!(
            "Louvain level {}: {} communities, modularity {:.6}",
            levels.len(),
            community_count,
            next_modularity
        );

        current_modularity = next_modularity;
        level = level.aggregate(&labels, community_count);
    }

    let partition = Partition::from_dense(graph, &membership);
    let modularity = modularity(graph, &partition)?;
    log::info!(
        "Louvain found {} communities in {} level(s), modularity {:.6}",
        partition.community_count(),
        levels.len(),
        modularity
    );

    Ok(LouvainOutcome {
        partition,
        modularity,
        levels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cliques() -> CompressedGraph {
        // Two 4-cliques joined by the bridge 4 - 5
        let mut edges = Vec::new();
        for group in [[1u64, 2, 3, 4], [5, 6, 7, 8]] {
            for i in 0..4 {
                for j in i + 1..4 {
                    edges.push((group[i], group[j]));
                }
            }
        }
        edges.push((4, 5));
        edges.into_iter().collect()
    }

    #[test]
    fn triangle_forms_one_community() {
        let graph: CompressedGraph = vec![(1, 2), (2, 3), (3, 1)].into_iter().collect();
        let outcome = louvain(&graph, &LouvainConfig::default(), &RandomSource::default()).unwrap();

        assert_eq!(outcome.partition.community_count(), 1);
        assert!(outcome.modularity.abs() < 1e-12);
    }

    #[test]
    fn cliques_are_separated() {
        let graph = two_cliques();
        let outcome = louvain(&graph, &LouvainConfig::default(), &RandomSource::new(9)).unwrap();
        let partition = &outcome.partition;

        assert_eq!(partition.community_count(), 2);
        assert_eq!(partition.community_of(1), partition.community_of(4));
        assert_eq!(partition.community_of(5), partition.community_of(8));
        assert_ne!(partition.community_of(1), partition.community_of(8));
        assert!(outcome.modularity > 0.4);
    }

    #[test]
    fn index_order_is_deterministic_without_shuffle() {
        let graph = two_cliques();
        let config = LouvainConfig {
            shuffle: false,
            ..LouvainConfig::default()
        };
        let a = louvain(&graph, &config, &RandomSource::new(1)).unwrap();
        let b = louvain(&graph, &config, &RandomSource::new(2)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn levels_improve_monotonically() {
        // Ring of triangles forces more than one aggregation level
        let mut edges = Vec::new();
        for t in 0..8u64 {
            let base = t * 3;
            edges.extend([(base, base + 1), (base + 1, base + 2), (base + 2, base)]);
            edges.push((base + 2, (base + 3) % 24));
        }
        let graph: CompressedGraph = edges.into_iter().collect();
        let outcome = louvain(&graph, &LouvainConfig::default(), &RandomSource::new(3)).unwrap();

        assert!(!outcome.levels.is_empty());
        for pair in outcome.levels.windows(2) {
            assert!(pair[1].modularity > pair[0].modularity);
            assert!(pair[1].communities < pair[0].communities);
        }
        let last = outcome.levels.last().unwrap();
        assert!((last.modularity - outcome.modularity).abs() < 1e-9);
    }

    #[test]
    fn edgeless_graph_keeps_singletons() {
        let mut builder = crate::graph::GraphBuilder::new();
        builder.add_node(1);
        builder.add_node(2);
        let graph = builder.build();
        let outcome = louvain(&graph, &LouvainConfig::default(), &RandomSource::default()).unwrap();

        assert_eq!(outcome.partition.community_count(), 2);
        assert_eq!(outcome.modularity, 0.0);
    }

    #[test]
    fn outcome_modularity_is_standard_under_other_resolutions() {
        let graph = two_cliques();
        let config = LouvainConfig {
            resolution: 0.5,
            ..LouvainConfig::default()
        };
        let outcome = louvain(&graph, &config, &RandomSource::new(9)).unwrap();
        assert!(!outcome.levels.is_empty());

        let standard = modularity(&graph, &outcome.partition).unwrap();
        assert!((outcome.modularity - standard).abs() < 1e-12);

        // Q_r = Q_1 + (1 - r) * sum_c (tot_c / 2m)^2
        let two_m = 2.0 * graph.edge_count() as f64;
        let mut totals = vec![0.0; outcome.partition.community_count()];
        for &id in graph.node_ids() {
            let community = outcome.partition.community_of(id).unwrap();
            totals[community] += graph.degree(id).unwrap() as f64 / two_m;
        }
        let squares: f64 = totals.iter().map(|share| share * share).sum();
        let last = outcome.levels.last().unwrap();
        assert!((last.modularity - (standard + 0.5 * squares)).abs() < 1e-9);
    }
}
