//! Stochastic SI (susceptible-infected) spread simulation.
//!
//! Updates are synchronous: every step reads the previous snapshot and all
//! new infections are applied together at the end of the step. Each
//! infected node draws from its own stream addressed by (seed, step, node),
//! so the per-node scans can run in parallel and still reproduce exactly.

use std::collections::BTreeSet;

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::DiffusionConfig;
use crate::error::{AnalysisError, Result};
use crate::graph::{CompressedGraph, NodeId};
use crate::random::{streams, RandomSource};

/// Node state in the SI model; `Infected` is absorbing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeState {
    Susceptible,
    Infected,
}

/// Result of a diffusion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffusionOutcome {
    /// Infected nodes after the last step
    pub infected: BTreeSet<NodeId>,

    /// Infected count after each step, starting with the seed count
    pub history: Vec<usize>,
}

impl DiffusionOutcome {
    pub fn infected_count(&self) -> usize {
        self.infected.len()
    }
}

/// Simulate SI spread from `seeds` for `config.steps` steps.
///
/// Every (infected node, susceptible neighbor) pair gets an independent
/// Bernoulli trial with probability `config.probability` in each step.
pub fn simulate_si(
    graph: &CompressedGraph,
    seeds: &[NodeId],
    config: &DiffusionConfig,
    random: &RandomSource,
) -> Result<DiffusionOutcome> {
    if !(0.0..=1.0).contains(&config.probability) {
        return Err(AnalysisError::InvalidParameter {
            name: "diffusion.probability",
            reason: format!("{} is not in [0, 1]", config.probability),
        });
    }

    let mut state = vec![NodeState::Susceptible; graph.node_count()];
    for &seed in seeds {
        state[graph.index_of(seed)?] = NodeState::Infected;
    }

    let mut infected: Vec<usize> = (0..state.len())
        .filter(|&i| state[i] == NodeState::Infected)
        .collect();
    let mut history = Vec::with_capacity(config.steps + 1);
    history.push(infected.len());

    for step in 0..config.steps {
        let snapshot = &state;
        let newly: Vec<Vec<usize>> = infected
            .par_iter()
            .map(|&node| {
                if config.probability == 0.0 {
                    return Vec::new();
                }
                let mut rng = random.stream(&[streams::DIFFUSION, step as u64, node as u64]);
                graph
                    .neighbor_indices(node)
                    .iter()
                    .map(|&neighbor| neighbor as usize)
                    .filter(|&neighbor| snapshot[neighbor] == NodeState::Susceptible)
                    .filter(|_| rng.gen_bool(config.probability))
                    .collect()
            })
            .collect();

        for neighbor in newly.into_iter().flatten() {
            if state[neighbor] == NodeState::Susceptible {
                state[neighbor] = NodeState::Infected;
                infected.push(neighbor);
            }
        }
        // Keep index order so per-node streams line up across runs
        infected.sort_unstable();

        log::debug!("SI step {}: {} infected", step + 1, infected.len());
        history.push(infected.len());
    }

    let infected = infected.into_iter().map(|i| graph.id_of(i)).collect();
    Ok(DiffusionOutcome { infected, history })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star() -> CompressedGraph {
        (1..=4).map(|leaf| (0, leaf)).collect()
    }

    #[test]
    fn full_probability_infects_star_in_one_step() {
        let config = DiffusionConfig {
            probability: 1.0,
            steps: 1,
        };
        let outcome = simulate_si(&star(), &[0], &config, &RandomSource::default()).unwrap();

        assert_eq!(outcome.infected, (0..=4).collect());
        assert_eq!(outcome.history, vec![1, 5]);
    }

    #[test]
    fn zero_probability_keeps_seeds() {
        let config = DiffusionConfig {
            probability: 0.0,
            steps: 25,
        };
        let outcome = simulate_si(&star(), &[2, 3], &config, &RandomSource::default()).unwrap();
        assert_eq!(outcome.infected, [2, 3].into_iter().collect());
    }

    #[test]
    fn new_infections_wait_for_the_next_step() {
        // Path 1 - 2 - 3 - 4: one hop per step at p = 1
        let graph: CompressedGraph = vec![(1, 2), (2, 3), (3, 4)].into_iter().collect();
        let config = DiffusionConfig {
            probability: 1.0,
            steps: 2,
        };
        let outcome = simulate_si(&graph, &[1], &config, &RandomSource::default()).unwrap();
        assert_eq!(outcome.infected, [1, 2, 3].into_iter().collect());
    }

    #[test]
    fn each_infected_neighbor_gets_its_own_trial() {
        // 1 - 3 - 2 with both ends infected: P(3) = 1 - 0.7^2 = 0.51
        let graph: CompressedGraph = vec![(1, 3), (3, 2)].into_iter().collect();
        let config = DiffusionConfig {
            probability: 0.3,
            steps: 1,
        };

        let runs = 4000;
        let hits = (0..runs)
            .filter(|&seed| {
                simulate_si(&graph, &[1, 2], &config, &RandomSource::new(seed))
                    .unwrap()
                    .infected
                    .contains(&3)
            })
            .count();
        let rate = hits as f64 / runs as f64;

        assert!((rate - 0.51).abs() < 0.04, "infection rate {}", rate);
        assert!(rate > 0.4);
    }

    #[test]
    fn same_seed_same_outcome() {
        let graph: CompressedGraph = (0..200u64).map(|i| (i, (i * 13 + 5) % 200)).collect();
        let config = DiffusionConfig {
            probability: 0.3,
            steps: 6,
        };
        let a = simulate_si(&graph, &[0], &config, &RandomSource::new(11)).unwrap();
        let b = simulate_si(&graph, &[0], &config, &RandomSource::new(11)).unwrap();
        assert_eq!(a, b);
        assert!(a.history.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn unknown_seed_is_not_found() {
        let result = simulate_si(&star(), &[99], &DiffusionConfig::default(), &RandomSource::default());
        assert!(matches!(result, Err(AnalysisError::NodeNotFound(99))));
    }
}
