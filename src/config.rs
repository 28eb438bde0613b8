//! Configuration management for the graph analysis pipeline

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// `PageRank` configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Probability of following a link instead of teleporting
    pub damping: f64,

    /// Maximum power iterations
    pub max_iterations: usize,

    /// Convergence tolerance on the L1 change between iterations
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 200,
            tolerance: 1e-6,
        }
    }
}

/// Eigenvector centrality configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EigenvectorConfig {
    /// Maximum power iterations
    pub max_iterations: usize,

    /// Convergence tolerance on the largest per-node change
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-6,
        }
    }
}

/// Approximate betweenness configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BetweennessConfig {
    /// Number of pivot nodes; all nodes are used when this exceeds the node count
    pub samples: usize,
}

impl Default for BetweennessConfig {
    fn default() -> Self {
        Self { samples: 300 }
    }
}

/// Louvain community detection configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LouvainConfig {
    /// Modularity resolution parameter (1.0 is standard modularity)
    pub resolution: f64,

    /// Smallest gain that justifies moving a node
    pub min_gain: f64,

    /// Smallest modularity increase that justifies another aggregation level
    pub min_modularity_gain: f64,

    /// Upper bound on local-moving passes per level
    pub max_passes: usize,

    /// Visit nodes in a seeded random order instead of index order
    pub shuffle: bool,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            min_gain: 1e-10,
            min_modularity_gain: 1e-7,
            max_passes: 1000,
            shuffle: true,
        }
    }
}

/// SI diffusion configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffusionConfig {
    /// Per-edge, per-step infection probability
    pub probability: f64,

    /// Number of synchronous steps
    pub steps: usize,
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self {
            probability: 0.05,
            steps: 10,
        }
    }
}

/// Full analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of highest-degree nodes kept in the analysed subgraph
    pub subgraph_size: usize,

    /// Length of the ranked lists in the report
    pub top_k: usize,

    /// Largest graph for which exact all-pairs path lengths are computed
    pub max_exact_path_nodes: usize,

    /// Seed for every stochastic stage
    pub seed: u64,

    pub pagerank: PageRankConfig,
    pub eigenvector: EigenvectorConfig,
    pub betweenness: BetweennessConfig,
    pub louvain: LouvainConfig,
    pub diffusion: DiffusionConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            subgraph_size: 5000,
            top_k: 10,
            max_exact_path_nodes: 10_000,
            seed: 42,
            pagerank: PageRankConfig::default(),
            eigenvector: EigenvectorConfig::default(),
            betweenness: BetweennessConfig::default(),
            louvain: LouvainConfig::default(),
            diffusion: DiffusionConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Check every parameter range before any stage runs
    pub fn validate(&self) -> Result<()> {
        if self.subgraph_size == 0 {
            return Err(invalid("subgraph_size", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.pagerank.damping) {
            return Err(invalid("pagerank.damping", "must lie in [0, 1]"));
        }
        if !(self.pagerank.tolerance > 0.0) {
            return Err(invalid("pagerank.tolerance", "must be positive"));
        }
        if !(self.eigenvector.tolerance > 0.0) {
            return Err(invalid("eigenvector.tolerance", "must be positive"));
        }
        if self.betweenness.samples == 0 {
            return Err(invalid("betweenness.samples", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.diffusion.probability) {
            return Err(invalid("diffusion.probability", "must lie in [0, 1]"));
        }
        if !(self.louvain.resolution > 0.0) {
            return Err(invalid("louvain.resolution", "must be positive"));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: &str) -> AnalysisError {
    AnalysisError::InvalidParameter {
        name,
        reason: reason.to_string(),
    }
}
