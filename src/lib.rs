//! Structural analysis of large undirected graphs: connectivity, centrality,
//! community structure and SI diffusion

pub mod centrality;
pub mod community;
pub mod config;
pub mod connectivity;
pub mod data;
pub mod diffusion;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod pipeline;
pub mod random;
pub mod storage;
pub mod structure;

pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use graph::{CompressedGraph, GraphBuilder, NodeId};
pub use metrics::{IterationOutcome, Metric, NodeScores, NotComputedReason};
pub use random::RandomSource;
