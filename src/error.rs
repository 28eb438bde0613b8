//! Error taxonomy for the analysis engine

use thiserror::Error;

use crate::graph::NodeId;
use crate::metrics::NodeScores;

/// Errors raised by graph algorithms.
///
/// Conditions where a metric simply cannot be computed (a disconnected graph
/// for the diameter, for instance) are not errors; they are reported through
/// [`crate::metrics::Metric::NotComputed`].
#[derive(Error, Debug, Clone)]
pub enum AnalysisError {
    /// The graph has no nodes
    #[error("graph is empty")]
    EmptyGraph,

    /// The graph is too small for the requested metric
    #[error("graph has {found} node(s), at least {required} required")]
    TooFewNodes { required: usize, found: usize },

    /// Lookup of an id that was never inserted
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// A configuration value is out of range
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// An iterative algorithm did not reach its tolerance.
    ///
    /// The last iterate is kept so callers can report it as a best-effort result.
    #[error("{algorithm} did not converge after {iterations} iterations (residual {residual:e})")]
    Convergence {
        algorithm: &'static str,
        iterations: usize,
        residual: f64,
        best_effort: Box<NodeScores>,
    },

    /// A per-node record could not be assembled
    #[error("node {node} has no {metric} value")]
    MissingMetric { node: NodeId, metric: &'static str },
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
