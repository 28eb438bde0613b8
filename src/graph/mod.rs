//! Graph representation and traversal module

pub mod builder;
pub mod compressed;
pub mod subgraph;
pub mod traversal;

pub use builder::GraphBuilder;
pub use compressed::{CompressedGraph, Neighbors};

/// Opaque external node identifier
pub type NodeId = u64;
