//! Centrality engine

pub mod betweenness;
pub mod closeness;
pub mod degree;
pub mod eigenvector;
pub mod pagerank;

pub use betweenness::betweenness_centrality;
pub use closeness::closeness_centrality;
pub use degree::degree_centrality;
pub use eigenvector::eigenvector_centrality;
pub use pagerank::pagerank;
