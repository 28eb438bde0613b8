//! Batch analysis pipeline
//!
//! Stages run in order over immutable inputs. Metrics that cannot be
//! computed are recorded as such and never stop later stages; structural
//! errors (an empty graph, invalid parameters) abort the run.

use crate::centrality::{
    betweenness_centrality, closeness_centrality, degree_centrality, eigenvector_centrality, pagerank,
};
use crate::community::{louvain, Partition};
use crate::config::AnalysisConfig;
use crate::connectivity::{
    approximate_diameter, average_shortest_path_length, connected_components, largest_component,
};
use crate::diffusion::simulate_si;
use crate::error::{AnalysisError, Result};
use crate::graph::CompressedGraph;
use crate::metrics::{AnalysisReport, GraphSummary, Metric, NodeMetrics, NodeScores, SubgraphSummary};
use crate::random::RandomSource;
use crate::structure::{average_clustering, average_degree, degree_assortativity, density};

/// Output of one analysis pass
#[derive(Debug, Clone)]
pub struct Analysis {
    pub report: AnalysisReport,

    /// One record per subgraph node, in subgraph index order
    pub node_metrics: Vec<NodeMetrics>,

    /// The top-degree subgraph the per-node records describe
    pub subgraph: CompressedGraph,

    pub partition: Partition,
}

/// Summarize the full graph, with the diameter taken on its largest component
fn summarize_graph(graph: &CompressedGraph) -> Result<GraphSummary> {
    let components = connected_components(graph).count();
    let largest = largest_component(graph).ok_or(AnalysisError::EmptyGraph)?;
    log::info!(
        "Found {} connected component(s), largest has {} nodes",
        components,
        largest.len()
    );

    let core = graph.induced_subgraph(&largest)?;
    let approximate_diameter = approximate_diameter(&core);
    match &approximate_diameter {
        Metric::Computed { value } => log::info!("Approximate diameter: {}", value),
        Metric::NotComputed(reason) => log::warn!("Approximate diameter not computed: {}", reason),
    }

    Ok(GraphSummary {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        density: density(graph),
        average_degree: average_degree(graph),
        components,
        largest_component: largest.len(),
        approximate_diameter,
    })
}

fn summarize_subgraph(subgraph: &CompressedGraph, config: &AnalysisConfig) -> SubgraphSummary {
    let summary = SubgraphSummary {
        nodes: subgraph.node_count(),
        edges: subgraph.edge_count(),
        average_clustering: average_clustering(subgraph),
        degree_assortativity: degree_assortativity(subgraph),
        average_shortest_path_length: average_shortest_path_length(subgraph, config.max_exact_path_nodes),
    };

    for (name, metric) in [
        ("average clustering", &summary.average_clustering),
        ("degree assortativity", &summary.degree_assortativity),
        ("average shortest path length", &summary.average_shortest_path_length),
    ] {
        match metric {
            Metric::Computed { value } => log::info!("Subgraph {}: {:.6}", name, value),
            Metric::NotComputed(reason) => log::warn!("Subgraph {} skipped: {}", name, reason),
        }
    }

    summary
}

/// Eigenvector scores, falling back to the last iterate on non-convergence
fn eigenvector_or_best_effort(subgraph: &CompressedGraph, config: &AnalysisConfig) -> Result<(NodeScores, bool)> {
    match eigenvector_centrality(subgraph, &config.eigenvector) {
        Ok(outcome) => Ok((outcome.value, true)),
        Err(AnalysisError::Convergence {
            iterations,
            residual,
            best_effort,
            ..
        }) => {
            log::warn!(
                "Using best-effort eigenvector scores after {} iterations (residual {:e})",
                iterations,
                residual
            );
            Ok((*best_effort, false))
        }
        Err(err) => Err(err),
    }
}

/// Run every stage over `graph`
pub fn run(graph: &CompressedGraph, config: &AnalysisConfig) -> Result<Analysis> {
    config.validate()?;
    if graph.is_empty() {
        return Err(AnalysisError::EmptyGraph);
    }
    let random = RandomSource::new(config.seed);

    log::info!(
        "Analysing graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    let graph_summary = summarize_graph(graph)?;

    // Full-graph rankings
    let degree = degree_centrality(graph)?;
    let pagerank_outcome = pagerank(graph, &config.pagerank)?;
    let top_pagerank = pagerank_outcome.value.top(config.top_k);

    // Subgraph-scoped stages
    let subgraph = graph.top_degree_subgraph(config.subgraph_size);
    let subgraph_summary = summarize_subgraph(&subgraph, config);

    log::info!("Computing closeness and betweenness on the subgraph");
    let closeness = closeness_centrality(&subgraph);
    let betweenness = betweenness_centrality(&subgraph, &config.betweenness, &random);

    log::info!("Computing eigenvector centrality on the subgraph");
    let (eigenvector, eigenvector_converged) = eigenvector_or_best_effort(&subgraph, config)?;

    log::info!("Detecting communities on the subgraph");
    let communities = louvain(&subgraph, &config.louvain, &random)?;

    let node_metrics = NodeMetrics::assemble(
        graph,
        &subgraph,
        &pagerank_outcome.value,
        &eigenvector,
        &communities.partition,
    )?;

    // Seed from the best-ranked node that made it into the subgraph
    let seed = pagerank_outcome
        .value
        .top(pagerank_outcome.value.len())
        .into_iter()
        .map(|ranked| ranked.node)
        .find(|&node| subgraph.contains(node));
    let seeds: Vec<_> = seed.into_iter().collect();
    let diffusion = simulate_si(&subgraph, &seeds, &config.diffusion, &random)?;
    log::info!("Diffusion reached {} node(s)", diffusion.infected_count());

    let report = AnalysisReport {
        config: config.clone(),
        graph: graph_summary,
        subgraph: subgraph_summary,
        top_degree: degree.top(config.top_k),
        top_pagerank,
        pagerank_iterations: pagerank_outcome.iterations,
        pagerank_converged: pagerank_outcome.converged,
        top_closeness: closeness.top(config.top_k),
        top_betweenness: betweenness.top(config.top_k),
        top_eigenvector: eigenvector.top(config.top_k),
        eigenvector_converged,
        community_count: communities.partition.community_count(),
        modularity: communities.modularity,
        louvain_levels: communities.levels.len(),
        diffusion_seed: seed,
        diffusion_infected: diffusion.infected_count(),
        diffusion_history: diffusion.history,
    };

    Ok(Analysis {
        report,
        node_metrics,
        subgraph,
        partition: communities.partition,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::NotComputedReason;

    fn two_triangles() -> CompressedGraph {
        vec![(1, 2), (2, 3), (3, 1), (4, 5), (5, 6), (6, 4)].into_iter().collect()
    }

    #[test]
    fn disconnected_graph_still_runs_every_stage() {
        let graph = two_triangles();
        let analysis = run(&graph, &AnalysisConfig::default()).unwrap();
        let report = &analysis.report;

        assert_eq!(report.graph.components, 2);
        assert_eq!(report.graph.approximate_diameter, Metric::computed(1));
        assert!(matches!(
            report.subgraph.average_shortest_path_length,
            Metric::NotComputed(NotComputedReason::Disconnected { components: 2 })
        ));
        assert_eq!(report.community_count, 2);
        assert_eq!(analysis.node_metrics.len(), 6);
        assert!(report.diffusion_seed.is_some());
        assert_eq!(report.diffusion_history.len(), 11);
    }

    #[test]
    fn diameter_uses_first_of_equally_large_components() {
        // Path 1-2-3 is found before triangle 4-5-6; both have three nodes
        let graph: CompressedGraph = vec![(1, 2), (2, 3), (4, 5), (5, 6), (6, 4)].into_iter().collect();
        let summary = summarize_graph(&graph).unwrap();

        assert_eq!(summary.components, 2);
        assert_eq!(summary.largest_component, 3);
        assert_eq!(summary.approximate_diameter, Metric::computed(2));
    }

    #[test]
    fn runs_are_reproducible() {
        let graph: CompressedGraph = (0..120u64)
            .flat_map(|i| [(i, (i + 1) % 120), (i, (i * 17 + 5) % 120)])
            .collect();
        let config = AnalysisConfig {
            subgraph_size: 60,
            ..AnalysisConfig::default()
        };
        let a = run(&graph, &config).unwrap();
        let b = run(&graph, &config).unwrap();

        assert_eq!(a.report, b.report);
        assert_eq!(a.partition, b.partition);
    }

    #[test]
    fn single_node_graph_is_a_structural_error() {
        let mut builder = crate::graph::GraphBuilder::new();
        builder.add_node(1);
        let graph = builder.build();
        assert!(matches!(
            run(&graph, &AnalysisConfig::default()),
            Err(AnalysisError::TooFewNodes { .. })
        ));
    }
}
