//! End-to-end checks on small graphs with known answers

use graph_insight::centrality::{degree_centrality, eigenvector_centrality, pagerank};
use graph_insight::community::louvain;
use graph_insight::config::{DiffusionConfig, EigenvectorConfig, LouvainConfig, PageRankConfig};
use graph_insight::connectivity::{approximate_diameter, connected_components};
use graph_insight::diffusion::simulate_si;
use graph_insight::{CompressedGraph, Metric, NotComputedReason, RandomSource};

fn triangle() -> CompressedGraph {
    vec![(1, 2), (2, 3), (3, 1)].into_iter().collect()
}

fn two_triangles() -> CompressedGraph {
    vec![(1, 2), (2, 3), (3, 1), (4, 5), (5, 6), (6, 4)].into_iter().collect()
}

/// Loosely clustered graph: a ring of 5-cliques with one chord between neighbors
fn clique_ring(cliques: u64) -> CompressedGraph {
    let mut edges = Vec::new();
    for c in 0..cliques {
        let base = c * 5;
        for i in 0..5 {
            for j in i + 1..5 {
                edges.push((base + i, base + j));
            }
        }
        edges.push((base + 4, ((c + 1) % cliques) * 5));
    }
    edges.into_iter().collect()
}

#[test]
fn triangle_scenario() {
    let graph = triangle();

    let degree = degree_centrality(&graph).unwrap();
    assert!(degree.iter().all(|(_, score)| score == 1.0));

    let ranks = pagerank(&graph, &PageRankConfig::default()).unwrap();
    assert!(ranks.value.iter().all(|(_, score)| (score - 1.0 / 3.0).abs() < 1e-6));

    let communities = louvain(&graph, &LouvainConfig::default(), &RandomSource::default()).unwrap();
    assert_eq!(communities.partition.community_count(), 1);
    assert!(communities.modularity.abs() < 1e-12);
}

#[test]
fn disjoint_triangles_scenario() {
    let graph = two_triangles();

    let components: Vec<_> = connected_components(&graph).collect();
    assert_eq!(components.len(), 2);
    assert!(components.iter().all(|component| component.len() == 3));

    assert_eq!(
        approximate_diameter(&graph),
        Metric::NotComputed(NotComputedReason::Disconnected { components: 2 })
    );
    for component in &components {
        let sub = graph.induced_subgraph(component).unwrap();
        assert_eq!(approximate_diameter(&sub), Metric::computed(1));
    }
}

#[test]
fn star_diffusion_scenario() {
    let graph: CompressedGraph = (1..=4).map(|leaf| (0, leaf)).collect();
    let config = DiffusionConfig {
        probability: 1.0,
        steps: 1,
    };
    let outcome = simulate_si(&graph, &[0], &config, &RandomSource::default()).unwrap();
    assert_eq!(outcome.infected, (0..=4).collect());
}

#[test]
fn fixed_seed_reproduces_bit_identical_results() {
    let graph = clique_ring(12);

    let a = louvain(&graph, &LouvainConfig::default(), &RandomSource::new(2024)).unwrap();
    let b = louvain(&graph, &LouvainConfig::default(), &RandomSource::new(2024)).unwrap();
    assert_eq!(a.partition, b.partition);
    assert_eq!(a.modularity.to_bits(), b.modularity.to_bits());

    let first = pagerank(&graph, &PageRankConfig::default()).unwrap();
    let second = pagerank(&graph, &PageRankConfig::default()).unwrap();
    for ((id_a, score_a), (id_b, score_b)) in first.value.iter().zip(second.value.iter()) {
        assert_eq!(id_a, id_b);
        assert_eq!(score_a.to_bits(), score_b.to_bits());
    }
}

#[test]
fn clique_ring_communities_match_cliques() {
    let graph = clique_ring(12);
    let outcome = louvain(&graph, &LouvainConfig::default(), &RandomSource::new(1)).unwrap();

    // Every clique stays together
    for c in 0..12u64 {
        let community = outcome.partition.community_of(c * 5);
        for i in 1..5 {
            assert_eq!(outcome.partition.community_of(c * 5 + i), community);
        }
    }
    assert!(outcome.partition.community_count() >= 4);
    assert!(outcome.modularity > 0.7);
}

#[test]
fn eigenvector_on_clique_ring_is_uniform_within_symmetry() {
    let graph = clique_ring(6);
    let config = EigenvectorConfig {
        max_iterations: 5000,
        tolerance: 1e-12,
    };
    let outcome = eigenvector_centrality(&graph, &config).unwrap();

    // The ring is vertex-transitive per clique position
    let bridge_a = outcome.value.get(4).unwrap();
    let bridge_b = outcome.value.get(9).unwrap();
    assert!((bridge_a - bridge_b).abs() < 1e-9);
    assert!(outcome.value.get(4).unwrap() > outcome.value.get(2).unwrap());
}

#[test]
fn components_agree_with_petgraph() {
    use petgraph::graph::UnGraph;

    let graph: CompressedGraph = vec![(1, 2), (3, 4), (4, 5), (6, 7), (7, 8), (8, 6), (9, 10)]
        .into_iter()
        .collect();

    let mut reference = UnGraph::<(), ()>::new_undirected();
    let nodes: Vec<_> = (0..graph.node_count()).map(|_| reference.add_node(())).collect();
    for (a, b) in graph.edge_indices() {
        reference.add_edge(nodes[a], nodes[b], ());
    }

    assert_eq!(
        connected_components(&graph).count(),
        petgraph::algo::connected_components(&reference)
    );
}
