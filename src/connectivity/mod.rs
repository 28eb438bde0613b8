//! Connected components and distance-based graph measures

use rayon::prelude::*;

use crate::graph::traversal::{bfs, UNREACHED};
use crate::graph::{CompressedGraph, NodeId};
use crate::metrics::{Metric, NotComputedReason};

/// Lazy sequence of connected components.
///
/// Each call to `next` runs one BFS from the lowest-index unvisited node, so
/// components come out in index order of their first node and every node is
/// visited exactly once.
pub struct Components<'a> {
    graph: &'a CompressedGraph,
    visited: Vec<bool>,
    cursor: usize,
}

impl Iterator for Components<'_> {
    type Item = Vec<NodeId>;

    fn next(&mut self) -> Option<Vec<NodeId>> {
        while self.cursor < self.graph.node_count() && self.visited[self.cursor] {
            self.cursor += 1;
        }
        if self.cursor == self.graph.node_count() {
            return None;
        }

        let mut members = Vec::new();
        let mut queue = std::collections::VecDeque::new();
        self.visited[self.cursor] = true;
        queue.push_back(self.cursor);

        while let Some(node) = queue.pop_front() {
            members.push(self.graph.id_of(node));
            for &neighbor in self.graph.neighbor_indices(node) {
                let neighbor = neighbor as usize;
                if !self.visited[neighbor] {
                    self.visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }

        Some(members)
    }
}

/// Partition the graph into connected components
pub fn connected_components(graph: &CompressedGraph) -> Components<'_> {
    Components {
        graph,
        visited: vec![false; graph.node_count()],
        cursor: 0,
    }
}

/// Largest connected component; the first one found wins ties
pub fn largest_component(graph: &CompressedGraph) -> Option<Vec<NodeId>> {
    connected_components(graph).fold(None, |best: Option<Vec<NodeId>>, component| match best {
        Some(current) if current.len() >= component.len() => Some(current),
        _ => Some(component),
    })
}

/// Double-sweep lower bound on the diameter.
///
/// BFS from the first node finds the farthest node A, a second BFS from A
/// finds the farthest node B, and distance(A, B) is reported.
pub fn approximate_diameter(graph: &CompressedGraph) -> Metric<usize> {
    if graph.is_empty() {
        return Metric::NotComputed(NotComputedReason::EmptyGraph);
    }

    let first = bfs(graph, 0);
    if first.reached() < graph.node_count() {
        let components = connected_components(graph).count();
        log::debug!("Diameter not computable: {} components", components);
        return Metric::NotComputed(NotComputedReason::Disconnected { components });
    }

    let (a, _) = first.farthest();
    let (b, distance) = bfs(graph, a).farthest();
    log::debug!(
        "Double sweep: {} -> {} at distance {}",
        graph.id_of(a),
        graph.id_of(b),
        distance
    );

    Metric::computed(distance)
}

/// Exact mean shortest-path length over all ordered node pairs.
///
/// Requires a connected graph with at least two nodes and at most
/// `max_nodes` nodes, since it runs one BFS per node.
pub fn average_shortest_path_length(graph: &CompressedGraph, max_nodes: usize) -> Metric<f64> {
    let n = graph.node_count();
    if n == 0 {
        return Metric::NotComputed(NotComputedReason::EmptyGraph);
    }
    if n == 1 {
        return Metric::computed(0.0);
    }
    if n > max_nodes {
        return Metric::NotComputed(NotComputedReason::TooLarge {
            nodes: n,
            limit: max_nodes,
        });
    }

    let sums: Vec<Option<usize>> = (0..n)
        .into_par_iter()
        .map(|source| {
            let result = bfs(graph, source);
            if result.distances.contains(&UNREACHED) {
                None
            } else {
                Some(result.distance_sum())
            }
        })
        .collect();

    let mut total = 0usize;
    for sum in sums {
        match sum {
            Some(sum) => total += sum,
            None => {
                let components = connected_components(graph).count();
                return Metric::NotComputed(NotComputedReason::Disconnected { components });
            }
        }
    }

    Metric::computed(total as f64 / (n * (n - 1)) as f64)
}
