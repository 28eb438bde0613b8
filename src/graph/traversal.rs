//! Breadth-first traversal primitives

use std::collections::VecDeque;

use crate::graph::CompressedGraph;

/// Marker for nodes not reached by a traversal
pub const UNREACHED: usize = usize::MAX;

/// Result of a single-source BFS
#[derive(Debug, Clone)]
pub struct BfsResult {
    /// Hop distance from the source, [`UNREACHED`] for other components
    pub distances: Vec<usize>,

    /// Nodes in the order they were visited (source first)
    pub order: Vec<usize>,
}

impl BfsResult {
    /// Number of nodes reached, including the source
    pub fn reached(&self) -> usize {
        self.order.len()
    }

    /// Farthest reached node and its distance.
    ///
    /// Ties resolve to the first node visited at that distance.
    pub fn farthest(&self) -> (usize, usize) {
        // BFS order is non-decreasing in distance
        let mut best = self.order[0];
        for &node in &self.order {
            if self.distances[node] > self.distances[best] {
                best = node;
            }
        }
        (best, self.distances[best])
    }

    /// Sum of distances to every reached node
    pub fn distance_sum(&self) -> usize {
        self.order.iter().map(|&node| self.distances[node]).sum()
    }
}

/// Run BFS from `source` over internal indices
pub fn bfs(graph: &CompressedGraph, source: usize) -> BfsResult {
    let mut distances = vec![UNREACHED; graph.node_count()];
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    distances[source] = 0;
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        order.push(current);
        let next = distances[current] + 1;
        for &neighbor in graph.neighbor_indices(current) {
            let neighbor = neighbor as usize;
            if distances[neighbor] == UNREACHED {
                distances[neighbor] = next;
                queue.push_back(neighbor);
            }
        }
    }

    BfsResult { distances, order }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances_on_path() {
        let graph: CompressedGraph = vec![(1, 2), (2, 3), (3, 4)].into_iter().collect();
        let result = bfs(&graph, 0);

        assert_eq!(result.distances, vec![0, 1, 2, 3]);
        assert_eq!(result.farthest(), (3, 3));
        assert_eq!(result.distance_sum(), 6);
    }

    #[test]
    fn other_components_are_unreached() {
        let graph: CompressedGraph = vec![(1, 2), (3, 4)].into_iter().collect();
        let result = bfs(&graph, 0);

        assert_eq!(result.reached(), 2);
        assert_eq!(result.distances[2], UNREACHED);
    }
}
