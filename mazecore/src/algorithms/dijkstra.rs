use std::{cmp::Reverse, collections::BinaryHeap};

use super::{backtrack, Exploration, Solver};
use crate::graph::Graph;

/// Lowest total weight search. Equal distances are extracted in insertion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl Solver for Dijkstra {
    fn solve(&mut self, graph: &Graph, entrance: usize, exit: usize) -> Exploration {
        let mut distances = vec![u64::MAX; graph.vertex_count()];
        let mut predecessors = vec![None; graph.vertex_count()];
        let mut settled = vec![false; graph.vertex_count()];
        let mut visited = Vec::new();

        let mut sequence = 0u64;
        let mut heap = BinaryHeap::new();
        distances[entrance] = 0;
        heap.push(Reverse((0u64, sequence, entrance)));

        while let Some(Reverse((distance, _, current))) = heap.pop() {
            if settled[current] || distance > distances[current] {
                continue;
            }
            settled[current] = true;
            visited.push(current);

            if current == exit {
                return Exploration {
                    path: backtrack(&predecessors, entrance, exit),
                    visited,
                };
            }

            for (next, weight) in graph.weighted_neighbors(current) {
                let candidate = distance + weight as u64;
                if !settled[next] && candidate < distances[next] {
                    distances[next] = candidate;
                    predecessors[next] = Some(current);
                    sequence += 1;
                    heap.push(Reverse((candidate, sequence, next)));
                }
            }
        }

        Exploration::unreachable(visited)
    }
}
