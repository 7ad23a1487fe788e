use std::collections::VecDeque;

use super::{backtrack, Exploration, Solver};
use crate::graph::Graph;

/// Queue driven search, finds a path with the fewest passages.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirstSearch;

impl Solver for BreadthFirstSearch {
    fn solve(&mut self, graph: &Graph, entrance: usize, exit: usize) -> Exploration {
        let mut predecessors = vec![None; graph.vertex_count()];
        let mut discovered = vec![false; graph.vertex_count()];
        let mut visited = Vec::new();

        let mut queue = VecDeque::from([entrance]);
        discovered[entrance] = true;

        while let Some(current) = queue.pop_front() {
            visited.push(current);
            if current == exit {
                return Exploration {
                    path: backtrack(&predecessors, entrance, exit),
                    visited,
                };
            }

            for next in graph.neighbors(current) {
                if !discovered[next] {
                    discovered[next] = true;
                    predecessors[next] = Some(current);
                    queue.push_back(next);
                }
            }
        }

        Exploration::unreachable(visited)
    }
}
