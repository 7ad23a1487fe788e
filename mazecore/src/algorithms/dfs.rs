use super::{backtrack, Exploration, Solver};
use crate::graph::Graph;

/// Stack driven search. Finds *a* path, not necessarily the shortest one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstSearch;

impl Solver for DepthFirstSearch {
    fn solve(&mut self, graph: &Graph, entrance: usize, exit: usize) -> Exploration {
        let mut predecessors = vec![None; graph.vertex_count()];
        let mut seen = vec![false; graph.vertex_count()];
        let mut visited = Vec::new();

        let mut stack = vec![(entrance, None)];
        while let Some((current, parent)) = stack.pop() {
            if seen[current] {
                continue;
            }
            seen[current] = true;
            predecessors[current] = parent;
            visited.push(current);

            if current == exit {
                return Exploration {
                    path: backtrack(&predecessors, entrance, exit),
                    visited,
                };
            }

            // reversed, so the first neighbor is explored first
            let unseen: Vec<_> = graph.neighbors(current).filter(|&n| !seen[n]).collect();
            stack.extend(unseen.into_iter().rev().map(|n| (n, Some(current))));
        }

        Exploration::unreachable(visited)
    }
}
