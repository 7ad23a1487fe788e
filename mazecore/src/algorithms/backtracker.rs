use super::{Exploration, Solver};
use crate::graph::Graph;

/// Walks into the first unvisited neighbor and steps back out of dead ends.
///
/// Unlike [`DepthFirstSearch`](super::DepthFirstSearch) it keeps no predecessors, the
/// walker's stack is the path once the exit is reached.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveBacktracker;

impl Solver for RecursiveBacktracker {
    fn solve(&mut self, graph: &Graph, entrance: usize, exit: usize) -> Exploration {
        let mut seen = vec![false; graph.vertex_count()];
        let mut visited = vec![entrance];
        seen[entrance] = true;

        let mut stack = vec![entrance];
        while let Some(&current) = stack.last() {
            if current == exit {
                return Exploration {
                    path: stack,
                    visited,
                };
            }

            match graph.neighbors(current).find(|&n| !seen[n]) {
                Some(next) => {
                    seen[next] = true;
                    visited.push(next);
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }

        Exploration::unreachable(visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backs_out_of_dead_ends() {
        // 0 - 1 - 2
        // |
        // 3 - 4 - 5
        let mut graph = Graph::new(3, 2);
        for (u, v) in [(0, 1), (1, 2), (0, 3), (3, 4), (4, 5)] {
            graph.add_edge(u, v, 1).unwrap();
        }

        let result = RecursiveBacktracker.solve(&graph, 0, 5);
        assert_eq!(result.path, vec![0, 3, 4, 5]);
        assert_eq!(result.visited, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn takes_first_route_on_cycles() {
        // 0 - 1 - 2
        // |       |
        // 3 - 4 - 5
        let mut graph = Graph::new(3, 2);
        for (u, v) in [(0, 1), (1, 2), (0, 3), (3, 4), (4, 5), (2, 5)] {
            graph.add_edge(u, v, 1).unwrap();
        }

        let result = RecursiveBacktracker.solve(&graph, 0, 4);
        assert_eq!(result.path, vec![0, 1, 2, 5, 4]);
    }

    #[test]
    fn unreachable_exit() {
        let mut graph = Graph::new(3, 1);
        graph.add_edge(0, 1, 1).unwrap();

        let result = RecursiveBacktracker.solve(&graph, 0, 2);
        assert!(result.path.is_empty());
        assert_eq!(result.visited, vec![0, 1]);
    }
}
