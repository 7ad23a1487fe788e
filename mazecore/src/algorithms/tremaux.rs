use hashbrown::HashMap;

use super::{Exploration, Solver};
use crate::graph::Graph;

/// Trémaux's marking algorithm.
///
/// Walks the maze one passage at a time and only remembers how many times each passage was
/// walked through. Works on any connected maze, cycles included.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tremaux;

fn passage(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

impl Solver for Tremaux {
    fn solve(&mut self, graph: &Graph, entrance: usize, exit: usize) -> Exploration {
        let mut marks: HashMap<(usize, usize), u8> = HashMap::new();
        let mut seen = vec![false; graph.vertex_count()];

        // cells joined by passages marked once, entrance to current position
        let mut route = vec![entrance];
        let mut visited = vec![entrance];
        seen[entrance] = true;

        let mut current = entrance;
        let mut turn_back = false;
        while current != exit {
            let back = route.len().checked_sub(2).map(|i| route[i]);
            let next = if turn_back {
                back
            } else {
                graph
                    .neighbors(current)
                    .find(|&n| !marks.contains_key(&passage(current, n)))
                    .or(back)
            };

            let Some(next) = next else {
                // every passage around the entrance is marked twice
                return Exploration::unreachable(visited);
            };

            let mark = marks.entry(passage(current, next)).or_insert(0);
            *mark += 1;
            if *mark == 1 {
                route.push(next);
                turn_back = seen[next];
            } else {
                route.pop();
                turn_back = false;
            }

            seen[next] = true;
            visited.push(next);
            current = next;
        }

        Exploration {
            visited,
            path: route,
        }
    }
}
