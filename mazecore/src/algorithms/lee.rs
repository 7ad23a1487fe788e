use super::{Exploration, Solver};
use crate::graph::Graph;

/// Lee's wave routing algorithm.
///
/// First every cell reachable from the entrance gets labeled with its distance, wave after wave,
/// until the exit is labeled. The path is then traced back from the exit, always stepping to a
/// neighbor whose label is one lower.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lee;

impl Lee {
    /// Labels cells by distance from `entrance`, stopping after the wave that reaches `exit`.
    /// Returns the labels and the cells in the order they were labeled.
    pub fn flood(graph: &Graph, entrance: usize, exit: usize) -> (Vec<Option<usize>>, Vec<usize>) {
        let mut labels = vec![None; graph.vertex_count()];
        let mut visited = vec![entrance];
        labels[entrance] = Some(0);

        let mut wave = vec![entrance];
        let mut label = 0;
        while !wave.is_empty() && labels[exit].is_none() {
            label += 1;

            let mut next_wave = Vec::new();
            for &cell in &wave {
                for next in graph.neighbors(cell) {
                    if labels[next].is_none() {
                        labels[next] = Some(label);
                        next_wave.push(next);
                    }
                }
            }

            visited.extend_from_slice(&next_wave);
            wave = next_wave;
        }

        (labels, visited)
    }
}

impl Solver for Lee {
    fn solve(&mut self, graph: &Graph, entrance: usize, exit: usize) -> Exploration {
        let (labels, visited) = Lee::flood(graph, entrance, exit);

        let Some(mut label) = labels[exit] else {
            return Exploration::unreachable(visited);
        };

        let mut path = vec![exit];
        let mut current = exit;
        while label > 0 {
            let lower = graph
                .neighbors(current)
                .find(|&n| labels[n] == Some(label - 1));

            match lower {
                Some(next) => {
                    path.push(next);
                    current = next;
                    label -= 1;
                }
                // labels always decrease towards the entrance, so this can't happen
                None => return Exploration::unreachable(visited),
            }
        }
        path.reverse();

        Exploration { visited, path }
    }
}
