use hashbrown::HashMap;

use super::{Exploration, Solver};
use crate::{cell::Direction, graph::Graph};

/// Which wall the follower keeps touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hand {
    #[default]
    Right,
    Left,
}

impl Hand {
    /// Directions to try, in order of preference, when facing `facing`.
    fn preference(self, facing: Direction) -> [Direction; 4] {
        match self {
            Hand::Right => [facing.turn_right(), facing, facing.turn_left(), facing.reverse()],
            Hand::Left => [facing.turn_left(), facing, facing.turn_right(), facing.reverse()],
        }
    }
}

/// Hand-on-wall follower.
///
/// Precondition: the maze has no cycles, as with every maze [`Kruskal`](super::Kruskal)
/// produces. A tree walk crosses each passage at most twice, so it reaches the exit in fewer
/// than `4 * vertex_count` steps. Hitting that many steps means the precondition was broken,
/// the walk is then abandoned and no path is reported. Callers wanting a tighter step budget
/// enforce it outside the solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallFollower {
    pub hand: Hand,
}

impl WallFollower {
    pub fn new(hand: Hand) -> Self {
        WallFollower { hand }
    }
}

impl Solver for WallFollower {
    fn solve(&mut self, graph: &Graph, entrance: usize, exit: usize) -> Exploration {
        let max_steps = 4 * graph.vertex_count();

        let mut visited = vec![entrance];
        let mut route = vec![entrance];
        // route index of every cell on the current route
        let mut positions: HashMap<usize, usize> = HashMap::from([(entrance, 0)]);

        let mut current = entrance;
        let mut facing = Direction::Up;
        for _ in 0..max_steps {
            if current == exit {
                return Exploration {
                    visited,
                    path: route,
                };
            }

            let Some(dir) = self
                .hand
                .preference(facing)
                .into_iter()
                .find(|&dir| graph.is_open(current, dir))
            else {
                // walled in
                return Exploration::unreachable(visited);
            };
            let Some(next) = graph.adjacent(current, dir) else {
                return Exploration::unreachable(visited);
            };

            // walking back over the route cuts the dead end off
            match positions.get(&next).copied() {
                Some(at) => {
                    for dropped in route.drain(at + 1..) {
                        positions.remove(&dropped);
                    }
                }
                None => {
                    positions.insert(next, route.len());
                    route.push(next);
                }
            }

            visited.push(next);
            facing = dir;
            current = next;
        }

        if current == exit {
            return Exploration {
                visited,
                path: route,
            };
        }

        log::warn!("wall follower gave up after {max_steps} steps, maze likely has cycles");
        Exploration::unreachable(visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comb() -> Graph {
        // 0   1   2
        // |   |   |
        // 3 - 4 - 5
        let mut graph = Graph::new(3, 2);
        for (u, v) in [(0, 3), (1, 4), (2, 5), (3, 4), (4, 5)] {
            graph.add_edge(u, v, 1).unwrap();
        }
        graph
    }

    #[test]
    fn right_hand() {
        let result = WallFollower::default().solve(&comb(), 2, 0);
        assert_eq!(result.visited, vec![2, 5, 4, 1, 4, 3, 0]);
        assert_eq!(result.path, vec![2, 5, 4, 3, 0]);
    }

    #[test]
    fn left_hand() {
        let result = WallFollower::new(Hand::Left).solve(&comb(), 0, 2);
        assert_eq!(result.visited, vec![0, 3, 4, 1, 4, 5, 2]);
        assert_eq!(result.path, vec![0, 3, 4, 5, 2]);
    }

    #[test]
    fn gives_up_on_loops() {
        // 0 - 1 - 2
        // |   |   |
        // 3   4   5
        // |       |
        // 6 - 7 - 8
        let mut graph = Graph::new(3, 3);
        for (u, v) in [(0, 1), (1, 2), (0, 3), (2, 5), (3, 6), (5, 8), (6, 7), (7, 8), (1, 4)] {
            graph.add_edge(u, v, 1).unwrap();
        }

        // the spur to 4 is always on the right, the left hand circles the ring forever
        let result = WallFollower::new(Hand::Left).solve(&graph, 0, 4);
        assert!(result.path.is_empty());
        assert_eq!(result.visited.len(), 4 * 9 + 1);

        let result = WallFollower::new(Hand::Right).solve(&graph, 0, 4);
        assert_eq!(result.path, vec![0, 1, 4]);
    }

    #[test]
    fn walled_in() {
        let graph = Graph::new(2, 2);
        let result = WallFollower::default().solve(&graph, 0, 3);
        assert!(result.path.is_empty());
        assert_eq!(result.visited, vec![0]);
    }
}
