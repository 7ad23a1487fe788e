use log::debug;
use rand::{seq::SliceRandom, thread_rng, Rng as _, SeedableRng as _};

use super::{Generator, Random};
use crate::{cell::Direction, disjoint_set::DisjointSet, error::Result, graph::Graph};

/// Randomized Kruskal's algorithm.
///
/// Every wall between two adjacent cells is a candidate passage. Candidates are shuffled and
/// then opened one by one, unless their cells are already connected.
#[derive(Debug, Clone)]
pub struct Kruskal {
    seed: u64,
}

impl Kruskal {
    /// When `seed` is `None`, a random one is drawn and kept, see [`Kruskal::seed`].
    pub fn new(seed: Option<u64>) -> Self {
        Kruskal {
            seed: seed.unwrap_or_else(|| thread_rng().gen()),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Generator for Kruskal {
    fn generate(&mut self, graph: &mut Graph) -> Result<()> {
        let mut rng = Random::seed_from_u64(self.seed);
        let vertex_count = graph.vertex_count();

        let grid: &Graph = graph;
        let mut walls: Vec<(usize, usize)> = (0..vertex_count)
            .flat_map(|v| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter_map(move |dir| grid.adjacent(v, dir).map(|n| (v, n)))
            })
            .collect();
        let starter_wall_count = walls.len();

        walls.shuffle(&mut rng);

        let mut sets = DisjointSet::new(vertex_count);
        for (from, to) in walls {
            if graph.edge_count() + 1 >= vertex_count {
                break;
            }

            if sets.union(from, to) {
                graph.add_edge(from, to, Graph::DEFAULT_WEIGHT)?;
            }
        }

        debug!(
            "kruskal: {} passages opened out of {} walls, seed {}",
            graph.edge_count(),
            starter_wall_count,
            self.seed
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_spanning_tree() {
        for (w, h) in [(2, 2), (2, 7), (9, 3), (16, 16)] {
            let mut graph = Graph::new(w, h);
            Kruskal::new(Some(42)).generate(&mut graph).unwrap();
            assert_eq!(graph.edge_count(), w * h - 1);
            assert!(graph.is_spanning_tree());
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let mut a = Graph::new(12, 8);
        let mut b = Graph::new(12, 8);
        Kruskal::new(Some(7)).generate(&mut a).unwrap();
        Kruskal::new(Some(7)).generate(&mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn random_seed_is_kept() {
        let mut kruskal = Kruskal::new(None);
        let seed = kruskal.seed();

        let mut a = Graph::new(6, 6);
        let mut b = Graph::new(6, 6);
        kruskal.generate(&mut a).unwrap();
        Kruskal::new(Some(seed)).generate(&mut b).unwrap();
        assert_eq!(a, b);
    }
}
