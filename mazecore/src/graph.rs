use std::collections::VecDeque;

use crate::{
    cell::{Cell, Direction},
    error::{MazeError, Result},
};

/// Bitmask of open passages of a single cell, one bit per [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PassageMask(pub u8);

impl PassageMask {
    pub fn is_open(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn open(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
}

/// Undirected weighted graph over the cells of a `width` x `height` grid.
///
/// Vertex of cell `(row, col)` is `row * width + col`. An edge may only join grid-adjacent
/// cells, so every vertex keeps one optional weight per [`Direction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    width: usize,
    height: usize,
    passages: Vec<[Option<u32>; 4]>,
    edge_count: usize,
}

impl Graph {
    pub const DEFAULT_WEIGHT: u32 = 1;

    /// Fully walled graph: every vertex is present, there are no edges.
    ///
    /// Sizes are not validated here, [`Maze`](crate::Maze) checks them before building a graph.
    pub fn new(width: usize, height: usize) -> Self {
        Graph {
            width,
            height,
            passages: vec![[None; 4]; width * height],
            edge_count: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn vertex_count(&self) -> usize {
        self.passages.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn index(&self, cell: Cell) -> usize {
        cell.row * self.width + cell.col
    }

    pub fn cell(&self, vertex: usize) -> Cell {
        Cell::new(vertex / self.width, vertex % self.width)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.is_within(self.width, self.height)
    }

    /// Vertex next to `vertex` in the given direction, ignoring walls.
    pub fn adjacent(&self, vertex: usize, dir: Direction) -> Option<usize> {
        self.cell(vertex)
            .step(dir, self.width, self.height)
            .map(|cell| self.index(cell))
    }

    /// Direction of the grid step from `from` to `to`, if the two vertices are adjacent.
    pub fn direction_between(&self, from: usize, to: usize) -> Option<Direction> {
        if from >= self.vertex_count() || to >= self.vertex_count() {
            return None;
        }
        self.cell(from).direction_to(self.cell(to))
    }

    /// Opens a passage between two adjacent vertices.
    ///
    /// Fails with [`MazeError::InvalidEdge`] when the vertices are out of range, equal,
    /// not adjacent, or already connected.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: u32) -> Result<()> {
        let invalid = || MazeError::InvalidEdge {
            from: self.cell(u),
            to: self.cell(v),
        };

        let dir = self.direction_between(u, v).ok_or_else(invalid)?;
        if self.passages[u][dir.index()].is_some() {
            return Err(invalid());
        }

        self.passages[u][dir.index()] = Some(weight);
        self.passages[v][dir.reverse().index()] = Some(weight);
        self.edge_count += 1;

        Ok(())
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.weight(u, v).is_some()
    }

    pub fn weight(&self, u: usize, v: usize) -> Option<u32> {
        let dir = self.direction_between(u, v)?;
        self.passages[u][dir.index()]
    }

    pub fn is_open(&self, vertex: usize, dir: Direction) -> bool {
        self.passages[vertex][dir.index()].is_some()
    }

    /// Vertices reachable from `vertex` in one step, in [`Direction::ALL`] order.
    pub fn neighbors(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        self.weighted_neighbors(vertex).map(|(v, _)| v)
    }

    pub fn weighted_neighbors(&self, vertex: usize) -> impl Iterator<Item = (usize, u32)> + '_ {
        Direction::ALL.into_iter().filter_map(move |dir| {
            let weight = self.passages[vertex][dir.index()]?;
            Some((self.adjacent(vertex, dir)?, weight))
        })
    }

    pub fn degree(&self, vertex: usize) -> usize {
        self.passages[vertex].iter().flatten().count()
    }

    pub fn passage_mask(&self, vertex: usize) -> PassageMask {
        let mut mask = PassageMask::default();
        for dir in Direction::ALL {
            if self.is_open(vertex, dir) {
                mask.open(dir);
            }
        }
        mask
    }

    /// Every edge once, as `(u, v, weight)` with `u < v`, ordered by `u`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        (0..self.vertex_count()).flat_map(move |u| {
            [Direction::Right, Direction::Down]
                .into_iter()
                .filter_map(move |dir| {
                    let weight = self.passages[u][dir.index()]?;
                    Some((u, self.adjacent(u, dir)?, weight))
                })
        })
    }

    /// Whether every vertex can be reached from vertex 0.
    pub fn is_connected(&self) -> bool {
        if self.vertex_count() == 0 {
            return true;
        }

        let mut seen = vec![false; self.vertex_count()];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;
        let mut reached = 1;

        while let Some(v) = queue.pop_front() {
            for n in self.neighbors(v) {
                if !seen[n] {
                    seen[n] = true;
                    reached += 1;
                    queue.push_back(n);
                }
            }
        }

        reached == self.vertex_count()
    }

    /// Connected with exactly `V - 1` edges, so there is one simple path between any two cells.
    pub fn is_spanning_tree(&self) -> bool {
        self.edge_count + 1 == self.vertex_count() && self.is_connected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_graph_is_walled() {
        let graph = Graph::new(3, 2);
        assert_eq!(graph.vertex_count(), 6);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.neighbors(4).count(), 0);
        assert!(!graph.is_connected());
    }

    #[test]
    fn index_and_cell_agree() {
        let graph = Graph::new(4, 3);
        for v in 0..graph.vertex_count() {
            assert_eq!(graph.index(graph.cell(v)), v);
        }
        assert_eq!(graph.cell(5), Cell::new(1, 1));
    }

    #[test]
    fn add_edge_is_symmetric() {
        let mut graph = Graph::new(3, 3);
        graph.add_edge(0, 1, 1).unwrap();
        graph.add_edge(4, 1, 5).unwrap();

        assert!(graph.has_edge(1, 0));
        assert_eq!(graph.weight(1, 4), Some(5));
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(1).collect::<Vec<_>>(), vec![4, 0]);
        assert_eq!(graph.degree(1), 2);
    }

    #[test]
    fn rejects_invalid_edges() {
        let mut graph = Graph::new(3, 3);
        graph.add_edge(0, 1, 1).unwrap();

        // duplicate, both orientations
        assert!(matches!(graph.add_edge(0, 1, 1), Err(MazeError::InvalidEdge { .. })));
        assert!(matches!(graph.add_edge(1, 0, 1), Err(MazeError::InvalidEdge { .. })));
        // row wrap-around is not adjacency
        assert!(graph.add_edge(2, 3, 1).is_err());
        // diagonal, self-loop, out of range
        assert!(graph.add_edge(0, 4, 1).is_err());
        assert!(graph.add_edge(4, 4, 1).is_err());
        assert!(graph.add_edge(8, 9, 1).is_err());

        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn passage_mask_follows_edges() {
        let mut graph = Graph::new(2, 2);
        graph.add_edge(0, 1, 1).unwrap();
        graph.add_edge(0, 2, 1).unwrap();

        let mask = graph.passage_mask(0);
        assert!(mask.is_open(Direction::Right));
        assert!(mask.is_open(Direction::Down));
        assert!(!mask.is_open(Direction::Up));
        assert_eq!(mask.count(), 2);
        assert!(graph.passage_mask(2).is_open(Direction::Up));
    }

    #[test]
    fn spanning_tree_detection() {
        let mut graph = Graph::new(2, 2);
        graph.add_edge(0, 1, 1).unwrap();
        graph.add_edge(2, 3, 1).unwrap();
        assert!(!graph.is_spanning_tree());

        graph.add_edge(1, 3, 1).unwrap();
        assert!(graph.is_spanning_tree());
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1, 1), (1, 3, 1), (2, 3, 1)]);

        graph.add_edge(0, 2, 1).unwrap();
        assert!(graph.is_connected());
        assert!(!graph.is_spanning_tree());
    }
}
