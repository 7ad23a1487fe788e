use std::time::{Duration, Instant};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::{Algorithm, AlgorithmKind},
    cell::Cell,
    error::{MazeError, Result},
    graph::{Graph, PassageMask},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MazeStatus {
    Ungenerated,
    Generated,
    Solved,
}

impl std::fmt::Display for MazeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MazeStatus::Ungenerated => write!(f, "ungenerated"),
            MazeStatus::Generated => write!(f, "generated"),
            MazeStatus::Solved => write!(f, "solved"),
        }
    }
}

/// How the passages of a maze came to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationInfo {
    pub algorithm: AlgorithmKind,
    /// Seed the generator actually used, so the maze can be generated again.
    pub seed: Option<u64>,
    pub elapsed: Duration,
}

/// Result of solving a maze, in cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// `None` when the maze was loaded from a format that doesn't record the solver.
    pub algorithm: Option<AlgorithmKind>,
    /// Exploration trace, cells in the order the solver visited them.
    pub visited: Vec<Cell>,
    /// Entrance to exit, both included. Empty if the solver didn't reach the exit.
    pub path: Vec<Cell>,
    pub elapsed: Duration,
    entrance: Cell,
    exit: Cell,
}

impl Solution {
    /// Number of cells on the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Path cells where the maze branches, that is with more than two passages.
    pub fn junction_count(&self, graph: &Graph) -> usize {
        self.path
            .iter()
            .filter(|&&cell| graph.degree(graph.index(cell)) > 2)
            .count()
    }

    /// The path, or [`MazeError::UnreachableExit`] if there is none.
    pub fn require_path(&self) -> Result<&[Cell]> {
        if self.path.is_empty() {
            Err(MazeError::UnreachableExit {
                entrance: self.entrance,
                exit: self.exit,
            })
        } else {
            Ok(&self.path)
        }
    }
}

/// Everything needed to rebuild a maze without running a generator again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeParts {
    pub width: usize,
    pub height: usize,
    pub entrance: Cell,
    pub exit: Cell,
    /// Open passages, each listed once.
    pub passages: Vec<(Cell, Cell)>,
    pub generation: Option<GenerationInfo>,
    /// Empty for a maze that wasn't solved.
    pub path: Vec<Cell>,
    pub solved_by: Option<AlgorithmKind>,
    pub solve_time: Duration,
}

#[derive(Debug, Clone)]
pub struct Maze {
    graph: Graph,
    entrance: Cell,
    exit: Cell,
    status: MazeStatus,
    generation: Option<GenerationInfo>,
    solution: Option<Solution>,
}

impl Maze {
    /// Largest number of cells a maze may have.
    pub const MAX_CELLS: usize = 1 << 26;

    /// Ungenerated maze with the entrance in the top left and the exit in the bottom right corner.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::check_dimensions(width, height)?;
        Self::with_endpoints(
            width,
            height,
            Cell::ORIGIN,
            Cell::new(height - 1, width - 1),
        )
    }

    pub fn with_endpoints(width: usize, height: usize, entrance: Cell, exit: Cell) -> Result<Self> {
        Self::check_dimensions(width, height)?;

        for cell in [entrance, exit] {
            if !cell.is_within(width, height) {
                return Err(MazeError::InvalidCell {
                    cell,
                    reason: "outside of the maze",
                });
            }
        }
        if entrance == exit {
            return Err(MazeError::InvalidCell {
                cell: exit,
                reason: "entrance and exit are the same cell",
            });
        }

        Ok(Maze {
            graph: Graph::new(width, height),
            entrance,
            exit,
            status: MazeStatus::Ungenerated,
            generation: None,
            solution: None,
        })
    }

    fn check_dimensions(width: usize, height: usize) -> Result<()> {
        let cells = width.checked_mul(height);
        if width < 2 || height < 2 || cells.map_or(true, |n| n > Self::MAX_CELLS) {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.graph.width()
    }

    pub fn height(&self) -> usize {
        self.graph.height()
    }

    pub fn entrance(&self) -> Cell {
        self.entrance
    }

    pub fn exit(&self) -> Cell {
        self.exit
    }

    pub fn status(&self) -> MazeStatus {
        self.status
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn generation(&self) -> Option<&GenerationInfo> {
        self.generation.as_ref()
    }

    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Solution path, empty until the maze is solved.
    pub fn path(&self) -> &[Cell] {
        self.solution
            .as_ref()
            .map(|s| s.path.as_slice())
            .unwrap_or_default()
    }

    pub fn passage_mask(&self, cell: Cell) -> PassageMask {
        self.graph.passage_mask(self.graph.index(cell))
    }

    pub fn has_passage(&self, a: Cell, b: Cell) -> bool {
        self.graph.contains(a)
            && self.graph.contains(b)
            && self.graph.has_edge(self.graph.index(a), self.graph.index(b))
    }

    /// Open passages as cell pairs, each listed once.
    pub fn passages(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        self.graph
            .edges()
            .map(|(u, v, _)| (self.graph.cell(u), self.graph.cell(v)))
    }

    /// Runs a generator on this maze. The status only changes when the generator succeeds.
    pub fn generate(&mut self, algorithm: &mut Algorithm) -> Result<()> {
        if self.status != MazeStatus::Ungenerated {
            return Err(MazeError::AlreadyGenerated);
        }

        let start = Instant::now();
        let mut graph = Graph::new(self.width(), self.height());
        algorithm.generate(&mut graph)?;
        if !graph.is_spanning_tree() {
            return Err(MazeError::NotPerfect("generator left the maze disconnected"));
        }
        let elapsed = start.elapsed();

        debug!(
            "generated {}x{} maze with {} in {:?}",
            self.width(),
            self.height(),
            algorithm.kind(),
            elapsed
        );

        self.graph = graph;
        self.generation = Some(GenerationInfo {
            algorithm: algorithm.kind(),
            seed: algorithm.seed(),
            elapsed,
        });
        self.status = MazeStatus::Generated;

        Ok(())
    }

    /// Runs a solver from the entrance to the exit and records its [`Solution`].
    ///
    /// An unreachable exit is not an error, the solution then has an empty path.
    pub fn solve(&mut self, algorithm: &mut Algorithm) -> Result<&Solution> {
        match self.status {
            MazeStatus::Ungenerated => return Err(MazeError::NotGenerated),
            MazeStatus::Solved => return Err(MazeError::AlreadySolved),
            MazeStatus::Generated => {}
        }

        let start = Instant::now();
        let exploration = algorithm.solve(
            &self.graph,
            self.graph.index(self.entrance),
            self.graph.index(self.exit),
        )?;
        let elapsed = start.elapsed();

        let to_cells = |vertices: Vec<usize>| -> Vec<Cell> {
            vertices.into_iter().map(|v| self.graph.cell(v)).collect()
        };
        let solution = Solution {
            algorithm: Some(algorithm.kind()),
            visited: to_cells(exploration.visited),
            path: to_cells(exploration.path),
            elapsed,
            entrance: self.entrance,
            exit: self.exit,
        };

        if solution.is_found() {
            debug!(
                "{} found a path of {} cells, visited {} cells in {:?}",
                algorithm.kind(),
                solution.len(),
                solution.visited.len(),
                elapsed
            );
        } else {
            warn!("{} did not reach the exit {}", algorithm.kind(), self.exit);
        }

        self.status = MazeStatus::Solved;
        Ok(self.solution.insert(solution))
    }

    /// Rebuilds a maze from persisted parts, checking that it is a perfect maze and that the
    /// path, if any, walks through open passages from the entrance to the exit.
    pub fn from_parts(parts: MazeParts) -> Result<Self> {
        let mut maze = Maze::with_endpoints(parts.width, parts.height, parts.entrance, parts.exit)?;

        for (a, b) in parts.passages {
            if !maze.graph.contains(a) || !maze.graph.contains(b) {
                return Err(MazeError::InvalidEdge { from: a, to: b });
            }
            let (u, v) = (maze.graph.index(a), maze.graph.index(b));
            maze.graph.add_edge(u, v, Graph::DEFAULT_WEIGHT)?;
        }

        if !maze.graph.is_spanning_tree() {
            return Err(MazeError::NotPerfect("passages do not form a spanning tree"));
        }
        maze.status = MazeStatus::Generated;
        maze.generation = parts.generation;

        if !parts.path.is_empty() {
            let starts_right = parts.path.first() == Some(&maze.entrance);
            let ends_right = parts.path.last() == Some(&maze.exit);
            let connected = parts.path.windows(2).all(|w| maze.has_passage(w[0], w[1]));
            if !(starts_right && ends_right && connected) {
                return Err(MazeError::NotPerfect(
                    "path is not a walk from the entrance to the exit",
                ));
            }

            maze.solution = Some(Solution {
                algorithm: parts.solved_by,
                visited: Vec::new(),
                path: parts.path,
                elapsed: parts.solve_time,
                entrance: maze.entrance,
                exit: maze.exit,
            });
            maze.status = MazeStatus::Solved;
        }

        Ok(maze)
    }

    pub fn to_parts(&self) -> MazeParts {
        MazeParts {
            width: self.width(),
            height: self.height(),
            entrance: self.entrance,
            exit: self.exit,
            passages: self.passages().collect(),
            generation: self.generation.clone(),
            path: self.path().to_vec(),
            solved_by: self.solution.as_ref().and_then(|s| s.algorithm),
            solve_time: self.solution.as_ref().map_or(Duration::ZERO, |s| s.elapsed),
        }
    }
}
