//! Grid mazes as graphs: perfect maze generation and a family of solvers.

pub mod algorithms;
pub mod cell;
pub mod disjoint_set;
pub mod error;
pub mod graph;
pub mod maze;

pub use algorithms::{Algorithm, AlgorithmKind, Random, Role};
pub use cell::{Cell, Direction};
pub use error::{MazeError, Operation};
pub use graph::{Graph, PassageMask};
pub use maze::{GenerationInfo, Maze, MazeParts, MazeStatus, Solution};
