use thiserror::Error;

use crate::{algorithms::AlgorithmKind, cell::Cell};

/// Capability requested from an [`Algorithm`](crate::algorithms::Algorithm).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Generate,
    Solve,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Generate => write!(f, "generate"),
            Operation::Solve => write!(f, "solve"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid maze dimensions {width}x{height}, sides need at least 2 cells and the maze at most {}", crate::Maze::MAX_CELLS)]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid edge between {from} and {to}")]
    InvalidEdge { from: Cell, to: Cell },
    #[error("invalid cell {cell}: {reason}")]
    InvalidCell { cell: Cell, reason: &'static str },
    #[error("maze was already generated")]
    AlreadyGenerated,
    #[error("maze was already solved")]
    AlreadySolved,
    #[error("maze has not been generated yet")]
    NotGenerated,
    #[error("{algorithm} cannot {operation} a maze")]
    UnsupportedOperation {
        algorithm: AlgorithmKind,
        operation: Operation,
    },
    #[error("exit {exit} is unreachable from entrance {entrance}")]
    UnreachableExit { entrance: Cell, exit: Cell },
    #[error("maze is not perfect: {0}")]
    NotPerfect(&'static str),
}

pub type Result<T, E = MazeError> = std::result::Result<T, E>;
