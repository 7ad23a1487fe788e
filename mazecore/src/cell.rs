use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a single maze cell in the grid.
///
/// Rows grow downwards, columns grow to the right, `(0, 0)` is the top left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { row: 0, col: 0 };

    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// Returns the cell one step away in the given direction, or `None` if it would leave
    /// the `width` x `height` grid.
    pub fn step(self, dir: Direction, width: usize, height: usize) -> Option<Cell> {
        let Cell { row, col } = self;
        let next = match dir {
            Direction::Up => Cell::new(row.checked_sub(1)?, col),
            Direction::Down => Cell::new(row + 1, col),
            Direction::Left => Cell::new(row, col.checked_sub(1)?),
            Direction::Right => Cell::new(row, col + 1),
        };

        next.is_within(width, height).then_some(next)
    }

    pub fn is_within(self, width: usize, height: usize) -> bool {
        self.row < height && self.col < width
    }

    /// Returns the direction leading from `self` to `other`, if they are grid-adjacent.
    pub fn direction_to(self, other: Cell) -> Option<Direction> {
        use Direction::*;

        let dr = other.row as isize - self.row as isize;
        let dc = other.col as isize - self.col as isize;
        match (dr, dc) {
            (-1, 0) => Some(Up),
            (1, 0) => Some(Down),
            (0, -1) => Some(Left),
            (0, 1) => Some(Right),
            _ => None,
        }
    }

    pub fn is_adjacent(self, other: Cell) -> bool {
        self.direction_to(other).is_some()
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell::new(row, col)
    }
}

impl From<Cell> for (usize, usize) {
    fn from(cell: Cell) -> Self {
        (cell.row, cell.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four passages a cell can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Clockwise order, starting at `Up`. Neighbor enumeration everywhere follows it.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn reverse(self) -> Self {
        use Direction::*;

        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn turn_right(self) -> Self {
        use Direction::*;

        match self {
            Up => Right,
            Right => Down,
            Down => Left,
            Left => Up,
        }
    }

    pub fn turn_left(self) -> Self {
        self.turn_right().reverse()
    }

    /// Bit of this direction inside a [`PassageMask`](crate::graph::PassageMask).
    pub fn bit(self) -> u8 {
        match self {
            Direction::Up => 0b0001,
            Direction::Right => 0b0010,
            Direction::Down => 0b0100,
            Direction::Left => 0b1000,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }
}
