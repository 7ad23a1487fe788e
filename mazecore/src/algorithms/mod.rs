mod backtracker;
mod bfs;
mod dfs;
mod dijkstra;
mod kruskal;
mod lee;
mod tremaux;
mod wall_follower;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{MazeError, Operation, Result},
    graph::Graph,
};

pub use backtracker::RecursiveBacktracker;
pub use bfs::BreadthFirstSearch;
pub use dfs::DepthFirstSearch;
pub use dijkstra::Dijkstra;
pub use kruskal::Kruskal;
pub use lee::Lee;
pub use tremaux::Tremaux;
pub use wall_follower::{Hand, WallFollower};

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Whether an algorithm builds passages or searches through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Generator,
    Solver,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Generator => write!(f, "generator"),
            Role::Solver => write!(f, "solver"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmKind {
    Kruskal,
    DepthFirstSearch,
    BreadthFirstSearch,
    Dijkstra,
    Lee,
    Tremaux,
    WallFollower,
    RecursiveBacktracker,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 8] = [
        AlgorithmKind::Kruskal,
        AlgorithmKind::DepthFirstSearch,
        AlgorithmKind::BreadthFirstSearch,
        AlgorithmKind::Dijkstra,
        AlgorithmKind::Lee,
        AlgorithmKind::Tremaux,
        AlgorithmKind::WallFollower,
        AlgorithmKind::RecursiveBacktracker,
    ];

    pub fn role(self) -> Role {
        match self {
            AlgorithmKind::Kruskal => Role::Generator,
            _ => Role::Solver,
        }
    }

    pub fn generators() -> impl Iterator<Item = AlgorithmKind> {
        Self::ALL.into_iter().filter(|k| k.role() == Role::Generator)
    }

    pub fn solvers() -> impl Iterator<Item = AlgorithmKind> {
        Self::ALL.into_iter().filter(|k| k.role() == Role::Solver)
    }

    /// Full name, as used in saved mazes.
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::Kruskal => "Kruskal",
            AlgorithmKind::DepthFirstSearch => "DepthFirstSearch",
            AlgorithmKind::BreadthFirstSearch => "BreadthFirstSearch",
            AlgorithmKind::Dijkstra => "Dijkstra",
            AlgorithmKind::Lee => "Lee",
            AlgorithmKind::Tremaux => "Tremaux",
            AlgorithmKind::WallFollower => "WallFollower",
            AlgorithmKind::RecursiveBacktracker => "RecursiveBacktracker",
        }
    }

    /// Short name for the command line.
    pub fn alias(self) -> &'static str {
        match self {
            AlgorithmKind::Kruskal => "kruskal",
            AlgorithmKind::DepthFirstSearch => "dfs",
            AlgorithmKind::BreadthFirstSearch => "bfs",
            AlgorithmKind::Dijkstra => "dijkstra",
            AlgorithmKind::Lee => "lee",
            AlgorithmKind::Tremaux => "tremaux",
            AlgorithmKind::WallFollower => "wall-follower",
            AlgorithmKind::RecursiveBacktracker => "backtracker",
        }
    }

    /// One line on how the algorithm works.
    pub fn description(self) -> &'static str {
        match self {
            AlgorithmKind::Kruskal => "opens shuffled walls that join two separate regions",
            AlgorithmKind::DepthFirstSearch => "explores one branch fully before the next, any path",
            AlgorithmKind::BreadthFirstSearch => "expands in rings around the entrance, shortest path",
            AlgorithmKind::Dijkstra => "settles cells by distance, lightest path on weighted passages",
            AlgorithmKind::Lee => "labels cells wave by wave, then walks the labels back",
            AlgorithmKind::Tremaux => "marks passages while walking, never enters one marked twice",
            AlgorithmKind::WallFollower => "keeps one hand on the wall, needs a maze without cycles",
            AlgorithmKind::RecursiveBacktracker => "walks into unvisited cells, backs out of dead ends",
        }
    }

    /// Worst case running time, `V` cells and `E` passages.
    pub fn complexity(self) -> &'static str {
        match self {
            AlgorithmKind::Kruskal => "O(E log E)",
            AlgorithmKind::Dijkstra => "O((V + E) log V)",
            AlgorithmKind::Tremaux => "O(E)",
            _ => "O(V + E)",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for AlgorithmKind {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .map(|c| if c == 'é' { 'e' } else { c })
            .collect();

        let alternative = match wanted.as_str() {
            "kruskals" | "randomkruskal" | "randomkruskals" => Some(AlgorithmKind::Kruskal),
            "depthfirstsearchalgorithm" => Some(AlgorithmKind::DepthFirstSearch),
            "dijkstraalgorithm" => Some(AlgorithmKind::Dijkstra),
            "leealgorithm" => Some(AlgorithmKind::Lee),
            "tremauxsalgorithm" | "tremauxs" => Some(AlgorithmKind::Tremaux),
            "wallfollowingalgorithm" | "wallfollowing" | "wallfollow" => {
                Some(AlgorithmKind::WallFollower)
            }
            "recursivebacktrackeralgorithm" | "recursivebacktracking" => {
                Some(AlgorithmKind::RecursiveBacktracker)
            }
            _ => None,
        };

        alternative
            .or_else(|| {
                Self::ALL.into_iter().find(|kind| {
                    kind.name().to_lowercase() == wanted || kind.alias().replace('-', "") == wanted
                })
            })
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Builds the passages of a fully walled graph.
pub trait Generator: fmt::Debug {
    fn generate(&mut self, graph: &mut Graph) -> Result<()>;
}

/// Searches a path between two vertices of a generated graph.
///
/// An unreachable exit is not an error, the returned [`Exploration`] just has an empty path.
pub trait Solver: fmt::Debug {
    fn solve(&mut self, graph: &Graph, entrance: usize, exit: usize) -> Exploration;
}

/// Raw result of a solver run, in vertex indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exploration {
    /// Vertices in the order the solver visited them.
    pub visited: Vec<usize>,
    /// Entrance to exit, both included. Empty when the exit was not reached.
    pub path: Vec<usize>,
}

impl Exploration {
    pub(crate) fn unreachable(visited: Vec<usize>) -> Self {
        Exploration {
            visited,
            path: Vec::new(),
        }
    }
}

/// Walks `predecessors` back from `exit` and returns the path in entrance-to-exit order.
pub(crate) fn backtrack(predecessors: &[Option<usize>], entrance: usize, exit: usize) -> Vec<usize> {
    let mut path = vec![exit];
    let mut current = exit;
    while current != entrance {
        match predecessors[current] {
            Some(prev) => {
                path.push(prev);
                current = prev;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

/// Closed set of every algorithm the library ships, dispatched by variant.
#[derive(Debug, Clone)]
pub enum Algorithm {
    Kruskal(Kruskal),
    DepthFirstSearch(DepthFirstSearch),
    BreadthFirstSearch(BreadthFirstSearch),
    Dijkstra(Dijkstra),
    Lee(Lee),
    Tremaux(Tremaux),
    WallFollower(WallFollower),
    RecursiveBacktracker(RecursiveBacktracker),
}

impl Algorithm {
    /// Creates an algorithm of the given kind. `seed` only matters for generators, a random one
    /// is drawn when it's `None`.
    pub fn new(kind: AlgorithmKind, seed: Option<u64>) -> Self {
        match kind {
            AlgorithmKind::Kruskal => Algorithm::Kruskal(Kruskal::new(seed)),
            AlgorithmKind::DepthFirstSearch => Algorithm::DepthFirstSearch(DepthFirstSearch),
            AlgorithmKind::BreadthFirstSearch => Algorithm::BreadthFirstSearch(BreadthFirstSearch),
            AlgorithmKind::Dijkstra => Algorithm::Dijkstra(Dijkstra),
            AlgorithmKind::Lee => Algorithm::Lee(Lee),
            AlgorithmKind::Tremaux => Algorithm::Tremaux(Tremaux),
            AlgorithmKind::WallFollower => Algorithm::WallFollower(WallFollower::default()),
            AlgorithmKind::RecursiveBacktracker => {
                Algorithm::RecursiveBacktracker(RecursiveBacktracker)
            }
        }
    }

    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Algorithm::Kruskal(_) => AlgorithmKind::Kruskal,
            Algorithm::DepthFirstSearch(_) => AlgorithmKind::DepthFirstSearch,
            Algorithm::BreadthFirstSearch(_) => AlgorithmKind::BreadthFirstSearch,
            Algorithm::Dijkstra(_) => AlgorithmKind::Dijkstra,
            Algorithm::Lee(_) => AlgorithmKind::Lee,
            Algorithm::Tremaux(_) => AlgorithmKind::Tremaux,
            Algorithm::WallFollower(_) => AlgorithmKind::WallFollower,
            Algorithm::RecursiveBacktracker(_) => AlgorithmKind::RecursiveBacktracker,
        }
    }

    pub fn role(&self) -> Role {
        self.kind().role()
    }

    /// Seed a generator will use, `None` for solvers.
    pub fn seed(&self) -> Option<u64> {
        match self {
            Algorithm::Kruskal(k) => Some(k.seed()),
            _ => None,
        }
    }

    pub fn generate(&mut self, graph: &mut Graph) -> Result<()> {
        match self {
            Algorithm::Kruskal(k) => k.generate(graph),
            _ => Err(self.unsupported(Operation::Generate)),
        }
    }

    pub fn solve(&mut self, graph: &Graph, entrance: usize, exit: usize) -> Result<Exploration> {
        let unsupported = self.unsupported(Operation::Solve);
        let solver: &mut dyn Solver = match self {
            Algorithm::DepthFirstSearch(s) => s,
            Algorithm::BreadthFirstSearch(s) => s,
            Algorithm::Dijkstra(s) => s,
            Algorithm::Lee(s) => s,
            Algorithm::Tremaux(s) => s,
            Algorithm::WallFollower(s) => s,
            Algorithm::RecursiveBacktracker(s) => s,
            Algorithm::Kruskal(_) => return Err(unsupported),
        };

        Ok(solver.solve(graph, entrance, exit))
    }

    fn unsupported(&self, operation: Operation) -> MazeError {
        MazeError::UnsupportedOperation {
            algorithm: self.kind(),
            operation,
        }
    }
}

impl From<Kruskal> for Algorithm {
    fn from(k: Kruskal) -> Self {
        Algorithm::Kruskal(k)
    }
}

impl From<WallFollower> for Algorithm {
    fn from(w: WallFollower) -> Self {
        Algorithm::WallFollower(w)
    }
}
