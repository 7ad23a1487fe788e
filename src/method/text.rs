use std::{collections::BTreeSet, time::Duration};

use mazecore::{AlgorithmKind, Cell, GenerationInfo, Maze, MazeParts};
use serde::{Deserialize, Serialize};

use super::{ensure_generated, Method, MethodError, MethodKind};
use crate::settings::ImageStyle;

/// Cell coordinates as stored in text files, `x` is the column and `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct Point {
    x: usize,
    y: usize,
}

impl From<Cell> for Point {
    fn from(cell: Cell) -> Self {
        Point {
            x: cell.col,
            y: cell.row,
        }
    }
}

impl From<Point> for Cell {
    fn from(point: Point) -> Self {
        Cell::new(point.y, point.x)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Coords {
    start: [usize; 2],
    end: [usize; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Node {
    x: usize,
    y: usize,
    neighbors: Vec<Point>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MazeDocument {
    width: usize,
    height: usize,
    /// Nanoseconds.
    #[serde(default)]
    generation_time: u64,
    #[serde(default)]
    generation_algorithm: Option<String>,
    coords: Coords,
    #[serde(default)]
    path_width: u32,
    #[serde(default)]
    wall_width: u32,
    #[serde(default)]
    seed: Option<u64>,
    maze_nodes: Vec<Node>,
    #[serde(default)]
    path_nodes: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    solving_algorithm: Option<String>,
    /// Nanoseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    solving_time: Option<u64>,
}

/// JSON document listing every cell with its open neighbors, plus the solution path.
#[derive(Debug, Clone)]
pub struct TextMethod {
    style: ImageStyle,
}

impl TextMethod {
    /// `style` only provides the `pathWidth` and `wallWidth` fields of written documents.
    pub fn new(style: ImageStyle) -> Self {
        TextMethod { style }
    }

    fn document(&self, maze: &Maze) -> MazeDocument {
        let graph = maze.graph();
        let to_array = |cell: Cell| [cell.col, cell.row];

        let maze_nodes = (0..graph.vertex_count())
            .map(|v| {
                let cell = graph.cell(v);
                Node {
                    x: cell.col,
                    y: cell.row,
                    neighbors: graph.neighbors(v).map(|n| graph.cell(n).into()).collect(),
                }
            })
            .collect();

        let generation = maze.generation();
        let solution = maze.solution();

        MazeDocument {
            width: maze.width(),
            height: maze.height(),
            generation_time: generation.map_or(0, |g| g.elapsed.as_nanos() as u64),
            generation_algorithm: generation.map(|g| g.algorithm.to_string()),
            coords: Coords {
                start: to_array(maze.entrance()),
                end: to_array(maze.exit()),
            },
            path_width: self.style.path_width,
            wall_width: self.style.wall_width,
            seed: generation.and_then(|g| g.seed),
            maze_nodes,
            path_nodes: maze.path().iter().map(|&cell| cell.into()).collect(),
            solving_algorithm: solution.and_then(|s| s.algorithm).map(|a| a.to_string()),
            solving_time: solution.map(|s| s.elapsed.as_nanos() as u64),
        }
    }
}

fn parse_algorithm(name: Option<String>) -> Option<AlgorithmKind> {
    let name = name?;
    match name.parse() {
        Ok(kind) => Some(kind),
        Err(err) => {
            log::warn!("{err}, ignoring it");
            None
        }
    }
}

impl Method for TextMethod {
    fn kind(&self) -> MethodKind {
        MethodKind::Text
    }

    fn serialize(&self, maze: &Maze) -> Result<Vec<u8>, MethodError> {
        ensure_generated(maze)?;
        Ok(serde_json::to_vec_pretty(&self.document(maze))?)
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Maze, MethodError> {
        let doc: MazeDocument = serde_json::from_slice(bytes)?;

        let cells = doc.width.checked_mul(doc.height);
        if cells != Some(doc.maze_nodes.len()) {
            return Err(MethodError::Malformed(format!(
                "{}x{} maze with {} nodes",
                doc.width,
                doc.height,
                doc.maze_nodes.len()
            )));
        }

        // every passage is listed from both of its cells
        let mut passages = BTreeSet::new();
        for node in &doc.maze_nodes {
            let cell = Cell::new(node.y, node.x);
            for &neighbor in &node.neighbors {
                let other = Cell::from(neighbor);
                passages.insert((cell.min(other), cell.max(other)));
            }
        }

        let generation = parse_algorithm(doc.generation_algorithm).map(|algorithm| GenerationInfo {
            algorithm,
            seed: doc.seed,
            elapsed: Duration::from_nanos(doc.generation_time),
        });

        let parts = MazeParts {
            width: doc.width,
            height: doc.height,
            entrance: Cell::new(doc.coords.start[1], doc.coords.start[0]),
            exit: Cell::new(doc.coords.end[1], doc.coords.end[0]),
            passages: passages.into_iter().collect(),
            generation,
            path: doc.path_nodes.into_iter().map(Cell::from).collect(),
            solved_by: parse_algorithm(doc.solving_algorithm),
            solve_time: Duration::from_nanos(doc.solving_time.unwrap_or_default()),
        };

        Ok(Maze::from_parts(parts)?)
    }
}

#[cfg(test)]
mod tests {
    use mazecore::{Algorithm, MazeError, MazeStatus};

    use super::*;

    fn solved_maze() -> Maze {
        let mut maze = Maze::new(5, 4).unwrap();
        maze.generate(&mut Algorithm::new(AlgorithmKind::Kruskal, Some(12)))
            .unwrap();
        maze.solve(&mut Algorithm::new(AlgorithmKind::Dijkstra, None))
            .unwrap();
        maze
    }

    #[test]
    fn document_layout() {
        let maze = solved_maze();
        let bytes = TextMethod::new(ImageStyle::default())
            .serialize(&maze)
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["width"], 5);
        assert_eq!(json["height"], 4);
        assert_eq!(json["generationAlgorithm"], "Kruskal");
        assert_eq!(json["seed"], 12);
        assert_eq!(json["coords"]["start"], serde_json::json!([0, 0]));
        assert_eq!(json["coords"]["end"], serde_json::json!([4, 3]));
        assert_eq!(json["pathWidth"], 3);
        assert_eq!(json["wallWidth"], 1);
        assert_eq!(json["mazeNodes"].as_array().unwrap().len(), 20);
        assert_eq!(json["pathNodes"][0], serde_json::json!({"x": 0, "y": 0}));
        assert_eq!(json["solvingAlgorithm"], "Dijkstra");
    }

    #[test]
    fn round_trip() {
        let maze = solved_maze();
        let method = TextMethod::new(ImageStyle::default());
        let loaded = method.deserialize(&method.serialize(&maze).unwrap()).unwrap();

        assert_eq!(loaded.status(), MazeStatus::Solved);
        assert_eq!(loaded.graph(), maze.graph());
        assert_eq!(loaded.entrance(), maze.entrance());
        assert_eq!(loaded.exit(), maze.exit());
        assert_eq!(loaded.path(), maze.path());
        assert_eq!(loaded.generation().unwrap().seed, Some(12));
        assert_eq!(
            loaded.solution().unwrap().algorithm,
            Some(AlgorithmKind::Dijkstra)
        );
    }

    #[test]
    fn unsolved_round_trip() {
        let mut maze = Maze::new(3, 3).unwrap();
        maze.generate(&mut Algorithm::new(AlgorithmKind::Kruskal, Some(1)))
            .unwrap();

        let method = TextMethod::new(ImageStyle::default());
        let loaded = method.deserialize(&method.serialize(&maze).unwrap()).unwrap();
        assert_eq!(loaded.status(), MazeStatus::Generated);
        assert!(loaded.path().is_empty());
    }

    #[test]
    fn rejects_broken_documents() {
        let method = TextMethod::new(ImageStyle::default());
        assert!(matches!(
            method.deserialize(b"{\"width\": 3"),
            Err(MethodError::Json(_))
        ));

        // a 2x2 maze with a single passage is not perfect
        let doc = br#"{
            "width": 2, "height": 2,
            "coords": {"start": [0, 0], "end": [1, 1]},
            "mazeNodes": [
                {"x": 0, "y": 0, "neighbors": [{"x": 1, "y": 0}]},
                {"x": 1, "y": 0, "neighbors": [{"x": 0, "y": 0}]},
                {"x": 0, "y": 1, "neighbors": []},
                {"x": 1, "y": 1, "neighbors": []}
            ]
        }"#;
        assert!(matches!(
            method.deserialize(doc),
            Err(MethodError::Maze(MazeError::NotPerfect(_)))
        ));
    }

    #[test]
    fn rejects_sizes_that_disagree_with_nodes() {
        let method = TextMethod::new(ImageStyle::default());

        let huge = br#"{
            "width": 4294967296, "height": 4294967296,
            "coords": {"start": [0, 0], "end": [1, 1]},
            "mazeNodes": []
        }"#;
        assert!(matches!(
            method.deserialize(huge),
            Err(MethodError::Malformed(_))
        ));

        let short = br#"{
            "width": 3, "height": 2,
            "coords": {"start": [0, 0], "end": [2, 1]},
            "mazeNodes": [{"x": 0, "y": 0, "neighbors": []}]
        }"#;
        assert!(matches!(
            method.deserialize(short),
            Err(MethodError::Malformed(_))
        ));
    }
}
