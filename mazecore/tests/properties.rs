use mazecore::{
    algorithms::{Hand, WallFollower},
    Algorithm, AlgorithmKind, Cell, Maze, MazeError, MazeStatus,
};

const SIZES: [(usize, usize); 6] = [(2, 2), (2, 9), (9, 2), (5, 5), (13, 7), (24, 24)];
const SEEDS: [u64; 5] = [0, 1, 42, 1337, u64::MAX];

fn generated(width: usize, height: usize, seed: u64) -> Maze {
    let mut maze = Maze::new(width, height).unwrap();
    maze.generate(&mut Algorithm::new(AlgorithmKind::Kruskal, Some(seed)))
        .unwrap();
    maze
}

fn solved(maze: &Maze, mut algorithm: Algorithm) -> Maze {
    let mut maze = maze.clone();
    maze.solve(&mut algorithm).unwrap();
    maze
}

fn solve_with(maze: &Maze, kind: AlgorithmKind) -> Maze {
    solved(maze, Algorithm::new(kind, None))
}

fn assert_walk(maze: &Maze, path: &[Cell]) {
    assert_eq!(path.first(), Some(&maze.entrance()));
    assert_eq!(path.last(), Some(&maze.exit()));
    for pair in path.windows(2) {
        assert!(
            maze.has_passage(pair[0], pair[1]),
            "{} and {} are not connected",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn kruskal_makes_perfect_mazes() {
    for (w, h) in SIZES {
        for seed in SEEDS {
            let maze = generated(w, h, seed);
            let graph = maze.graph();
            assert_eq!(graph.edge_count(), w * h - 1);
            assert!(graph.is_connected());
            // connected with V - 1 edges means no cycles
            assert!(graph.is_spanning_tree());
        }
    }
}

#[test]
fn kruskal_is_deterministic() {
    for (w, h) in SIZES {
        for seed in SEEDS {
            let a = generated(w, h, seed);
            let b = generated(w, h, seed);
            assert_eq!(
                a.passages().collect::<Vec<_>>(),
                b.passages().collect::<Vec<_>>()
            );
        }
    }

    let a = generated(16, 16, 1);
    let b = generated(16, 16, 2);
    assert_ne!(a.graph(), b.graph());
}

#[test]
fn shortest_path_solvers_agree() {
    for (w, h) in SIZES {
        for seed in SEEDS {
            let maze = generated(w, h, seed);
            let bfs = solve_with(&maze, AlgorithmKind::BreadthFirstSearch);
            let dijkstra = solve_with(&maze, AlgorithmKind::Dijkstra);
            let lee = solve_with(&maze, AlgorithmKind::Lee);

            assert_walk(&maze, bfs.path());
            assert_eq!(bfs.path(), dijkstra.path());
            assert_eq!(bfs.path(), lee.path());
        }
    }
}

#[test]
fn dfs_finds_a_path_within_bounds() {
    for (w, h) in SIZES {
        for seed in SEEDS {
            let maze = generated(w, h, seed);
            let bfs = solve_with(&maze, AlgorithmKind::BreadthFirstSearch);
            let dfs = solve_with(&maze, AlgorithmKind::DepthFirstSearch);

            let solution = dfs.solution().unwrap();
            assert_walk(&maze, &solution.path);
            assert!(solution.len() >= bfs.path().len());
            assert!(solution.visited.len() <= w * h);
        }
    }
}

#[test]
fn tremaux_follows_the_tree_path() {
    for (w, h) in SIZES {
        for seed in SEEDS {
            let maze = generated(w, h, seed);
            let bfs = solve_with(&maze, AlgorithmKind::BreadthFirstSearch);
            let tremaux = solve_with(&maze, AlgorithmKind::Tremaux);

            let solution = tremaux.solution().unwrap();
            assert_eq!(solution.path, bfs.path());
            // every passage is walked at most twice
            assert!(solution.visited.len() <= 2 * maze.graph().edge_count() + 1);
        }
    }
}

#[test]
fn backtracker_stack_is_the_tree_path() {
    for (w, h) in SIZES {
        for seed in SEEDS {
            let maze = generated(w, h, seed);
            let bfs = solve_with(&maze, AlgorithmKind::BreadthFirstSearch);
            let backtracker = solve_with(&maze, AlgorithmKind::RecursiveBacktracker);

            let solution = backtracker.solution().unwrap();
            assert_eq!(solution.path, bfs.path());
            assert!(solution.visited.len() <= w * h);
        }
    }
}

#[test]
fn wall_follower_reaches_exit_on_trees() {
    for (w, h) in SIZES {
        for seed in SEEDS {
            let maze = generated(w, h, seed);
            let bfs = solve_with(&maze, AlgorithmKind::BreadthFirstSearch);

            for hand in [Hand::Right, Hand::Left] {
                let follower = solved(&maze, WallFollower::new(hand).into());
                assert_eq!(follower.path(), bfs.path(), "{hand:?} hand, seed {seed}");
            }
        }
    }
}

#[test]
fn interior_endpoints() {
    let mut maze = Maze::with_endpoints(9, 9, Cell::new(4, 4), Cell::new(0, 8)).unwrap();
    maze.generate(&mut Algorithm::new(AlgorithmKind::Kruskal, Some(8)))
        .unwrap();

    let reference = solve_with(&maze, AlgorithmKind::BreadthFirstSearch);
    assert_walk(&maze, reference.path());
    for kind in AlgorithmKind::solvers() {
        assert_eq!(solve_with(&maze, kind).path(), reference.path(), "{kind}");
    }
}

#[test]
fn two_by_two() {
    let maze = generated(2, 2, 2024);
    assert_eq!(maze.graph().edge_count(), 3);

    for kind in AlgorithmKind::solvers() {
        let solved = solve_with(&maze, kind);
        assert_eq!(solved.status(), MazeStatus::Solved);
        assert_eq!(solved.path().len(), 3, "{kind}");
        assert_eq!(solved.path().first(), Some(&Cell::new(0, 0)));
        assert_eq!(solved.path().last(), Some(&Cell::new(1, 1)));
    }
}

#[test]
fn misuse_is_reported() {
    let mut maze = Maze::new(4, 4).unwrap();
    let mut bfs = Algorithm::new(AlgorithmKind::BreadthFirstSearch, None);
    assert_eq!(maze.solve(&mut bfs).unwrap_err(), MazeError::NotGenerated);

    let mut kruskal = Algorithm::new(AlgorithmKind::Kruskal, None);
    maze.generate(&mut kruskal).unwrap();
    assert_eq!(maze.generate(&mut kruskal), Err(MazeError::AlreadyGenerated));
}
