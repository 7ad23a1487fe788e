use std::path::Path;

use log::info;
use mazecore::{Algorithm, AlgorithmKind, Cell, Maze, Solution};

use crate::{
    error::AppError,
    method::{Method, MethodKind},
    settings::Settings,
};

/// Wires algorithms and persistence methods together, one maze at a time.
#[derive(Debug, Clone, Default)]
pub struct Coordinator {
    settings: Settings,
}

impl Coordinator {
    pub fn new(settings: Settings) -> Self {
        Coordinator { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Generates a maze with the default entrance and exit. A random seed is used when `seed`
    /// is `None`, it can be read back from [`Maze::generation`].
    pub fn generate(
        &self,
        width: usize,
        height: usize,
        seed: Option<u64>,
        kind: AlgorithmKind,
    ) -> Result<Maze, AppError> {
        let maze = Maze::new(width, height)?;
        self.run_generator(maze, seed, kind)
    }

    pub fn generate_between(
        &self,
        width: usize,
        height: usize,
        entrance: Cell,
        exit: Cell,
        seed: Option<u64>,
        kind: AlgorithmKind,
    ) -> Result<Maze, AppError> {
        let maze = Maze::with_endpoints(width, height, entrance, exit)?;
        self.run_generator(maze, seed, kind)
    }

    fn run_generator(
        &self,
        mut maze: Maze,
        seed: Option<u64>,
        kind: AlgorithmKind,
    ) -> Result<Maze, AppError> {
        let mut algorithm = Algorithm::new(kind, seed);
        maze.generate(&mut algorithm)?;
        info!(
            "generated {}x{} maze using {kind}, seed {:?}",
            maze.width(),
            maze.height(),
            algorithm.seed()
        );
        Ok(maze)
    }

    pub fn solve<'m>(&self, maze: &'m mut Maze, kind: AlgorithmKind) -> Result<&'m Solution, AppError> {
        self.solve_with(maze, Algorithm::new(kind, None))
    }

    /// Like [`Coordinator::solve`], for an already configured algorithm.
    pub fn solve_with<'m>(
        &self,
        maze: &'m mut Maze,
        mut algorithm: Algorithm,
    ) -> Result<&'m Solution, AppError> {
        let solution = maze.solve(&mut algorithm)?;
        info!(
            "solved maze using {}, path of {} cells",
            algorithm.kind(),
            solution.len()
        );
        Ok(solution)
    }

    pub fn method(&self, kind: MethodKind) -> Box<dyn Method> {
        kind.create(self.settings.get_image_style())
    }

    /// Method to use for `path`: the given one, else the one the extension suggests, else the
    /// default from settings.
    pub fn method_for(&self, path: &Path, kind: Option<MethodKind>) -> Box<dyn Method> {
        let kind = kind
            .or_else(|| MethodKind::from_path(path))
            .unwrap_or_else(|| self.settings.get_default_method());
        self.method(kind)
    }

    pub fn save(&self, maze: &Maze, path: &Path, kind: Option<MethodKind>) -> Result<(), AppError> {
        self.method_for(path, kind).save(maze, path)?;
        Ok(())
    }

    pub fn load(&self, path: &Path, kind: Option<MethodKind>) -> Result<Maze, AppError> {
        Ok(self.method_for(path, kind).load(path)?)
    }
}
