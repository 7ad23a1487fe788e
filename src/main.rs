use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use log::LevelFilter;
use mazelib::{
    logging,
    mazecore::{
        algorithms::{Hand, WallFollower},
        Algorithm, AlgorithmKind, Cell, Maze, MazeStatus, Role,
    },
    method::MethodKind,
    settings::Settings,
    AppError, Coordinator,
};

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "mazelib")]
struct Cli {
    #[clap(long, global = true, help = "Use this settings file instead of the default one")]
    settings: Option<PathBuf>,
    #[clap(short, long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, help = "Show config in debug format and quit")]
    debug_config: bool,
    #[clap(short, long, global = true, action = clap::ArgAction::Count, help = "Log more, repeat for even more")]
    verbose: u8,
    #[clap(short, long, global = true, action, help = "Only log errors")]
    quiet: bool,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new maze
    Generate(GenerateArgs),
    /// Solve a maze loaded from a file
    Solve(SolveArgs),
    /// List available algorithms
    List,
}

#[derive(Args, Debug)]
struct Output {
    #[clap(short, long, help = "Write the maze as text (JSON)")]
    file: Option<PathBuf>,
    #[clap(short, long, help = "Write the maze as PNG image")]
    image: Option<PathBuf>,
    #[clap(long, help = "Pixels across a path, overrides settings")]
    path_width: Option<u32>,
    #[clap(long, help = "Pixels across a wall, overrides settings")]
    wall_width: Option<u32>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[clap(short = 'W', long, default_value_t = 10)]
    width: usize,
    #[clap(short = 'H', long, default_value_t = 10)]
    height: usize,
    #[clap(short, long, help = "Generator, defaults to the one from settings")]
    algorithm: Option<AlgorithmKind>,
    #[clap(short, long, help = "Seed for reproducible mazes, random if not given")]
    seed: Option<u64>,
    #[clap(long, value_name = "ROW,COL", value_parser = parse_cell)]
    start: Option<Cell>,
    #[clap(long, value_name = "ROW,COL", value_parser = parse_cell)]
    end: Option<Cell>,
    #[clap(long, value_name = "ALGORITHM", help = "Solve the maze right away")]
    solve: Option<AlgorithmKind>,
    #[clap(long, action, help = "Wall follower keeps its left hand on the wall")]
    left_hand: bool,
    #[clap(flatten)]
    output: Output,
}

#[derive(Args, Debug)]
struct SolveArgs {
    input: PathBuf,
    #[clap(short, long, help = "Solver, defaults to the one from settings")]
    algorithm: Option<AlgorithmKind>,
    #[clap(long, help = "Read the input as text or image regardless of its extension")]
    method: Option<MethodKind>,
    #[clap(long, action, help = "Wall follower keeps its left hand on the wall")]
    left_hand: bool,
    #[clap(flatten)]
    output: Output,
}

fn parse_cell(s: &str) -> Result<Cell, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s}"))?;
    let parse = |v: &str| v.trim().parse::<usize>().map_err(|e| format!("{v}: {e}"));
    Ok(Cell::new(parse(row)?, parse(col)?))
}

fn main() -> ExitCode {
    better_panic::install();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let settings_path = cli.settings.clone().unwrap_or_else(Settings::default_path);

    if cli.reset_config {
        Settings::reset_config(&settings_path)?;
        return Ok(());
    }

    if cli.show_config_path {
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    let settings = Settings::load(&settings_path)?;

    if cli.debug_config {
        println!("{:#?}", settings);
        return Ok(());
    }

    logging::init(log_level(&cli, &settings))?;

    let Some(command) = cli.command else {
        list();
        return Ok(());
    };

    match command {
        Command::Generate(args) => generate(settings, args),
        Command::Solve(args) => solve(settings, args),
        Command::List => {
            list();
            Ok(())
        }
    }
}

fn log_level(cli: &Cli, settings: &Settings) -> LevelFilter {
    if cli.quiet {
        return LevelFilter::Error;
    }

    let base = settings.get_log_level().to_level_filter();
    LevelFilter::iter()
        .skip_while(|&level| level < base)
        .nth(cli.verbose as usize)
        .unwrap_or(LevelFilter::Trace)
}

fn with_output_style(settings: Settings, output: &Output) -> Settings {
    let mut style = settings.get_image_style();
    if let Some(pw) = output.path_width {
        style = style.path_width(pw);
    }
    if let Some(ww) = output.wall_width {
        style = style.wall_width(ww);
    }
    settings.set_image_style(style)
}

fn solver(kind: AlgorithmKind, left_hand: bool) -> Algorithm {
    match kind {
        AlgorithmKind::WallFollower if left_hand => WallFollower::new(Hand::Left).into(),
        _ => Algorithm::new(kind, None),
    }
}

fn generate(settings: Settings, args: GenerateArgs) -> Result<(), AppError> {
    let settings = with_output_style(settings, &args.output);
    let coordinator = Coordinator::new(settings);
    let kind = args
        .algorithm
        .unwrap_or_else(|| coordinator.settings().get_default_generator());

    let mut maze = match (args.start, args.end) {
        (None, None) => coordinator.generate(args.width, args.height, args.seed, kind)?,
        (start, end) => coordinator.generate_between(
            args.width,
            args.height,
            start.unwrap_or(Cell::ORIGIN),
            end.unwrap_or(Cell::new(
                args.height.saturating_sub(1),
                args.width.saturating_sub(1),
            )),
            args.seed,
            kind,
        )?,
    };

    if let Some(solver_kind) = args.solve {
        coordinator.solve_with(&mut maze, solver(solver_kind, args.left_hand))?;
    }

    print_summary(&maze);
    write_outputs(&coordinator, &maze, &args.output)
}

fn solve(settings: Settings, args: SolveArgs) -> Result<(), AppError> {
    let settings = with_output_style(settings, &args.output);
    let coordinator = Coordinator::new(settings);
    let kind = args
        .algorithm
        .unwrap_or_else(|| coordinator.settings().get_default_solver());

    let mut maze = coordinator.load(&args.input, args.method)?;
    if maze.status() == MazeStatus::Solved {
        log::info!("dropping the path stored in {}", args.input.display());
        maze = without_solution(&maze)?;
    }

    coordinator.solve_with(&mut maze, solver(kind, args.left_hand))?;

    print_summary(&maze);
    write_outputs(&coordinator, &maze, &args.output)
}

fn without_solution(maze: &Maze) -> Result<Maze, AppError> {
    let mut parts = maze.to_parts();
    parts.path.clear();
    parts.solved_by = None;
    parts.solve_time = Duration::ZERO;
    Ok(Maze::from_parts(parts)?)
}

fn write_outputs(coordinator: &Coordinator, maze: &Maze, output: &Output) -> Result<(), AppError> {
    if let Some(path) = &output.file {
        coordinator.save(maze, path, Some(MethodKind::Text))?;
        println!("{} {}", "text:".bold(), path.display());
    }
    if let Some(path) = &output.image {
        coordinator.save(maze, path, Some(MethodKind::Image))?;
        println!("{} {}", "image:".bold(), path.display());
    }
    Ok(())
}

fn print_summary(maze: &Maze) {
    println!(
        "{} {}x{}, {} {} -> {}",
        "maze:".bold(),
        maze.width(),
        maze.height(),
        maze.status(),
        maze.entrance(),
        maze.exit()
    );

    if let Some(info) = maze.generation() {
        let seed = info.seed.map_or_else(|| "-".to_string(), |s| s.to_string());
        println!(
            "{} {} in {:?}, seed {}",
            "generated:".bold(),
            info.algorithm.to_string().cyan(),
            info.elapsed,
            seed.yellow()
        );
    }

    if let Some(solution) = maze.solution() {
        let algorithm = solution
            .algorithm
            .map_or_else(|| "unknown".to_string(), |a| a.to_string());

        if solution.is_found() {
            println!(
                "{} {} in {:?}, path {} cells, {} junctions, visited {} cells",
                "solved:".bold(),
                algorithm.cyan(),
                solution.elapsed,
                solution.len().to_string().green(),
                solution.junction_count(maze.graph()),
                solution.visited.len()
            );
        } else {
            println!(
                "{} {} found no path, visited {} cells",
                "solved:".bold(),
                algorithm.cyan(),
                solution.visited.len()
            );
        }
    }
}

fn list() {
    for role in [Role::Generator, Role::Solver] {
        println!("{}", format!("{role}s:").bold());
        for kind in AlgorithmKind::ALL.into_iter().filter(|k| k.role() == role) {
            println!(
                "  {:<20} {:<14} {:<17} {}",
                kind.name(),
                kind.alias().dimmed(),
                kind.complexity(),
                kind.description()
            );
        }
    }
}
