//! Maze Ball entry point
//!
//! Native demo: builds a maze in a headless physics world, prints it, and can
//! walk the ball along the solution to exercise the win and replay flow.

use std::path::PathBuf;

use clap::Parser;

use maze_ball::consts::SIM_DT;
use maze_ball::sim::{GameEvent, HeadlessWorld, MazeSession, PhysicsWorld};
use maze_ball::{MazeConfig, MazePreset};

/// Generate a perfect maze and roll a ball through it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze preset (classic, compact, wide, dense, collapse)
    #[arg(long, default_value = "classic")]
    preset: String,

    /// JSON config file; overrides the preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective config to this file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Mark the solution path
    #[arg(long)]
    solution: bool,

    /// Walk the ball to the goal, then replay once
    #[arg(long)]
    autoplay: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => MazeConfig::load(path)?,
        None => {
            let preset = MazePreset::from_str(&args.preset)
                .ok_or_else(|| anyhow::anyhow!("unknown preset '{}'", args.preset))?;
            MazeConfig::from_preset(preset)
        }
    };
    if let Some(path) = &args.save_config {
        config.save(path)?;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Maze Ball (native) starting with seed {}", seed);

    let mut world = HeadlessWorld::new();
    let mut session = MazeSession::new(config, seed, &mut world)?;
    print_maze(&session, args.solution);

    if args.autoplay {
        if autoplay(&mut session, &mut world) {
            println!("Goal reached in maze #{}!", session.generation());
            session.replay(&mut world)?;
            print_maze(&session, args.solution);
        } else {
            println!("Ball never reached the goal");
        }
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `MazeSession` directly
}

fn print_maze(session: &MazeSession, solution: bool) {
    let maze = session.maze();
    let marked = if solution { maze.solution() } else { Vec::new() };
    println!(
        "Maze #{} ({}x{}, seed {}), {} wall bodies",
        session.generation(),
        maze.walls.rows(),
        maze.walls.columns(),
        maze.seed,
        session.layout().walls.len()
    );
    print!("{}", maze.walls.to_ascii_with_path(&marked));
}

/// Move the ball cell by cell along the solution, feeding overlap starts to
/// the session. Returns true once the goal is reached.
fn autoplay(session: &mut MazeSession, world: &mut HeadlessWorld) -> bool {
    let path = session.maze().solution();
    for cell in path {
        let pos = session.layout().cell_center(cell);
        world.set_position(session.ball(), pos);
        for (a, b) in world.step(SIM_DT) {
            if session.on_overlap_start(world, a, b) == Some(GameEvent::GoalReached) {
                return true;
            }
        }
    }
    false
}
