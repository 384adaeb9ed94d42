#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that carves a maze and prints it to the terminal.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use maze_carve_core::{
    CellCoord, Command, Event, GridConfig, WELCOME_BANNER, DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS,
};
use maze_carve_rendering::render_frame;
use maze_carve_system_pacing::{Config as PacerConfig, StepPacer};
use maze_carve_system_progress::Progress;
use maze_carve_world::{self as world, query, World};

/// Simulated time attributed to one frame of the driving loop.
const FRAME_DT: Duration = Duration::from_millis(16);

/// Dimensions beyond this draw a warning about step counts, not an error.
const SOFT_DIMENSION_LIMIT: u32 = 70;

/// Carves a perfect maze with randomized depth-first backtracking and
/// prints the result, together with the unique start-to-goal path.
#[derive(Debug, Parser)]
#[command(name = "maze-carve")]
struct Args {
    /// Number of grid columns.
    #[arg(long, default_value_t = DEFAULT_GRID_COLUMNS)]
    columns: u32,
    /// Number of grid rows.
    #[arg(long, default_value_t = DEFAULT_GRID_ROWS)]
    rows: u32,
    /// Column of the start cell.
    #[arg(long, default_value_t = 0)]
    start_column: u32,
    /// Row of the start cell.
    #[arg(long, default_value_t = 0)]
    start_row: u32,
    /// Seed for the carving sequence; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Frames that must elapse before the carver advances one step.
    #[arg(long, default_value_t = 4)]
    ticks_per_step: u32,
    /// Print an intermediate frame after every carving step.
    #[arg(long)]
    animate: bool,
}

fn main() -> Result<()> {
    run(Args::parse())
}

fn run(args: Args) -> Result<()> {
    println!("{WELCOME_BANNER}");

    if args.columns > SOFT_DIMENSION_LIMIT || args.rows > SOFT_DIMENSION_LIMIT {
        eprintln!(
            "warning: mazes beyond {SOFT_DIMENSION_LIMIT}x{SOFT_DIMENSION_LIMIT} \
             take many steps to carve"
        );
    }

    let config = GridConfig::new(
        args.columns,
        args.rows,
        CellCoord::new(args.start_column, args.start_row),
    )
    .context("invalid maze layout")?;
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureMaze { config, seed },
        &mut events,
    );

    let mut pacer = StepPacer::new(PacerConfig::new(args.ticks_per_step));
    let mut progress = Progress::new();
    progress.handle(&events);

    while !query::is_complete(&world) {
        events.clear();
        world::apply(&mut world, Command::Tick { dt: FRAME_DT }, &mut events);

        let mut commands = Vec::new();
        pacer.handle(&events, &mut commands);
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
        progress.handle(&events);

        if args.animate && carving_advanced(&events) {
            let frame = render_frame(
                &query::maze_view(&world),
                None,
                Some(query::carver_position(&world)),
            );
            println!("{frame}");
        }
    }

    let frame = render_frame(&query::maze_view(&world), query::solution_path(&world), None);
    println!("{frame}");

    let report = progress.report();
    println!(
        "{}x{} maze, seed {seed}: {} cells visited, {} passages carved, {} backtracks, {} ticks",
        config.columns(),
        config.rows(),
        report.cells_visited,
        report.passages_carved,
        report.backtracks,
        query::tick_index(&world),
    );
    if let Some(length) = report.solution_length {
        println!(
            "solution from {} to {}: {length} cells",
            config.start(),
            config.goal()
        );
    }

    Ok(())
}

fn carving_advanced(events: &[Event]) -> bool {
    events.iter().any(|event| {
        matches!(
            event,
            Event::CellVisited { .. }
                | Event::PassageCarved { .. }
                | Event::CarverBacktracked { .. }
        )
    })
}
