#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze state management for Maze Carve.
//!
//! The world owns the grid of cells and the carver state machine that turns
//! it into a perfect maze. All mutation flows through [`apply`]; all reads
//! flow through [`query`]. Every step is atomic, so an external driver may
//! stop applying commands at any point and the maze stays consistent and
//! resumable.

use maze_carve_core::{
    AdjacencyError, CarvePhase, CellCoord, CellSnapshot, Command, Direction, Event, GridConfig,
    Walls,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DEFAULT_CARVE_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Rectangular collection of cells addressed by (column, row).
#[derive(Clone, Debug)]
pub struct Grid {
    columns: u32,
    rows: u32,
    start: CellCoord,
    goal: CellCoord,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocates a fully walled, fully unvisited grid from a validated layout.
    #[must_use]
    pub fn new(config: &GridConfig) -> Self {
        let capacity_u64 = u64::from(config.columns()) * u64::from(config.rows());
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        let mut cells = Vec::with_capacity(capacity);
        for row in 0..config.rows() {
            for column in 0..config.columns() {
                cells.push(Cell::sealed(CellCoord::new(column, row)));
            }
        }
        Self {
            columns: config.columns(),
            rows: config.rows(),
            start: config.start(),
            goal: config.goal(),
            cells,
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Cell the carver starts from.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Fixed goal cell at the bottom-right corner.
    #[must_use]
    pub const fn goal(&self) -> CellCoord {
        self.goal
    }

    /// Returns a snapshot of the provided cell, if it lies in bounds.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<CellSnapshot> {
        self.index(coord).map(|index| {
            let cell = &self.cells[index];
            CellSnapshot {
                coord: cell.coord,
                walls: cell.walls,
                visited: cell.visited,
            }
        })
    }

    /// Number of cells the carver has visited so far.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.visited).count()
    }

    /// Collects the bounds-checked, not-yet-visited neighbors of a cell.
    ///
    /// Candidates are enumerated in the fixed north, east, south, west order;
    /// the resulting pool feeds random selection and carries no ordering
    /// guarantee to callers.
    pub fn unvisited_neighbors(&self, cell: CellCoord, out: &mut Vec<(Direction, CellCoord)>) {
        out.clear();
        for direction in Direction::ALL {
            let Some(neighbor) = cell.neighbor(direction) else {
                continue;
            };
            let Some(index) = self.index(neighbor) else {
                continue;
            };
            if !self.cells[index].visited {
                out.push((direction, neighbor));
            }
        }
    }

    /// Opens the single outward-facing entrance wall of a boundary cell.
    ///
    /// The wall is chosen by fixed priority: left edge first, then top,
    /// bottom, and right, stopping at the first match. Interior cells are
    /// left unchanged and yield `None`.
    pub fn open_boundary_wall(&mut self, cell: CellCoord) -> Option<Direction> {
        let index = self.index(cell)?;
        let direction = if cell.column() == 0 {
            Direction::West
        } else if cell.row() == 0 {
            Direction::North
        } else if cell.row() == self.rows - 1 {
            Direction::South
        } else if cell.column() == self.columns - 1 {
            Direction::East
        } else {
            return None;
        };
        self.cells[index].walls.remove(direction);
        Some(direction)
    }

    /// Unconditionally opens the east wall of the goal cell as the exit.
    pub fn open_exit(&mut self) {
        if let Some(index) = self.index(self.goal) {
            self.cells[index].walls.remove(Direction::East);
        }
    }

    /// Clears the matching wall pair between two grid-adjacent cells.
    ///
    /// Both flags are removed in the same call, which is what keeps shared
    /// walls consistent at every intermediate step of carving. Non-adjacent
    /// cells are a programming-contract violation, not user input.
    pub fn connect(&mut self, from: CellCoord, to: CellCoord) -> Result<(), AdjacencyError> {
        let direction = direction_between(from, to).ok_or(AdjacencyError { from, to })?;
        let (Some(from_index), Some(to_index)) = (self.index(from), self.index(to)) else {
            return Err(AdjacencyError { from, to });
        };
        self.cells[from_index].walls.remove(direction);
        self.cells[to_index].walls.remove(direction.opposite());
        Ok(())
    }

    /// Marks a cell visited; visited cells never return to unvisited.
    pub fn mark_visited(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            self.cells[index].visited = true;
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug)]
struct Cell {
    coord: CellCoord,
    walls: Walls,
    visited: bool,
}

impl Cell {
    fn sealed(coord: CellCoord) -> Self {
        Self {
            coord,
            walls: Walls::sealed(),
            visited: false,
        }
    }
}

/// Backtracking state machine that carves the grid into a perfect maze.
///
/// The frontier stack holds the path from the start cell to the current
/// carving position, excluding the current cell itself. It grows on forward
/// moves, shrinks on backtracks, and doubles as the source of the captured
/// solution path the moment the carver first stands on the goal.
#[derive(Debug)]
struct Carver {
    phase: CarvePhase,
    current: CellCoord,
    frontier: Vec<CellCoord>,
    solution: Option<Vec<CellCoord>>,
    rng: ChaCha8Rng,
    scratch_neighbors: Vec<(Direction, CellCoord)>,
}

impl Carver {
    fn new(start: CellCoord, seed: u64) -> Self {
        Self {
            phase: CarvePhase::Idle,
            current: start,
            frontier: Vec::new(),
            solution: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            scratch_neighbors: Vec::with_capacity(4),
        }
    }
}

/// Represents the authoritative Maze Carve world state.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    carver: Carver,
    tick_index: u64,
}

impl World {
    /// Creates a new world holding the default 20x20 layout, ready to carve.
    #[must_use]
    pub fn new() -> Self {
        let config = GridConfig::default();
        Self {
            grid: Grid::new(&config),
            carver: Carver::new(config.start(), DEFAULT_CARVE_SEED),
            tick_index: 0,
        }
    }

    fn reset(&mut self, config: &GridConfig, seed: u64) {
        self.grid = Grid::new(config);
        self.carver = Carver::new(config.start(), seed);
    }

    fn begin(&mut self, out_events: &mut Vec<Event>) {
        let start = self.grid.start();
        self.grid.mark_visited(start);
        out_events.push(Event::CellVisited { cell: start });

        if let Some(direction) = self.grid.open_boundary_wall(start) {
            out_events.push(Event::EntranceOpened {
                cell: start,
                direction,
            });
        }

        self.grid.open_exit();
        out_events.push(Event::ExitOpened {
            cell: self.grid.goal(),
        });

        self.carver.current = start;
        self.carver.phase = CarvePhase::Carving;
    }

    fn advance(&mut self, out_events: &mut Vec<Event>) {
        if self.carver.current == self.grid.goal() && self.carver.solution.is_none() {
            let mut path = self.carver.frontier.clone();
            path.push(self.carver.current);
            out_events.push(Event::SolutionCaptured { length: path.len() });
            self.carver.solution = Some(path);
        }

        self.grid
            .unvisited_neighbors(self.carver.current, &mut self.carver.scratch_neighbors);

        if self.carver.scratch_neighbors.is_empty() {
            if let Some(previous) = self.carver.frontier.pop() {
                self.carver.current = previous;
                out_events.push(Event::CarverBacktracked { to: previous });
            } else {
                self.carver.phase = CarvePhase::Done;
                out_events.push(Event::GenerationCompleted);
            }
            return;
        }

        let index = self.carver.rng.gen_range(0..self.carver.scratch_neighbors.len());
        let (direction, chosen) = self.carver.scratch_neighbors[index];

        match self.grid.connect(self.carver.current, chosen) {
            Ok(()) => {
                self.carver.frontier.push(self.carver.current);
                self.grid.mark_visited(chosen);
                out_events.push(Event::PassageCarved {
                    from: self.carver.current,
                    to: chosen,
                    direction,
                });
                out_events.push(Event::CellVisited { cell: chosen });
                self.carver.current = chosen;
            }
            Err(defect) => {
                debug_assert!(false, "carver selected a non-adjacent neighbor: {defect}");
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureMaze { config, seed } => {
            world.reset(&config, seed);
            out_events.push(Event::MazeConfigured { config });
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::Step => {
            if world.carver.phase == CarvePhase::Idle {
                world.begin(out_events);
            }
            if world.carver.phase == CarvePhase::Carving {
                world.advance(out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Grid, World};
    use maze_carve_core::{CarvePhase, CellCoord, CellSnapshot, MazeView};

    /// Provides read-only access to the world's grid of cells.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Reports the current phase of the carver state machine.
    #[must_use]
    pub fn phase(world: &World) -> CarvePhase {
        world.carver.phase
    }

    /// Reports whether every reachable cell has been visited.
    #[must_use]
    pub fn is_complete(world: &World) -> bool {
        world.carver.phase == CarvePhase::Done
    }

    /// Cell the carver currently stands on.
    #[must_use]
    pub fn carver_position(world: &World) -> CellCoord {
        world.carver.current
    }

    /// Number of ticks the world clock has advanced.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// The frozen start-to-goal path, present once the goal has been reached.
    #[must_use]
    pub fn solution_path(world: &World) -> Option<&[CellCoord]> {
        world.carver.solution.as_deref()
    }

    /// Captures a read-only, row-major view of every cell in the maze.
    #[must_use]
    pub fn maze_view(world: &World) -> MazeView {
        let grid = &world.grid;
        let mut snapshots: Vec<CellSnapshot> = Vec::new();
        for row in 0..grid.rows() {
            for column in 0..grid.columns() {
                if let Some(snapshot) = grid.cell(CellCoord::new(column, row)) {
                    snapshots.push(snapshot);
                }
            }
        }
        MazeView::from_snapshots(grid.columns(), grid.rows(), snapshots)
    }
}

fn direction_between(from: CellCoord, to: CellCoord) -> Option<Direction> {
    let column_diff = from.column().abs_diff(to.column());
    let row_diff = from.row().abs_diff(to.row());

    if column_diff + row_diff != 1 {
        return None;
    }

    if column_diff == 1 {
        if to.column() > from.column() {
            Some(Direction::East)
        } else {
            Some(Direction::West)
        }
    } else if to.row() > from.row() {
        Some(Direction::South)
    } else {
        Some(Direction::North)
    }
}
