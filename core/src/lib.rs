#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Carve engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::{fmt, time::Duration};

use thiserror::Error;

/// Canonical banner emitted when the carver boots.
pub const WELCOME_BANNER: &str = "Maze Carve: randomized depth-first maze generation.";

/// Grid columns used when the caller provides no layout of its own.
pub const DEFAULT_GRID_COLUMNS: u32 = 20;

/// Grid rows used when the caller provides no layout of its own.
pub const DEFAULT_GRID_ROWS: u32 = 20;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replaces the maze with a fresh, fully-walled grid ready for carving.
    ConfigureMaze {
        /// Validated grid layout describing dimensions and the start cell.
        config: GridConfig,
        /// Seed for the carver's random neighbor selection.
        seed: u64,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the carver advance by exactly one algorithm step.
    Step,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a fresh maze was configured and awaits carving.
    MazeConfigured {
        /// Layout the maze was configured with.
        config: GridConfig,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a cell transitioned from unvisited to visited.
    CellVisited {
        /// Coordinate of the newly visited cell.
        cell: CellCoord,
    },
    /// Announces that the maze entrance was opened on the grid boundary.
    EntranceOpened {
        /// Start cell whose outward-facing wall was removed.
        cell: CellCoord,
        /// Which wall of the start cell was removed.
        direction: Direction,
    },
    /// Announces that the exit wall of the goal cell was opened.
    ExitOpened {
        /// Goal cell whose east wall was removed.
        cell: CellCoord,
    },
    /// Confirms that the wall pair between two adjacent cells was removed.
    PassageCarved {
        /// Cell the carver advanced from.
        from: CellCoord,
        /// Cell the carver advanced into.
        to: CellCoord,
        /// Direction of travel from `from` to `to`.
        direction: Direction,
    },
    /// Reports that the carver retreated along the frontier stack.
    CarverBacktracked {
        /// Cell the carver retreated to.
        to: CellCoord,
    },
    /// Announces that the unique start-to-goal path was frozen.
    SolutionCaptured {
        /// Number of cells in the captured path, start and goal inclusive.
        length: usize,
    },
    /// Announces that every reachable cell has been visited.
    GenerationCompleted,
}

/// Location of a single maze cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Coordinate of the cell one step away in the provided direction.
    ///
    /// Returns `None` when the step would leave the non-negative coordinate
    /// space; grids apply their own upper bounds separately.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self
                .row
                .checked_sub(1)
                .map(|row| Self::new(self.column, row)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Direction::South => self
                .row
                .checked_add(1)
                .map(|row| Self::new(self.column, row)),
            Direction::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.column, self.row)
    }
}

/// Cardinal directions used for walls and carving moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward decreasing row indices (the top of the grid).
    North,
    /// Toward increasing column indices (the right of the grid).
    East,
    /// Toward increasing row indices (the bottom of the grid).
    South,
    /// Toward decreasing column indices (the left of the grid).
    West,
}

impl Direction {
    /// Fixed enumeration order used when collecting neighbor candidates.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Direction pointing back the way this one came.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

/// Wall flags surrounding a single cell; a set flag means the wall stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Walls {
    north: bool,
    east: bool,
    south: bool,
    west: bool,
}

impl Walls {
    /// Creates a fully sealed cell with all four walls standing.
    #[must_use]
    pub const fn sealed() -> Self {
        Self {
            north: true,
            east: true,
            south: true,
            west: true,
        }
    }

    /// Reports whether the wall in the provided direction stands.
    #[must_use]
    pub const fn is_present(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    /// Removes exactly one wall flag; already-removed walls stay removed.
    pub fn remove(&mut self, direction: Direction) {
        match direction {
            Direction::North => self.north = false,
            Direction::East => self.east = false,
            Direction::South => self.south = false,
            Direction::West => self.west = false,
        }
    }

    /// Number of walls still standing around the cell.
    #[must_use]
    pub const fn standing(&self) -> u32 {
        self.north as u32 + self.east as u32 + self.south as u32 + self.west as u32
    }
}

impl Default for Walls {
    fn default() -> Self {
        Self::sealed()
    }
}

/// Immutable representation of a single cell's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSnapshot {
    /// Coordinate of the cell within the grid.
    pub coord: CellCoord,
    /// Wall flags of the cell at capture time.
    pub walls: Walls,
    /// Whether the carver has visited the cell.
    pub visited: bool,
}

/// Read-only snapshot describing every cell of the maze in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeView {
    columns: u32,
    rows: u32,
    cells: Vec<CellSnapshot>,
}

impl MazeView {
    /// Creates a new maze view from row-major cell snapshots.
    ///
    /// The snapshot count must equal `columns * rows`; the view trusts the
    /// producing world to uphold that, and lookups simply miss otherwise.
    #[must_use]
    pub fn from_snapshots(columns: u32, rows: u32, cells: Vec<CellSnapshot>) -> Self {
        Self {
            columns,
            rows,
            cells,
        }
    }

    /// Provides the dimensions of the underlying grid as (columns, rows).
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Returns the snapshot of the provided cell, if it lies in bounds.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&CellSnapshot> {
        self.index(coord).and_then(|index| self.cells.get(index))
    }

    /// Iterator over the captured cell snapshots in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &CellSnapshot> {
        self.cells.iter()
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        if coord.column() < self.columns && coord.row() < self.rows {
            let row = usize::try_from(coord.row()).ok()?;
            let column = usize::try_from(coord.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Phase of the carver state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CarvePhase {
    /// The maze is configured but carving has not started.
    Idle,
    /// The carver is advancing or backtracking through the grid.
    Carving,
    /// Every reachable cell is visited; further steps are no-ops.
    Done,
}

/// Validated maze layout: dimensions, start cell, and the implied goal.
///
/// A value of this type can only be obtained through [`GridConfig::new`] or
/// [`GridConfig::default`], so holding one proves the layout is well formed
/// and no partially constructed grid is ever exposed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    columns: u32,
    rows: u32,
    start: CellCoord,
}

impl GridConfig {
    /// Validates and creates a maze layout.
    ///
    /// Dimensions must both be at least one and the start cell must lie
    /// inside the grid.
    pub fn new(columns: u32, rows: u32, start: CellCoord) -> Result<Self, ConfigError> {
        if columns < 1 || rows < 1 {
            return Err(ConfigError::InvalidDimension { columns, rows });
        }
        if start.column() >= columns || start.row() >= rows {
            return Err(ConfigError::InvalidStart {
                start,
                columns,
                rows,
            });
        }
        Ok(Self {
            columns,
            rows,
            start,
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Cell the carver starts from.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Fixed goal cell at the bottom-right corner of the grid.
    #[must_use]
    pub const fn goal(&self) -> CellCoord {
        CellCoord::new(self.columns - 1, self.rows - 1)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_GRID_COLUMNS,
            rows: DEFAULT_GRID_ROWS,
            start: CellCoord::new(0, 0),
        }
    }
}

/// Reasons a maze layout may be rejected before any grid exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Width or height of the requested grid is below one.
    #[error("maze dimensions must be at least 1x1, got {columns}x{rows}")]
    InvalidDimension {
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
    /// The start cell lies outside the requested grid.
    #[error("start cell {start} lies outside the {columns}x{rows} grid")]
    InvalidStart {
        /// Requested start cell.
        start: CellCoord,
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
}

/// Contract violation raised when two cells passed to `connect` are not
/// exactly one grid step apart on a single axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("cells {from} and {to} are not grid-adjacent")]
pub struct AdjacencyError {
    /// First cell of the rejected pair.
    pub from: CellCoord,
    /// Second cell of the rejected pair.
    pub to: CellCoord,
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, ConfigError, Direction, GridConfig, Walls};

    #[test]
    fn neighbor_steps_follow_directions() {
        let cell = CellCoord::new(3, 4);
        assert_eq!(cell.neighbor(Direction::North), Some(CellCoord::new(3, 3)));
        assert_eq!(cell.neighbor(Direction::East), Some(CellCoord::new(4, 4)));
        assert_eq!(cell.neighbor(Direction::South), Some(CellCoord::new(3, 5)));
        assert_eq!(cell.neighbor(Direction::West), Some(CellCoord::new(2, 4)));
    }

    #[test]
    fn neighbor_refuses_to_leave_coordinate_space() {
        let origin = CellCoord::new(0, 0);
        assert_eq!(origin.neighbor(Direction::North), None);
        assert_eq!(origin.neighbor(Direction::West), None);
    }

    #[test]
    fn opposites_pair_up() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
    }

    #[test]
    fn walls_remove_exactly_one_flag() {
        let mut walls = Walls::sealed();
        assert_eq!(walls.standing(), 4);

        walls.remove(Direction::East);
        assert!(!walls.is_present(Direction::East));
        assert!(walls.is_present(Direction::North));
        assert!(walls.is_present(Direction::South));
        assert!(walls.is_present(Direction::West));
        assert_eq!(walls.standing(), 3);

        walls.remove(Direction::East);
        assert_eq!(walls.standing(), 3);
    }

    #[test]
    fn config_rejects_zero_dimensions() {
        let error = GridConfig::new(0, 5, CellCoord::new(0, 0));
        assert_eq!(
            error,
            Err(ConfigError::InvalidDimension {
                columns: 0,
                rows: 5
            })
        );
    }

    #[test]
    fn config_rejects_start_outside_grid() {
        let error = GridConfig::new(4, 4, CellCoord::new(4, 0));
        assert_eq!(
            error,
            Err(ConfigError::InvalidStart {
                start: CellCoord::new(4, 0),
                columns: 4,
                rows: 4
            })
        );
    }

    #[test]
    fn goal_is_anchored_to_the_bottom_right_corner() {
        let config = GridConfig::new(7, 5, CellCoord::new(2, 2)).expect("valid layout");
        assert_eq!(config.goal(), CellCoord::new(6, 4));
    }

    #[test]
    fn default_layout_matches_documented_constants() {
        let config = GridConfig::default();
        assert_eq!(config.columns(), super::DEFAULT_GRID_COLUMNS);
        assert_eq!(config.rows(), super::DEFAULT_GRID_ROWS);
        assert_eq!(config.start(), CellCoord::new(0, 0));
    }
}
