#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic progress system that folds carving events into counters.
//!
//! The system holds no references into the world; adapters feed it the event
//! stream and read back a [`ProgressReport`] for presentation. A fresh maze
//! configuration resets every counter.

use maze_carve_core::Event;

/// Pure system accumulating carving statistics from world events.
#[derive(Debug, Default)]
pub struct Progress {
    cells_visited: usize,
    passages_carved: usize,
    backtracks: usize,
    solution_length: Option<usize>,
    complete: bool,
}

impl Progress {
    /// Creates a new progress tracker with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events, updating the accumulated statistics.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::MazeConfigured { .. } => *self = Self::default(),
                Event::CellVisited { .. } => self.cells_visited += 1,
                Event::PassageCarved { .. } => self.passages_carved += 1,
                Event::CarverBacktracked { .. } => self.backtracks += 1,
                Event::SolutionCaptured { length } => self.solution_length = Some(*length),
                Event::GenerationCompleted => self.complete = true,
                _ => {}
            }
        }
    }

    /// Produces an immutable snapshot of the accumulated statistics.
    #[must_use]
    pub fn report(&self) -> ProgressReport {
        ProgressReport {
            cells_visited: self.cells_visited,
            passages_carved: self.passages_carved,
            backtracks: self.backtracks,
            solution_length: self.solution_length,
            complete: self.complete,
        }
    }
}

/// Immutable snapshot of carving statistics used for presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressReport {
    /// Number of cells the carver has visited.
    pub cells_visited: usize,
    /// Number of wall pairs removed between adjacent cells.
    pub passages_carved: usize,
    /// Number of backtracking moves along the frontier stack.
    pub backtracks: usize,
    /// Length of the captured solution path, once the goal was reached.
    pub solution_length: Option<usize>,
    /// Whether maze generation has completed.
    pub complete: bool,
}
