#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! ASCII frame building for Maze Carve adapters.
//!
//! The renderer consumes read-only maze views and produces plain text
//! frames; it performs no I/O and holds no state. Walls are painted only for
//! visited cells, matching the incremental reveal of the carving animation:
//! unvisited regions stay blank until the carver reaches them.

use std::collections::HashSet;

use maze_carve_core::{CellCoord, CellSnapshot, Direction, MazeView};

const CELL_WIDTH: usize = 4;
const CELL_HEIGHT: usize = 2;

/// Builds an ASCII frame from a maze view.
///
/// Cells on the captured solution path are marked `*`, the carver's current
/// position is marked `@`, and trailing whitespace is trimmed from every
/// line. Both overlays are optional so the same function renders
/// mid-carving animation frames and the finished maze.
#[must_use]
pub fn render_frame(
    view: &MazeView,
    solution: Option<&[CellCoord]>,
    cursor: Option<CellCoord>,
) -> String {
    let (columns, rows) = view.dimensions();
    let width = columns as usize * CELL_WIDTH + 1;
    let height = rows as usize * CELL_HEIGHT + 1;
    let mut canvas = vec![vec![' '; width]; height];

    let solution_cells: HashSet<CellCoord> = solution
        .unwrap_or_default()
        .iter()
        .copied()
        .collect();

    for cell in view.iter() {
        if cell.visited {
            paint_walls(&mut canvas, cell);
        }
        if let Some(marker) = cell_marker(cell.coord, &solution_cells, cursor) {
            let (x, y) = cell_origin(cell.coord);
            canvas[y + 1][x + CELL_WIDTH / 2] = marker;
        }
    }

    let mut frame = String::with_capacity(height * (width + 1));
    for line in canvas {
        let text: String = line.into_iter().collect();
        frame.push_str(text.trim_end());
        frame.push('\n');
    }
    frame
}

fn cell_marker(
    coord: CellCoord,
    solution_cells: &HashSet<CellCoord>,
    cursor: Option<CellCoord>,
) -> Option<char> {
    if cursor == Some(coord) {
        Some('@')
    } else if solution_cells.contains(&coord) {
        Some('*')
    } else {
        None
    }
}

fn cell_origin(coord: CellCoord) -> (usize, usize) {
    (
        coord.column() as usize * CELL_WIDTH,
        coord.row() as usize * CELL_HEIGHT,
    )
}

fn paint_walls(canvas: &mut [Vec<char>], cell: &CellSnapshot) {
    let (x, y) = cell_origin(cell.coord);

    if cell.walls.is_present(Direction::North) {
        paint_horizontal(canvas, x, y);
    }
    if cell.walls.is_present(Direction::South) {
        paint_horizontal(canvas, x, y + CELL_HEIGHT);
    }
    if cell.walls.is_present(Direction::West) {
        paint_vertical(canvas, x, y);
    }
    if cell.walls.is_present(Direction::East) {
        paint_vertical(canvas, x + CELL_WIDTH, y);
    }
}

fn paint_horizontal(canvas: &mut [Vec<char>], x: usize, y: usize) {
    canvas[y][x] = '+';
    for offset in 1..CELL_WIDTH {
        canvas[y][x + offset] = '-';
    }
    canvas[y][x + CELL_WIDTH] = '+';
}

fn paint_vertical(canvas: &mut [Vec<char>], x: usize, y: usize) {
    canvas[y][x] = '+';
    canvas[y + 1][x] = '|';
    canvas[y + CELL_HEIGHT][x] = '+';
}
