use maze_carve_core::{
    CarvePhase, CellCoord, Command, ConfigError, Direction, Event, GridConfig,
};
use maze_carve_world::{self as world, query, World};

fn configured_world(columns: u32, rows: u32, start: (u32, u32), seed: u64) -> World {
    let config =
        GridConfig::new(columns, rows, CellCoord::new(start.0, start.1)).expect("valid layout");
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::ConfigureMaze { config, seed }, &mut events);
    world
}

fn step(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Step, &mut events);
    events
}

fn carve_to_completion(world: &mut World) -> Vec<Event> {
    let grid = query::grid(world);
    let budget = (grid.columns() as usize * grid.rows() as usize) * 4 + 8;
    let mut log = Vec::new();

    for _ in 0..budget {
        if query::is_complete(world) {
            break;
        }
        log.extend(step(world));
    }

    assert!(
        query::is_complete(world),
        "carving did not finish within the step budget"
    );
    log
}

fn assert_wall_pairs_symmetric(world: &World) {
    let grid = query::grid(world);
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let coord = CellCoord::new(column, row);
            let cell = grid.cell(coord).expect("cell in bounds");
            for direction in [Direction::East, Direction::South] {
                let Some(neighbor_coord) = coord.neighbor(direction) else {
                    continue;
                };
                let Some(neighbor) = grid.cell(neighbor_coord) else {
                    continue;
                };
                assert_eq!(
                    cell.walls.is_present(direction),
                    neighbor.walls.is_present(direction.opposite()),
                    "asymmetric wall pair between {coord} and {neighbor_coord}"
                );
            }
        }
    }
}

fn removed_interior_pairs(world: &World) -> usize {
    let grid = query::grid(world);
    let mut removed = 0;
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let coord = CellCoord::new(column, row);
            let cell = grid.cell(coord).expect("cell in bounds");
            for direction in [Direction::East, Direction::South] {
                let neighbor_exists = coord
                    .neighbor(direction)
                    .and_then(|neighbor| grid.cell(neighbor))
                    .is_some();
                if neighbor_exists && !cell.walls.is_present(direction) {
                    removed += 1;
                }
            }
        }
    }
    removed
}

fn boundary_openings(world: &World) -> Vec<(CellCoord, Direction)> {
    let grid = query::grid(world);
    let mut openings = Vec::new();
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let coord = CellCoord::new(column, row);
            let cell = grid.cell(coord).expect("cell in bounds");
            for direction in Direction::ALL {
                let outward = coord
                    .neighbor(direction)
                    .and_then(|neighbor| grid.cell(neighbor))
                    .is_none();
                if outward && !cell.walls.is_present(direction) {
                    openings.push((coord, direction));
                }
            }
        }
    }
    openings
}

#[test]
fn completed_maze_visits_every_cell_exactly_once() {
    let mut world = configured_world(6, 5, (0, 0), 0x5eed_0001);
    let log = carve_to_completion(&mut world);

    assert_eq!(query::grid(&world).visited_count(), 30);

    let visit_events = log
        .iter()
        .filter(|event| matches!(event, Event::CellVisited { .. }))
        .count();
    assert_eq!(visit_events, 30, "a cell was visited more than once");
}

#[test]
fn completed_maze_is_acyclic_and_connected() {
    let mut world = configured_world(7, 6, (0, 0), 0x5eed_0002);
    let _ = carve_to_completion(&mut world);

    // A perfect maze on N cells removes exactly N - 1 interior wall pairs.
    assert_eq!(removed_interior_pairs(&world), 7 * 6 - 1);

    let openings = boundary_openings(&world);
    assert_eq!(
        openings,
        vec![
            (CellCoord::new(0, 0), Direction::West),
            (CellCoord::new(6, 5), Direction::East),
        ],
        "expected exactly one entrance and one exit on the perimeter"
    );
}

#[test]
fn wall_pairs_stay_symmetric_at_every_intermediate_step() {
    let mut world = configured_world(5, 4, (2, 0), 0x5eed_0003);
    let budget = 5 * 4 * 4 + 8;

    for _ in 0..budget {
        if query::is_complete(&world) {
            break;
        }
        let _ = step(&mut world);
        assert_wall_pairs_symmetric(&world);
    }

    assert!(query::is_complete(&world));
}

#[test]
fn solution_path_connects_start_to_goal_without_walls() {
    let mut world = configured_world(8, 6, (0, 3), 0x5eed_0004);
    let log = carve_to_completion(&mut world);

    let captures = log
        .iter()
        .filter(|event| matches!(event, Event::SolutionCaptured { .. }))
        .count();
    assert_eq!(captures, 1, "the solution must be captured exactly once");

    let path = query::solution_path(&world).expect("solution captured");
    assert_eq!(*path.first().expect("non-empty path"), CellCoord::new(0, 3));
    assert_eq!(*path.last().expect("non-empty path"), CellCoord::new(7, 5));

    let grid = query::grid(&world);
    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let direction = Direction::ALL
            .into_iter()
            .find(|direction| from.neighbor(*direction) == Some(to))
            .unwrap_or_else(|| panic!("{from} and {to} are not grid-adjacent"));

        let from_walls = grid.cell(from).expect("cell in bounds").walls;
        let to_walls = grid.cell(to).expect("cell in bounds").walls;
        assert!(!from_walls.is_present(direction), "wall blocks {from} -> {to}");
        assert!(!to_walls.is_present(direction.opposite()));
    }
}

#[test]
fn steps_after_done_mutate_nothing() {
    let mut world = configured_world(4, 4, (0, 0), 0x5eed_0005);
    let _ = carve_to_completion(&mut world);

    let view_before = query::maze_view(&world);
    let solution_before: Vec<CellCoord> = query::solution_path(&world)
        .expect("solution captured")
        .to_vec();

    for _ in 0..3 {
        let events = step(&mut world);
        assert!(events.is_empty(), "a completed carver must stay silent");
    }

    assert_eq!(query::phase(&world), CarvePhase::Done);
    assert_eq!(query::maze_view(&world), view_before);
    assert_eq!(
        query::solution_path(&world).expect("solution captured"),
        solution_before.as_slice()
    );
}

#[test]
fn three_by_three_scenario_from_the_top_left_corner() {
    let mut world = configured_world(3, 3, (0, 0), 0x5eed_0006);
    let _ = carve_to_completion(&mut world);

    assert_eq!(query::grid(&world).visited_count(), 9);

    let grid = query::grid(&world);
    let start = grid.cell(CellCoord::new(0, 0)).expect("cell in bounds");
    // Column 0 matches the left-edge rule before the top-edge rule fires.
    assert!(!start.walls.is_present(Direction::West));
    assert!(start.walls.is_present(Direction::North));

    let goal = grid.cell(CellCoord::new(2, 2)).expect("cell in bounds");
    assert!(!goal.walls.is_present(Direction::East));

    let path = query::solution_path(&world).expect("solution captured");
    assert!(!path.is_empty());
    assert_eq!(*path.last().expect("non-empty path"), CellCoord::new(2, 2));
}

#[test]
fn one_by_one_grid_resolves_on_the_very_first_step() {
    let mut world = configured_world(1, 1, (0, 0), 0x5eed_0007);
    let events = step(&mut world);

    assert!(query::is_complete(&world));
    assert_eq!(query::grid(&world).visited_count(), 1);
    assert_eq!(
        query::solution_path(&world).expect("solution captured"),
        &[CellCoord::new(0, 0)]
    );
    assert!(events.contains(&Event::SolutionCaptured { length: 1 }));
    assert!(events.contains(&Event::GenerationCompleted));
}

#[test]
fn start_on_the_goal_yields_a_one_cell_solution() {
    let mut world = configured_world(4, 4, (3, 3), 0x5eed_0008);
    let _ = step(&mut world);

    assert_eq!(
        query::solution_path(&world).expect("solution captured"),
        &[CellCoord::new(3, 3)]
    );

    let _ = carve_to_completion(&mut world);
    assert_eq!(query::grid(&world).visited_count(), 16);
}

#[test]
fn zero_width_layout_is_rejected_before_any_grid_exists() {
    assert_eq!(
        GridConfig::new(0, 8, CellCoord::new(0, 0)),
        Err(ConfigError::InvalidDimension {
            columns: 0,
            rows: 8
        })
    );
}

#[test]
fn same_seed_reproduces_the_maze_and_different_seeds_diverge() {
    let mut first = configured_world(10, 10, (0, 0), 0xd1ce);
    let mut second = configured_world(10, 10, (0, 0), 0xd1ce);
    let _ = carve_to_completion(&mut first);
    let _ = carve_to_completion(&mut second);

    assert_eq!(query::maze_view(&first), query::maze_view(&second));
    assert_eq!(
        query::solution_path(&first).expect("solution captured"),
        query::solution_path(&second).expect("solution captured")
    );

    let mut other = configured_world(10, 10, (0, 0), 0xfeed);
    let _ = carve_to_completion(&mut other);
    assert_ne!(query::maze_view(&first), query::maze_view(&other));
}
