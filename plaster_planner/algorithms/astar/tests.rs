use super::AStarPlanner;
use crate::algorithms::geometry;
use crate::algorithms::occupancy_grid::{Cell, GridBuilder, OccupancyGrid};
use approx::assert_relative_eq;
use plaster_core::surface::Obstacle;

/// Grid with 1 m cells whose listed cells are occupied
fn grid_with_occupied(rows: i32, cols: i32, occupied: &[Cell]) -> OccupancyGrid {
    let mut builder = GridBuilder::new(cols as f64, rows as f64, 1.0).unwrap();
    let obstacles: Vec<Obstacle> = occupied
        .iter()
        .map(|(row, col)| Obstacle::Rectangle {
            x: *col as f64 + 0.5,
            y: *row as f64 + 0.5,
            width: 0.5,
            height: 0.5,
        })
        .collect();
    builder.add_obstacles(&obstacles).unwrap();
    builder.build()
}

#[test]
fn test_empty_grid_diagonal() {
    // Surface 0.3x0.3 at 0.1m: a 3x3 grid crossed corner to corner
    let grid = GridBuilder::new(0.3, 0.3, 0.1).unwrap().build();
    let planner = AStarPlanner::new(&grid);

    let path = planner.plan((0, 0), (2, 2));
    assert_eq!(path.len(), 3);

    let expected = [(0.05, 0.05), (0.15, 0.15), (0.25, 0.25)];
    for (waypoint, (x, y)) in path.iter().zip(expected) {
        assert_relative_eq!(waypoint.x, x);
        assert_relative_eq!(waypoint.y, y);
        assert_eq!(waypoint.z, 0.0);
    }

    assert_relative_eq!(
        geometry::path_length(&path),
        2.0 * std::f64::consts::SQRT_2 * 0.1,
        epsilon = 1e-9
    );
}

#[test]
fn test_optimal_length_on_open_grid() {
    // With no obstacles the optimal 8-connected length is
    // min(dr, dc) * sqrt(2) + |dr - dc| cell steps
    let grid = grid_with_occupied(20, 20, &[]);
    let planner = AStarPlanner::new(&grid);

    let cases = [
        ((0, 0), (19, 19)),
        ((0, 0), (0, 19)),
        ((3, 5), (12, 7)),
        ((18, 2), (4, 16)),
        ((10, 10), (10, 10)),
    ];

    for (start, goal) in cases {
        let path = planner.plan(start, goal);
        assert!(!path.is_empty());

        let dr = (goal.0 - start.0).abs() as f64;
        let dc = (goal.1 - start.1).abs() as f64;
        let expected = dr.min(dc) * std::f64::consts::SQRT_2 + (dr - dc).abs();
        assert_relative_eq!(geometry::path_length(&path), expected, epsilon = 1e-9);
    }
}

#[test]
fn test_path_around_wall_gap() {
    // Vertical wall at col 10 with a gap at rows 7..=12
    let mut occupied = Vec::new();
    for row in 0..7 {
        occupied.push((row, 10));
    }
    for row in 13..20 {
        occupied.push((row, 10));
    }
    let grid = grid_with_occupied(20, 20, &occupied);
    let planner = AStarPlanner::new(&grid);

    let path = planner.plan((10, 0), (10, 19));
    assert!(!path.is_empty());

    // Path must thread the gap
    let through_gap = path.iter().any(|wp| {
        let (row, col) = grid.world_to_grid(wp.x, wp.y);
        col == 10 && (7..=12).contains(&row)
    });
    assert!(through_gap);
}

#[test]
fn test_path_cells_free_and_connected() {
    let occupied: Vec<Cell> = (2..9).map(|row| (row, 5)).collect();
    let grid = grid_with_occupied(10, 10, &occupied);
    let planner = AStarPlanner::new(&grid);

    let path = planner.plan((5, 0), (5, 9));
    assert!(!path.is_empty());

    let cells: Vec<Cell> = path
        .iter()
        .map(|wp| grid.world_to_grid(wp.x, wp.y))
        .collect();
    for cell in &cells {
        assert!(grid.is_free(cell.0, cell.1));
    }
    for pair in cells.windows(2) {
        let dr = (pair[1].0 - pair[0].0).abs();
        let dc = (pair[1].1 - pair[0].1).abs();
        assert!(dr <= 1 && dc <= 1 && dr + dc > 0);
    }
}

#[test]
fn test_no_path_exists() {
    // Complete wall across the grid
    let occupied: Vec<Cell> = (0..10).map(|row| (row, 5)).collect();
    let grid = grid_with_occupied(10, 10, &occupied);
    let planner = AStarPlanner::new(&grid);

    assert!(planner.plan((0, 0), (9, 9)).is_empty());
}

#[test]
fn test_start_equals_goal() {
    let grid = grid_with_occupied(10, 10, &[]);
    let planner = AStarPlanner::new(&grid);

    let path = planner.plan((5, 5), (5, 5));
    assert_eq!(path.len(), 1);
    assert_relative_eq!(path[0].x, 5.5);
    assert_relative_eq!(path[0].y, 5.5);
}

#[test]
fn test_blocked_endpoints() {
    let grid = grid_with_occupied(10, 10, &[(0, 0), (9, 9)]);
    let planner = AStarPlanner::new(&grid);

    assert!(planner.plan((0, 0), (5, 5)).is_empty());
    assert!(planner.plan((5, 5), (9, 9)).is_empty());
    assert!(planner.plan((-1, 0), (5, 5)).is_empty());
    assert!(planner.plan((5, 5), (5, 10)).is_empty());
}

#[test]
fn test_nearest_free_cell() {
    let grid = grid_with_occupied(5, 5, &[(2, 2)]);
    let planner = AStarPlanner::new(&grid);

    // Free target is returned as is
    assert_eq!(planner.find_nearest_free_cell((1, 1), 10), Some((1, 1)));

    // Row-major scan of the radius-1 square finds the top-left neighbor
    assert_eq!(planner.find_nearest_free_cell((2, 2), 10), Some((1, 1)));
}

#[test]
fn test_nearest_free_cell_expands_radius() {
    // 3x3 block around the center
    let mut occupied = Vec::new();
    for row in 1..4 {
        for col in 1..4 {
            occupied.push((row, col));
        }
    }
    let grid = grid_with_occupied(5, 5, &occupied);
    let planner = AStarPlanner::new(&grid);

    // Radius 1 is fully occupied; radius 2 starts at (0, 0)
    assert_eq!(planner.find_nearest_free_cell((2, 2), 10), Some((0, 0)));
    // Radius too small to escape the block
    assert_eq!(planner.find_nearest_free_cell((2, 2), 1), None);
}
