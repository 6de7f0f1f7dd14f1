//! 2D Occupancy Grid
//!
//! Free/occupied bitmap of a work surface for the planning algorithms.
//!
//! # Features
//!
//! - Binary occupancy (free/occupied) from obstacle rasterization
//! - Grid-world coordinate conversion (cells addressed by their center)
//! - Fixed-order neighborhood queries for reproducible search
//! - Coverage accounting over visited cells
//!
//! Obstacles are loaded through a [`GridBuilder`]; the resulting
//! [`OccupancyGrid`] is immutable, so planners can never mutate the map
//! mid-search.
//!
//! # Example
//!
//! ```rust
//! use plaster_core::Obstacle;
//! use plaster_planner::algorithms::occupancy_grid::GridBuilder;
//!
//! let mut builder = GridBuilder::new(2.0, 1.0, 0.1).unwrap();  // 2m x 1m at 0.1m
//! builder
//!     .add_obstacles(&[Obstacle::Circle { x: 1.0, y: 0.5, radius: 0.2 }])
//!     .unwrap();
//! let grid = builder.build();
//!
//! assert!(grid.is_free(0, 0));
//! assert!(!grid.is_free(5, 10));
//! ```

use crate::algorithms::geometry::Shape;
use nalgebra::Point2;
use plaster_core::error::{PlasterError, PlasterResult};
use plaster_core::surface::Obstacle;
use std::collections::HashSet;

/// A grid cell address as (row, col)
pub type Cell = (i32, i32);

/// Builder that rasterizes obstacles into an [`OccupancyGrid`]
#[derive(Debug)]
pub struct GridBuilder {
    rows: i32,
    cols: i32,
    resolution: f64,
    cells: Vec<bool>, // true = occupied
}

impl GridBuilder {
    /// Create an all-free grid covering `width` x `height` meters
    ///
    /// Grid dimensions are `ceil(width / resolution)` columns by
    /// `ceil(height / resolution)` rows.
    pub fn new(width: f64, height: f64, resolution: f64) -> PlasterResult<Self> {
        if width <= 0.0 || height <= 0.0 || resolution <= 0.0 {
            return Err(PlasterError::InvalidRequest(format!(
                "surface dimensions must be positive, got {}x{} at resolution {}",
                width, height, resolution
            )));
        }

        let cols = (width / resolution).ceil() as i32;
        let rows = (height / resolution).ceil() as i32;

        Ok(Self {
            rows,
            cols,
            resolution,
            cells: vec![false; (rows * cols) as usize],
        })
    }

    /// Rasterize obstacles: every cell whose CENTER lies inside an
    /// obstacle shape is marked occupied. Portions outside the grid are
    /// clipped.
    pub fn add_obstacles(&mut self, obstacles: &[Obstacle]) -> PlasterResult<()> {
        for obstacle in obstacles {
            let shape = Shape::from_obstacle(obstacle)?;
            let (min_x, min_y, max_x, max_y) = shape.bounds();

            let min_col = ((min_x / self.resolution).floor() as i32).max(0);
            let min_row = ((min_y / self.resolution).floor() as i32).max(0);
            let max_col = ((max_x / self.resolution).floor() as i32 + 1).min(self.cols);
            let max_row = ((max_y / self.resolution).floor() as i32 + 1).min(self.rows);

            for row in min_row..max_row {
                for col in min_col..max_col {
                    let center_x = (col as f64 + 0.5) * self.resolution;
                    let center_y = (row as f64 + 0.5) * self.resolution;
                    if shape.contains(Point2::new(center_x, center_y)) {
                        self.cells[(row * self.cols + col) as usize] = true;
                    }
                }
            }
        }
        Ok(())
    }

    /// Finish loading and yield the immutable grid
    pub fn build(self) -> OccupancyGrid {
        OccupancyGrid {
            rows: self.rows,
            cols: self.cols,
            resolution: self.resolution,
            cells: self.cells,
        }
    }
}

/// Immutable occupancy grid
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    rows: i32,
    cols: i32,
    resolution: f64,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Number of rows
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Cell size in meters
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Check if coordinates are within grid bounds
    pub fn is_valid(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.rows && col >= 0 && col < self.cols
    }

    /// Check if a cell is free (out of bounds counts as not free)
    pub fn is_free(&self, row: i32, col: i32) -> bool {
        self.is_valid(row, col) && !self.cells[(row * self.cols + col) as usize]
    }

    /// Convert world coordinates to the containing cell (floor division)
    pub fn world_to_grid(&self, x: f64, y: f64) -> Cell {
        let col = (x / self.resolution).floor() as i32;
        let row = (y / self.resolution).floor() as i32;
        (row, col)
    }

    /// Convert a cell to world coordinates of its center
    pub fn grid_to_world(&self, row: i32, col: i32) -> (f64, f64) {
        let x = (col as f64 + 0.5) * self.resolution;
        let y = (row as f64 + 0.5) * self.resolution;
        (x, y)
    }

    /// Valid, free neighbors of a cell in fixed order: N, S, W, E, then
    /// NW, NE, SW, SE when `diagonal` is set
    ///
    /// Diagonal steps are returned even when both adjacent orthogonal
    /// cells are occupied; see [`neighbors_strict`](Self::neighbors_strict)
    /// for the corner-cut-free variant.
    pub fn neighbors(&self, row: i32, col: i32, diagonal: bool) -> Vec<Cell> {
        const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

        let mut neighbors = Vec::with_capacity(if diagonal { 8 } else { 4 });

        for (dr, dc) in ORTHOGONAL {
            if self.is_free(row + dr, col + dc) {
                neighbors.push((row + dr, col + dc));
            }
        }
        if diagonal {
            for (dr, dc) in DIAGONAL {
                if self.is_free(row + dr, col + dc) {
                    neighbors.push((row + dr, col + dc));
                }
            }
        }

        neighbors
    }

    /// Like [`neighbors`](Self::neighbors) with diagonals, but a diagonal
    /// step is only returned when at least one of the two cells it passes
    /// between is free
    pub fn neighbors_strict(&self, row: i32, col: i32) -> Vec<Cell> {
        const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

        let mut neighbors = Vec::with_capacity(8);

        for (dr, dc) in ORTHOGONAL {
            if self.is_free(row + dr, col + dc) {
                neighbors.push((row + dr, col + dc));
            }
        }
        for (dr, dc) in DIAGONAL {
            if self.is_free(row + dr, col + dc)
                && (self.is_free(row + dr, col) || self.is_free(row, col + dc))
            {
                neighbors.push((row + dr, col + dc));
            }
        }

        neighbors
    }

    /// All free cells in row-major order
    pub fn free_cells(&self) -> Vec<Cell> {
        let mut free = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if !self.cells[(row * self.cols + col) as usize] {
                    free.push((row, col));
                }
            }
        }
        free
    }

    /// Number of free cells
    pub fn free_cell_count(&self) -> usize {
        self.cells.iter().filter(|occupied| !**occupied).count()
    }

    /// Fraction of free cells covered by the visited set, in [0, 1]
    ///
    /// Visited entries that are not free cells do not count. A grid with
    /// no free cells is fully covered by definition.
    pub fn coverage_fraction(&self, visited: &HashSet<Cell>) -> f64 {
        let total_free = self.free_cell_count();
        if total_free == 0 {
            return 1.0;
        }
        let covered = visited
            .iter()
            .filter(|(row, col)| self.is_free(*row, *col))
            .count();
        covered as f64 / total_free as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn empty_grid(width: f64, height: f64, resolution: f64) -> OccupancyGrid {
        GridBuilder::new(width, height, resolution).unwrap().build()
    }

    #[test]
    fn test_dimensions_round_up() {
        let grid = empty_grid(0.3, 0.2, 0.1);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.rows(), 2);

        let grid = empty_grid(0.35, 0.21, 0.1);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.rows(), 3);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(GridBuilder::new(0.0, 1.0, 0.1).is_err());
        assert!(GridBuilder::new(1.0, -1.0, 0.1).is_err());
        assert!(GridBuilder::new(1.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_world_grid_round_trip() {
        let grid = empty_grid(1.0, 1.0, 0.1);

        assert_eq!(grid.world_to_grid(0.05, 0.05), (0, 0));
        assert_eq!(grid.world_to_grid(0.95, 0.15), (1, 9));

        let (x, y) = grid.grid_to_world(1, 9);
        assert_relative_eq!(x, 0.95);
        assert_relative_eq!(y, 0.15);

        // Cell centers map back to their cell
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let (x, y) = grid.grid_to_world(row, col);
                assert_eq!(grid.world_to_grid(x, y), (row, col));
            }
        }
    }

    #[test]
    fn test_world_to_grid_floors_negative() {
        let grid = empty_grid(1.0, 1.0, 0.1);
        assert_eq!(grid.world_to_grid(-0.05, -0.25), (-3, -1));
        assert!(!grid.is_valid(-3, -1));
        assert!(!grid.is_free(-3, -1));
    }

    #[test]
    fn test_rectangle_rasterization() {
        let mut builder = GridBuilder::new(0.5, 0.3, 0.1).unwrap();
        builder
            .add_obstacles(&[Obstacle::Rectangle {
                x: 0.25,
                y: 0.15,
                width: 0.1,
                height: 0.1,
            }])
            .unwrap();
        let grid = builder.build();

        // Only the cell whose center is (0.25, 0.15) is covered
        for row in 0..3 {
            for col in 0..5 {
                assert_eq!(grid.is_free(row, col), !(row == 1 && col == 2));
            }
        }
    }

    #[test]
    fn test_circle_rasterization() {
        let mut builder = GridBuilder::new(1.0, 1.0, 0.1).unwrap();
        builder
            .add_obstacles(&[Obstacle::Circle {
                x: 0.5,
                y: 0.5,
                radius: 0.1,
            }])
            .unwrap();
        let grid = builder.build();

        // Exactly the cells whose centers lie within the radius
        for row in 0..10 {
            for col in 0..10 {
                let (x, y) = grid.grid_to_world(row, col);
                let inside = (x - 0.5_f64).powi(2) + (y - 0.5_f64).powi(2) < 0.1_f64.powi(2);
                assert_eq!(grid.is_free(row, col), !inside, "cell ({}, {})", row, col);
            }
        }
        assert_eq!(grid.free_cell_count(), 96);
    }

    #[test]
    fn test_out_of_bounds_obstacle_is_clipped() {
        let mut builder = GridBuilder::new(0.5, 0.5, 0.1).unwrap();
        builder
            .add_obstacles(&[Obstacle::Rectangle {
                x: 0.5,
                y: -0.1,
                width: 1.0,
                height: 0.4,
            }])
            .unwrap();
        let grid = builder.build();

        // Bottom row centers (y = 0.05) are inside; everything above is not
        for col in 0..5 {
            assert!(!grid.is_free(0, col));
            assert!(grid.is_free(1, col));
        }
    }

    #[test]
    fn test_invalid_obstacle_propagates() {
        let mut builder = GridBuilder::new(1.0, 1.0, 0.1).unwrap();
        let result = builder.add_obstacles(&[Obstacle::Polygon {
            vertices: vec![[0.0, 0.0], [1.0, 1.0]],
        }]);
        assert!(matches!(result, Err(PlasterError::InvalidObstacle(_))));
    }

    #[test]
    fn test_neighbor_order() {
        let grid = empty_grid(0.5, 0.5, 0.1);

        assert_eq!(
            grid.neighbors(2, 2, true),
            vec![
                (1, 2),
                (3, 2),
                (2, 1),
                (2, 3),
                (1, 1),
                (1, 3),
                (3, 1),
                (3, 3),
            ]
        );
        assert_eq!(grid.neighbors(2, 2, false), vec![(1, 2), (3, 2), (2, 1), (2, 3)]);
        // Corner cell only keeps the in-bounds neighbors
        assert_eq!(grid.neighbors(0, 0, true), vec![(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_neighbors_skip_occupied() {
        let mut builder = GridBuilder::new(0.5, 0.5, 0.1).unwrap();
        builder
            .add_obstacles(&[Obstacle::Rectangle {
                x: 0.25,
                y: 0.35,
                width: 0.1,
                height: 0.1,
            }])
            .unwrap();
        let grid = builder.build();

        assert!(!grid.is_free(3, 2));
        let neighbors = grid.neighbors(2, 2, true);
        assert!(!neighbors.contains(&(3, 2)));
        assert!(neighbors.contains(&(3, 1)));
    }

    #[test]
    fn test_strict_neighbors_forbid_corner_cut() {
        // Occupy (0, 1) and (1, 0): the diagonal (1, 1) squeezes between them
        let mut builder = GridBuilder::new(0.3, 0.3, 0.1).unwrap();
        builder
            .add_obstacles(&[
                Obstacle::Rectangle {
                    x: 0.15,
                    y: 0.05,
                    width: 0.08,
                    height: 0.08,
                },
                Obstacle::Rectangle {
                    x: 0.05,
                    y: 0.15,
                    width: 0.08,
                    height: 0.08,
                },
            ])
            .unwrap();
        let grid = builder.build();

        assert!(grid.neighbors(0, 0, true).contains(&(1, 1)));
        assert!(!grid.neighbors_strict(0, 0).contains(&(1, 1)));
    }

    #[test]
    fn test_coverage_fraction() {
        let grid = empty_grid(0.2, 0.2, 0.1);

        let mut visited = HashSet::new();
        assert_eq!(grid.coverage_fraction(&visited), 0.0);

        visited.insert((0, 0));
        visited.insert((0, 1));
        assert_eq!(grid.coverage_fraction(&visited), 0.5);

        visited.insert((1, 0));
        visited.insert((1, 1));
        assert_eq!(grid.coverage_fraction(&visited), 1.0);

        // Out-of-grid entries do not count
        visited.insert((5, 5));
        assert_eq!(grid.coverage_fraction(&visited), 1.0);
    }

    #[test]
    fn test_coverage_fraction_no_free_cells() {
        let mut builder = GridBuilder::new(0.1, 0.1, 0.1).unwrap();
        builder
            .add_obstacles(&[Obstacle::Rectangle {
                x: 0.05,
                y: 0.05,
                width: 0.2,
                height: 0.2,
            }])
            .unwrap();
        let grid = builder.build();

        assert_eq!(grid.free_cell_count(), 0);
        assert_eq!(grid.coverage_fraction(&HashSet::new()), 1.0);
    }

    #[test]
    fn test_free_cells_row_major() {
        let mut builder = GridBuilder::new(0.2, 0.2, 0.1).unwrap();
        builder
            .add_obstacles(&[Obstacle::Rectangle {
                x: 0.05,
                y: 0.05,
                width: 0.08,
                height: 0.08,
            }])
            .unwrap();
        let grid = builder.build();

        assert_eq!(grid.free_cells(), vec![(0, 1), (1, 0), (1, 1)]);
    }
}
