//! Boustrophedon Coverage Planning
//!
//! Lawn-mower sweep over the free cells of an occupancy grid.
//!
//! # Features
//!
//! - Alternating row direction (left-to-right on even rows)
//! - Rows split into obstacle-free segments
//! - A* detours between segments when the direct hop crosses an obstacle
//! - Visited-cell set so no cell is emitted twice by the sweep
//!
//! # Example
//!
//! ```rust
//! use plaster_planner::algorithms::coverage::CoveragePlanner;
//! use plaster_planner::algorithms::occupancy_grid::GridBuilder;
//!
//! let grid = GridBuilder::new(0.3, 0.2, 0.1).unwrap().build();
//! let path = CoveragePlanner::new(&grid).plan_with_obstacles();
//! assert_eq!(path.len(), 6);  // every cell of the 2x3 grid
//! ```

use crate::algorithms::astar::AStarPlanner;
use crate::algorithms::occupancy_grid::{Cell, OccupancyGrid};
use plaster_core::surface::Waypoint;
use std::collections::HashSet;

/// Boustrophedon coverage planner over a borrowed grid
pub struct CoveragePlanner<'a> {
    grid: &'a OccupancyGrid,
}

impl<'a> CoveragePlanner<'a> {
    /// Create a planner for the given grid
    pub fn new(grid: &'a OccupancyGrid) -> Self {
        Self { grid }
    }

    /// Coverage sweep that splits rows around obstacles
    ///
    /// Rows are walked bottom to top. Even rows emit their free segments
    /// left to right, odd rows right to left. When the hop from the last
    /// emitted waypoint to the next segment crosses an occupied cell, the
    /// interior of an A* path is inserted in between; if A* finds no
    /// route the hop stays direct.
    pub fn plan_with_obstacles(&self) -> Vec<Waypoint> {
        let mut waypoints: Vec<Waypoint> = Vec::new();
        let mut visited: HashSet<Cell> = HashSet::new();
        let astar = AStarPlanner::new(self.grid);

        for row in 0..self.grid.rows() {
            let mut segments = self.find_free_segments(row);
            if row % 2 == 1 {
                segments.reverse();
            }

            for (segment_start, segment_end) in segments {
                let mut segment_waypoints = Vec::new();

                if row % 2 == 0 {
                    for col in segment_start..=segment_end {
                        self.emit_cell(row, col, &mut segment_waypoints, &mut visited);
                    }
                } else {
                    for col in (segment_start..=segment_end).rev() {
                        self.emit_cell(row, col, &mut segment_waypoints, &mut visited);
                    }
                }

                // Bridge from the previous segment when an obstacle blocks
                // the direct hop
                if !waypoints.is_empty() && !segment_waypoints.is_empty() {
                    let last = waypoints[waypoints.len() - 1];
                    let next = segment_waypoints[0];

                    if self.needs_navigation(last, next) {
                        let start_cell = self.grid.world_to_grid(last.x, last.y);
                        let end_cell = self.grid.world_to_grid(next.x, next.y);

                        let connecting = astar.plan(start_cell, end_cell);
                        if connecting.len() > 2 {
                            waypoints.extend_from_slice(&connecting[1..connecting.len() - 1]);
                        }
                    }
                }

                waypoints.extend_from_slice(&segment_waypoints);
            }
        }

        waypoints
    }

    /// Plain sweep that ignores obstacles inside rows
    ///
    /// Kept for debugging; the hybrid pipeline uses
    /// [`plan_with_obstacles`](Self::plan_with_obstacles). The starting
    /// column only labels the sweep origin and does not change the order.
    pub fn plan(&self, start_row: i32, _start_col: i32) -> Vec<Waypoint> {
        let mut waypoints = Vec::new();
        let mut visited: HashSet<Cell> = HashSet::new();

        let mut current_row = start_row;
        let mut left_to_right = true;

        while current_row < self.grid.rows() {
            let mut row_has_free = false;

            let columns: Vec<i32> = if left_to_right {
                (0..self.grid.cols()).collect()
            } else {
                (0..self.grid.cols()).rev().collect()
            };

            for col in columns {
                if self.grid.is_free(current_row, col) {
                    row_has_free = true;
                    self.emit_cell(current_row, col, &mut waypoints, &mut visited);
                }
            }

            current_row += 1;
            left_to_right = !left_to_right;

            // Skip fully occupied rows without turning around
            if !row_has_free {
                while current_row < self.grid.rows()
                    && !(0..self.grid.cols()).any(|col| self.grid.is_free(current_row, col))
                {
                    current_row += 1;
                }
            }
        }

        waypoints
    }

    /// Maximal runs of consecutive free columns in a row
    fn find_free_segments(&self, row: i32) -> Vec<(i32, i32)> {
        let mut segments = Vec::new();
        let mut start: Option<i32> = None;

        for col in 0..self.grid.cols() {
            if self.grid.is_free(row, col) {
                if start.is_none() {
                    start = Some(col);
                }
            } else if let Some(segment_start) = start.take() {
                segments.push((segment_start, col - 1));
            }
        }

        if let Some(segment_start) = start {
            segments.push((segment_start, self.grid.cols() - 1));
        }

        segments
    }

    /// Line-of-sight check: does the straight hop cross an occupied cell?
    ///
    /// The segment is sampled at a step no larger than the grid
    /// resolution.
    fn needs_navigation(&self, from: Waypoint, to: Waypoint) -> bool {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let distance = (dx * dx + dy * dy).sqrt();

        let samples = (((distance / self.grid.resolution()).ceil() as usize) + 1).max(2);

        for i in 0..samples {
            let t = i as f64 / (samples - 1) as f64;
            let x = from.x + t * dx;
            let y = from.y + t * dy;

            let (row, col) = self.grid.world_to_grid(x, y);
            if self.grid.is_valid(row, col) && !self.grid.is_free(row, col) {
                return true;
            }
        }

        false
    }

    fn emit_cell(
        &self,
        row: i32,
        col: i32,
        waypoints: &mut Vec<Waypoint>,
        visited: &mut HashSet<Cell>,
    ) {
        if self.grid.is_free(row, col) && visited.insert((row, col)) {
            let (x, y) = self.grid.grid_to_world(row, col);
            waypoints.push(Waypoint::new(x, y));
        }
    }
}
