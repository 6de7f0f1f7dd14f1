//! Hybrid Coverage Planning
//!
//! Composes the other planners: a boustrophedon coverage sweep, A* gap
//! stitching for jumps the sweep left behind, and genetic reordering for
//! long paths.
//!
//! # Example
//!
//! ```rust
//! use plaster_planner::algorithms::genetic::GeneticConfig;
//! use plaster_planner::algorithms::hybrid::HybridPlanner;
//! use plaster_planner::algorithms::occupancy_grid::GridBuilder;
//!
//! let grid = GridBuilder::new(0.3, 0.2, 0.1).unwrap().build();
//! let planner = HybridPlanner::new(&grid, GeneticConfig::default());
//!
//! let path = planner.plan();
//! assert_eq!(path.len(), 6);
//! ```

use crate::algorithms::astar::AStarPlanner;
use crate::algorithms::coverage::CoveragePlanner;
use crate::algorithms::genetic::{GeneticConfig, GeneticOptimizer};
use crate::algorithms::occupancy_grid::OccupancyGrid;
use plaster_core::surface::Waypoint;

/// Gaps longer than this many grid resolutions are stitched with A*
const GAP_THRESHOLD_CELLS: f64 = 3.0;

/// Paths at or below this length skip genetic reordering
const GA_MIN_WAYPOINTS: usize = 10;

/// Hybrid planner over a borrowed grid
pub struct HybridPlanner<'a> {
    grid: &'a OccupancyGrid,
    genetic: GeneticOptimizer,
}

impl<'a> HybridPlanner<'a> {
    /// Create a planner with the given GA configuration
    pub fn new(grid: &'a OccupancyGrid, config: GeneticConfig) -> Self {
        Self {
            grid,
            genetic: GeneticOptimizer::new(config),
        }
    }

    /// Coverage sweep, gap stitching, then genetic reordering for paths
    /// longer than ten waypoints
    pub fn plan(&self) -> Vec<Waypoint> {
        let coverage = CoveragePlanner::new(self.grid).plan_with_obstacles();
        if coverage.is_empty() {
            return coverage;
        }

        let connected = self.connect_gaps(&coverage);

        if connected.len() > GA_MIN_WAYPOINTS {
            self.genetic.optimize(&connected)
        } else {
            connected
        }
    }

    /// Coverage sweep and gap stitching without genetic reordering
    ///
    /// Faster, at the cost of keeping the raw sweep order.
    pub fn plan_simple(&self) -> Vec<Waypoint> {
        let coverage = CoveragePlanner::new(self.grid).plan_with_obstacles();
        if coverage.is_empty() {
            return coverage;
        }

        self.connect_gaps(&coverage)
    }

    /// Replace long jumps with A* paths between the jump endpoints
    ///
    /// The A* result re-includes the jump target, so the original target
    /// waypoint is dropped; failed searches keep the direct jump.
    fn connect_gaps(&self, waypoints: &[Waypoint]) -> Vec<Waypoint> {
        if waypoints.len() <= 1 {
            return waypoints.to_vec();
        }

        let astar = AStarPlanner::new(self.grid);
        let threshold = self.grid.resolution() * GAP_THRESHOLD_CELLS;

        let mut connected = vec![waypoints[0]];

        for pair in waypoints.windows(2) {
            let previous = pair[0];
            let current = pair[1];

            let dx = current.x - previous.x;
            let dy = current.y - previous.y;
            let distance = (dx * dx + dy * dy).sqrt();

            if distance > threshold {
                let previous_cell = self.grid.world_to_grid(previous.x, previous.y);
                let current_cell = self.grid.world_to_grid(current.x, current.y);

                let stitched = astar.plan(previous_cell, current_cell);
                if !stitched.is_empty() {
                    connected.extend_from_slice(&stitched[1..]);
                } else {
                    connected.push(current);
                }
            } else {
                connected.push(current);
            }
        }

        connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::occupancy_grid::GridBuilder;
    use approx::assert_relative_eq;
    use plaster_core::surface::Obstacle;

    fn config(seed: u64) -> GeneticConfig {
        GeneticConfig {
            population_size: 20,
            generations: 5,
            seed: Some(seed),
            ..GeneticConfig::default()
        }
    }

    #[test]
    fn test_gap_stitching_inserts_astar_cells() {
        // A 0.5m jump on a 0.1m grid exceeds the 0.3m threshold and is
        // replaced by the straight A* row path
        let grid = GridBuilder::new(1.0, 1.0, 0.1).unwrap().build();
        let planner = HybridPlanner::new(&grid, config(1));

        let jump = vec![Waypoint::new(0.05, 0.05), Waypoint::new(0.55, 0.05)];
        let connected = planner.connect_gaps(&jump);

        assert_eq!(connected.len(), 6);
        for (index, waypoint) in connected.iter().enumerate() {
            assert_relative_eq!(waypoint.x, 0.05 + 0.1 * index as f64);
            assert_relative_eq!(waypoint.y, 0.05);
        }
    }

    #[test]
    fn test_short_hops_left_alone() {
        let grid = GridBuilder::new(1.0, 1.0, 0.1).unwrap().build();
        let planner = HybridPlanner::new(&grid, config(1));

        let hops = vec![
            Waypoint::new(0.05, 0.05),
            Waypoint::new(0.25, 0.05),
            Waypoint::new(0.25, 0.25),
        ];
        assert_eq!(planner.connect_gaps(&hops), hops);
    }

    #[test]
    fn test_unreachable_gap_keeps_direct_jump() {
        // A wall across the whole surface separates the jump endpoints
        let mut builder = GridBuilder::new(0.5, 0.5, 0.1).unwrap();
        builder
            .add_obstacles(&[Obstacle::Rectangle {
                x: 0.25,
                y: 0.25,
                width: 0.6,
                height: 0.1,
            }])
            .unwrap();
        let grid = builder.build();
        let planner = HybridPlanner::new(&grid, config(1));

        let jump = vec![Waypoint::new(0.05, 0.05), Waypoint::new(0.05, 0.45)];
        assert_eq!(planner.connect_gaps(&jump), jump);
    }

    #[test]
    fn test_short_plans_skip_genetic_reordering() {
        // 6 waypoints is under the GA gate, so plan == plan_simple
        let grid = GridBuilder::new(0.3, 0.2, 0.1).unwrap().build();
        let planner = HybridPlanner::new(&grid, config(1));

        let plan = planner.plan();
        assert_eq!(plan.len(), 6);
        assert_eq!(plan, planner.plan_simple());
    }

    #[test]
    fn test_long_plans_keep_anchors_and_grid_snap() {
        let mut builder = GridBuilder::new(0.6, 0.4, 0.1).unwrap();
        builder
            .add_obstacles(&[Obstacle::Rectangle {
                x: 0.3,
                y: 0.2,
                width: 0.15,
                height: 0.15,
            }])
            .unwrap();
        let grid = builder.build();
        let planner = HybridPlanner::new(&grid, config(7));

        let simple = planner.plan_simple();
        assert!(simple.len() > 10);

        let plan = planner.plan();
        assert_eq!(plan[0], simple[0]);
        assert_eq!(plan.last(), simple.last());

        for waypoint in &plan {
            let (row, col) = grid.world_to_grid(waypoint.x, waypoint.y);
            assert!(grid.is_free(row, col));
            let (x, y) = grid.grid_to_world(row, col);
            assert_eq!((waypoint.x, waypoint.y), (x, y));
        }
    }

    #[test]
    fn test_empty_grid_plans_empty() {
        let mut builder = GridBuilder::new(0.2, 0.2, 0.1).unwrap();
        builder
            .add_obstacles(&[Obstacle::Rectangle {
                x: 0.1,
                y: 0.1,
                width: 0.5,
                height: 0.5,
            }])
            .unwrap();
        let grid = builder.build();
        let planner = HybridPlanner::new(&grid, config(1));

        assert!(planner.plan().is_empty());
        assert!(planner.plan_simple().is_empty());
    }
}
