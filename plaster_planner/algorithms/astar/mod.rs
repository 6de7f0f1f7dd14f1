//! A* Grid Pathfinding
//!
//! 8-connected shortest-path search over an occupancy grid.
//!
//! # Features
//!
//! - Unit cost for axis steps, sqrt(2) for diagonal steps
//! - Euclidean heuristic (admissible on this cost model)
//! - Deterministic tie-breaking: FIFO among equal-f nodes
//! - Nearest-free-cell fallback for occupied targets
//!
//! # Example
//!
//! ```rust
//! use plaster_planner::algorithms::astar::AStarPlanner;
//! use plaster_planner::algorithms::occupancy_grid::GridBuilder;
//!
//! let grid = GridBuilder::new(1.0, 1.0, 0.1).unwrap().build();
//! let planner = AStarPlanner::new(&grid);
//!
//! let path = planner.plan((0, 0), (9, 9));
//! assert_eq!(path.len(), 10);  // pure diagonal on an empty grid
//! ```

use crate::algorithms::occupancy_grid::{Cell, OccupancyGrid};
use plaster_core::surface::Waypoint;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Heap entry ordered by (f, insertion counter)
///
/// `BinaryHeap` is a max-heap, so comparisons are reversed: the entry with
/// the lowest f pops first, and the counter makes equal-f pops FIFO.
#[derive(Debug)]
struct OpenNode {
    f: f64,
    counter: u64,
    cell: Cell,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.counter == other.counter
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.counter.cmp(&self.counter))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* path planner over a borrowed occupancy grid
pub struct AStarPlanner<'a> {
    grid: &'a OccupancyGrid,
}

impl<'a> AStarPlanner<'a> {
    /// Create a planner for the given grid
    pub fn new(grid: &'a OccupancyGrid) -> Self {
        Self { grid }
    }

    /// Find the shortest path between two grid cells
    ///
    /// Returns waypoints at the world centers of the visited cells, or an
    /// empty sequence when start or goal is occupied, out of bounds, or
    /// unreachable.
    pub fn plan(&self, start: Cell, goal: Cell) -> Vec<Waypoint> {
        if !self.grid.is_free(start.0, start.1) || !self.grid.is_free(goal.0, goal.1) {
            return Vec::new();
        }

        let mut open_set = BinaryHeap::new();
        let mut counter: u64 = 0;
        open_set.push(OpenNode {
            f: 0.0,
            counter,
            cell: start,
        });

        let mut came_from: HashMap<Cell, Cell> = HashMap::new();
        let mut g_score: HashMap<Cell, f64> = HashMap::new();
        g_score.insert(start, 0.0);

        while let Some(OpenNode { cell: current, .. }) = open_set.pop() {
            if current == goal {
                return self.reconstruct_path(&came_from, current);
            }

            let current_g = g_score[&current];
            for neighbor in self.grid.neighbors(current.0, current.1, true) {
                let tentative_g = current_g + step_cost(current, neighbor);

                // Strict improvement: stale heap entries are left behind and
                // simply re-expanded with a worse g when popped
                if g_score
                    .get(&neighbor)
                    .map_or(true, |&g| tentative_g < g)
                {
                    came_from.insert(neighbor, current);
                    g_score.insert(neighbor, tentative_g);
                    counter += 1;
                    open_set.push(OpenNode {
                        f: tentative_g + heuristic(neighbor, goal),
                        counter,
                        cell: neighbor,
                    });
                }
            }
        }

        Vec::new()
    }

    /// Find the free cell nearest to `target` in expanding Chebyshev
    /// squares
    ///
    /// Each square of radius 1..=`max_radius` is scanned in row-major
    /// order and the first valid free cell wins, so the result is
    /// deterministic but not necessarily closest by Euclidean distance.
    pub fn find_nearest_free_cell(&self, target: Cell, max_radius: i32) -> Option<Cell> {
        if self.grid.is_free(target.0, target.1) {
            return Some(target);
        }

        for radius in 1..=max_radius {
            for dr in -radius..=radius {
                for dc in -radius..=radius {
                    let cell = (target.0 + dr, target.1 + dc);
                    if self.grid.is_free(cell.0, cell.1) {
                        return Some(cell);
                    }
                }
            }
        }

        None
    }

    fn reconstruct_path(&self, came_from: &HashMap<Cell, Cell>, goal: Cell) -> Vec<Waypoint> {
        let mut cells = vec![goal];
        let mut current = goal;
        while let Some(&previous) = came_from.get(&current) {
            current = previous;
            cells.push(current);
        }
        cells.reverse();

        cells
            .into_iter()
            .map(|(row, col)| {
                let (x, y) = self.grid.grid_to_world(row, col);
                Waypoint::new(x, y)
            })
            .collect()
    }
}

/// Cost of one step between 8-neighbors
fn step_cost(from: Cell, to: Cell) -> f64 {
    let dr = (from.0 - to.0).abs();
    let dc = (from.1 - to.1).abs();
    if dr + dc == 2 {
        std::f64::consts::SQRT_2
    } else {
        1.0
    }
}

/// Euclidean distance in cell units
fn heuristic(node: Cell, goal: Cell) -> f64 {
    let dr = (node.0 - goal.0) as f64;
    let dc = (node.1 - goal.1) as f64;
    (dr * dr + dc * dc).sqrt()
}

#[cfg(test)]
mod tests;
