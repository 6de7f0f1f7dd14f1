//! Plan request driver
//!
//! The single entry point the enclosing service calls: build the occupancy
//! grid for a work surface, dispatch the requested algorithm, and wrap the
//! resulting waypoints with distance, coverage, and timing metrics.
//!
//! The driver is a thin orchestrator over the pure algorithms; it holds no
//! state between calls, and concurrent requests each build their own grid.

use crate::algorithms::astar::AStarPlanner;
use crate::algorithms::coverage::CoveragePlanner;
use crate::algorithms::genetic::{GeneticConfig, GeneticOptimizer};
use crate::algorithms::geometry;
use crate::algorithms::hybrid::HybridPlanner;
use crate::algorithms::occupancy_grid::{Cell, GridBuilder, OccupancyGrid};
use plaster_core::error::{PlasterError, PlasterResult};
use plaster_core::params::PlanParams;
use plaster_core::plan::{AlgorithmKind, Plan, PlanRequest};
use plaster_core::surface::{Waypoint, WorkSurface};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info};

/// Assumed end-effector speed for time estimates, in m/s
const DEFAULT_ROBOT_SPEED: f64 = 0.5;

/// Plan a path over a work surface
///
/// Builds the occupancy grid once, runs the algorithm selected by the
/// request, and returns the waypoints with their metrics. Recognized
/// parameters:
///
/// | Key | Applies to | Default |
/// |-----|-----------|---------|
/// | `grid_resolution` | any | surface resolution |
/// | `robot_speed` | any | 0.5 m/s |
/// | `start`, `goal` | astar | (0, 0) and (rows-1, cols-1) |
/// | `population_size`, `generations`, `mutation_rate`, `crossover_rate`, `tournament_size`, `seed` | genetic, hybrid | see [`GeneticConfig`] |
///
/// Unknown keys are ignored.
pub fn plan(surface: &WorkSurface, request: &PlanRequest) -> PlasterResult<Plan> {
    if surface.width <= 0.0 || surface.height <= 0.0 || surface.resolution <= 0.0 {
        return Err(PlasterError::InvalidRequest(format!(
            "surface dimensions must be positive, got {}x{} at resolution {}",
            surface.width, surface.height, surface.resolution
        )));
    }

    let params = &request.parameters;
    let resolution = params.get_f64("grid_resolution", surface.resolution);

    let started = Instant::now();

    let mut builder = GridBuilder::new(surface.width, surface.height, resolution)?;
    builder.add_obstacles(&surface.obstacles)?;
    let grid = builder.build();
    debug!(
        rows = grid.rows(),
        cols = grid.cols(),
        resolution,
        obstacles = surface.obstacles.len(),
        "occupancy grid built"
    );

    let waypoints = execute_algorithm(&grid, request)?;
    verify_on_free_cells(&grid, &waypoints)?;

    let planning_time = started.elapsed().as_secs_f64();
    let total_distance = geometry::path_length(&waypoints);
    let visited: HashSet<Cell> = waypoints
        .iter()
        .map(|waypoint| grid.world_to_grid(waypoint.x, waypoint.y))
        .collect();
    let coverage_fraction = grid.coverage_fraction(&visited);
    let robot_speed = params.get_f64("robot_speed", DEFAULT_ROBOT_SPEED);
    let estimated_time = total_distance / robot_speed;

    info!(
        algorithm = %request.algorithm,
        waypoints = waypoints.len(),
        total_distance,
        coverage_fraction,
        planning_time,
        "plan complete"
    );

    Ok(Plan {
        waypoints,
        total_distance,
        estimated_time,
        coverage_fraction,
        planning_time,
        algorithm: request.algorithm,
        parameters: request.parameters.clone(),
    })
}

fn execute_algorithm(grid: &OccupancyGrid, request: &PlanRequest) -> PlasterResult<Vec<Waypoint>> {
    let params = &request.parameters;

    match request.algorithm {
        AlgorithmKind::Coverage => Ok(CoveragePlanner::new(grid).plan_with_obstacles()),

        AlgorithmKind::AStar => {
            let start: Cell = params.get("start").unwrap_or((0, 0));
            let goal: Cell = params
                .get("goal")
                .unwrap_or((grid.rows() - 1, grid.cols() - 1));
            validate_endpoint(grid, start, "start")?;
            validate_endpoint(grid, goal, "goal")?;

            let path = AStarPlanner::new(grid).plan(start, goal);
            if path.is_empty() {
                return Err(PlasterError::PlanningFailed(format!(
                    "no path from {:?} to {:?}",
                    start, goal
                )));
            }
            Ok(path)
        }

        AlgorithmKind::Genetic => {
            let initial = CoveragePlanner::new(grid).plan_with_obstacles();
            Ok(GeneticOptimizer::new(genetic_config(params)).optimize(&initial))
        }

        AlgorithmKind::Hybrid => Ok(HybridPlanner::new(grid, genetic_config(params)).plan()),
    }
}

fn genetic_config(params: &PlanParams) -> GeneticConfig {
    let defaults = GeneticConfig::default();
    GeneticConfig {
        population_size: params.get_usize("population_size", defaults.population_size),
        generations: params.get_usize("generations", defaults.generations),
        mutation_rate: params.get_f64("mutation_rate", defaults.mutation_rate),
        crossover_rate: params.get_f64("crossover_rate", defaults.crossover_rate),
        tournament_size: params.get_usize("tournament_size", defaults.tournament_size),
        seed: params.get("seed"),
    }
}

fn validate_endpoint(grid: &OccupancyGrid, cell: Cell, label: &str) -> PlasterResult<()> {
    if !grid.is_valid(cell.0, cell.1) {
        return Err(PlasterError::InvalidRequest(format!(
            "{} cell {:?} is outside the {}x{} grid",
            label,
            cell,
            grid.rows(),
            grid.cols()
        )));
    }
    if !grid.is_free(cell.0, cell.1) {
        return Err(PlasterError::InvalidRequest(format!(
            "{} cell {:?} is occupied",
            label, cell
        )));
    }
    Ok(())
}

/// Every emitted waypoint must sit on a free grid cell; a breach means a
/// planner invariant is broken
fn verify_on_free_cells(grid: &OccupancyGrid, waypoints: &[Waypoint]) -> PlasterResult<()> {
    for waypoint in waypoints {
        let (row, col) = grid.world_to_grid(waypoint.x, waypoint.y);
        if !grid.is_free(row, col) {
            return Err(PlasterError::Internal(format!(
                "waypoint ({}, {}) does not sit on a free cell",
                waypoint.x, waypoint.y
            )));
        }
    }
    Ok(())
}
