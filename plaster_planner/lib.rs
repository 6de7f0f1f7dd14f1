//! # PLASTER Planner
//!
//! Path-planning library for the PLASTER wall-finishing robot.
//!
//! Given a rectangular work surface and a set of 2D obstacles, the planners
//! in this crate produce an ordered waypoint sequence that covers the free
//! area while avoiding obstacles, together with distance and coverage
//! metrics.
//!
//! ## Structure
//!
//! ```text
//! plaster_planner/
//! ── algorithms/     # Pure planning algorithms (no I/O)
//! ── planner/        # Driver: request dispatch and metrics
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use plaster_planner::{plan, AlgorithmKind, PlanRequest, WorkSurface};
//!
//! let surface = WorkSurface::new(2.0, 1.5, 0.1);
//! let request = PlanRequest::new(AlgorithmKind::Coverage);
//!
//! let plan = plan(&surface, &request).unwrap();
//! assert!(plan.coverage_fraction > 0.99);
//! ```

pub mod algorithms;
pub mod planner;

// Re-export the entry point at the crate root for convenience
pub use planner::plan;

// Re-export core types so callers need a single dependency
pub use plaster_core::{
    AlgorithmKind, Obstacle, Plan, PlanParams, PlanRequest, PlasterError, PlasterResult, Waypoint,
    WorkSurface,
};
