//! # PLASTER Core
//!
//! Core types for the PLASTER wall-finishing robot planning stack.
//!
//! This crate holds everything the planning algorithms and their callers
//! share: the data model (work surfaces, obstacles, waypoints, plans), the
//! error type, and the untyped request parameter store. It performs no
//! planning itself and has no I/O; every operation takes its inputs
//! explicitly.

pub mod error;
pub mod params;
pub mod plan;
pub mod surface;

// Re-export commonly used types for easy access
pub use error::{PlasterError, PlasterResult};
pub use params::PlanParams;
pub use plan::{AlgorithmKind, Plan, PlanRequest};
pub use surface::{Obstacle, Waypoint, WorkSurface};
