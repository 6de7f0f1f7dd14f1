//! Pure planning algorithms for the PLASTER robot
//!
//! This module contains pure algorithmic implementations with no I/O
//! dependencies. Every planner takes its inputs explicitly and can be
//! reused outside the request driver.
//!
//! # Available Algorithms
//!
//! ## Environment
//! - **geometry**: 2D shape primitives with containment and distance queries
//! - **occupancy_grid**: free/occupied bitmap built from surface obstacles
//!
//! ## Motion Planning
//! - **astar**: 8-connected grid shortest path with nearest-free fallback
//! - **coverage**: boustrophedon sweep that splits rows around obstacles
//!
//! ## Optimization
//! - **genetic**: permutation GA trading path length against smoothness
//! - **hybrid**: coverage + A* gap stitching + genetic reordering

pub mod astar;
pub mod coverage;
pub mod genetic;
pub mod geometry;
pub mod hybrid;
pub mod occupancy_grid;
