//! Error types for PLASTER planning operations

use thiserror::Error;

/// Planning errors
///
/// Input errors (`InvalidObstacle`, `InvalidRequest`) are raised before any
/// planning work starts. `PlanningFailed` is reserved for the A* algorithm
/// mode where no route exists. `Internal` signals a broken planner
/// invariant and must never surface in normal operation.
#[derive(Debug, Error)]
pub enum PlasterError {
    #[error("Invalid obstacle: {0}")]
    InvalidObstacle(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Planning failed: {0}")]
    PlanningFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for PLASTER operations
pub type PlasterResult<T> = Result<T, PlasterError>;
