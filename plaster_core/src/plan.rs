//! Plan requests and results

use crate::params::PlanParams;
use crate::surface::Waypoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Planning algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    /// Boustrophedon coverage sweep with obstacle splitting
    Coverage,
    /// 8-connected A* between two grid cells
    #[serde(rename = "astar")]
    AStar,
    /// Coverage sweep followed by genetic reordering
    Genetic,
    /// Coverage + A* gap stitching + genetic reordering
    Hybrid,
}

impl Default for AlgorithmKind {
    fn default() -> Self {
        AlgorithmKind::Coverage
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlgorithmKind::Coverage => "coverage",
            AlgorithmKind::AStar => "astar",
            AlgorithmKind::Genetic => "genetic",
            AlgorithmKind::Hybrid => "hybrid",
        };
        f.write_str(name)
    }
}

/// A request to plan a path over a work surface
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Algorithm to run
    pub algorithm: AlgorithmKind,
    /// Algorithm parameters; unknown keys are ignored
    #[serde(default)]
    pub parameters: PlanParams,
}

impl PlanRequest {
    /// Create a request with default parameters
    pub fn new(algorithm: AlgorithmKind) -> Self {
        Self {
            algorithm,
            parameters: PlanParams::default(),
        }
    }

    /// Attach a parameter map
    pub fn with_parameters(mut self, parameters: PlanParams) -> Self {
        self.parameters = parameters;
        self
    }
}

/// A planned path and its metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Ordered waypoints, snapped to grid cell centers
    pub waypoints: Vec<Waypoint>,
    /// Total Euclidean path length in meters
    pub total_distance: f64,
    /// Estimated execution time in seconds
    pub estimated_time: f64,
    /// Fraction of free cells visited, in [0, 1]
    pub coverage_fraction: f64,
    /// Wall-clock planning time in seconds
    pub planning_time: f64,
    /// Algorithm that produced the path
    pub algorithm: AlgorithmKind,
    /// Parameters the plan was produced with
    pub parameters: PlanParams,
}
