//! Work surface description: waypoints, obstacles, and the surface itself
//!
//! All coordinates are in meters. The surface origin is its bottom-left
//! corner; obstacle positions are CENTER coordinates for every shape kind.

use serde::{Deserialize, Serialize};

/// A single point the end-effector should visit
///
/// The z coordinate is carried for the benefit of downstream consumers but
/// is always 0 in this planning core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// X coordinate in meters
    pub x: f64,
    /// Y coordinate in meters
    pub y: f64,
    /// Z coordinate in meters (always 0.0)
    pub z: f64,
}

impl Waypoint {
    /// Create a new waypoint on the work surface plane
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Coordinates rounded to 1 mm, for duplicate suppression
    pub fn rounded_key(&self) -> (i64, i64) {
        (
            (self.x * 1000.0).round() as i64,
            (self.y * 1000.0).round() as i64,
        )
    }
}

/// An obstacle on the work surface
///
/// `x` and `y` are the shape center for rectangles and circles. Polygon
/// vertices are absolute surface coordinates in the given order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "obstacle_type", rename_all = "snake_case")]
pub enum Obstacle {
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
    },
    Polygon {
        vertices: Vec<[f64; 2]>,
    },
}

/// A rectangular work surface with obstacles
///
/// Dimensions and resolution must be strictly positive; this is validated
/// when a plan request is executed. Obstacles are assumed to lie on the
/// surface, but out-of-bounds portions are tolerated and clipped when the
/// occupancy grid is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSurface {
    /// Surface width in meters
    pub width: f64,
    /// Surface height in meters
    pub height: f64,
    /// Default grid cell size in meters
    pub resolution: f64,
    /// Obstacles on the surface
    pub obstacles: Vec<Obstacle>,
}

impl WorkSurface {
    /// Create an obstacle-free surface
    pub fn new(width: f64, height: f64, resolution: f64) -> Self {
        Self {
            width,
            height,
            resolution,
            obstacles: Vec::new(),
        }
    }

    /// Add obstacles to the surface
    pub fn with_obstacles(mut self, obstacles: Vec<Obstacle>) -> Self {
        self.obstacles = obstacles;
        self
    }
}
