//! 2D Shape Primitives
//!
//! Obstacle geometry for occupancy grid rasterization: containment,
//! bounds, and distance queries, plus waypoint path measurement.
//!
//! # Example
//!
//! ```rust
//! use nalgebra::Point2;
//! use plaster_core::Obstacle;
//! use plaster_planner::algorithms::geometry::Shape;
//!
//! let shape = Shape::from_obstacle(&Obstacle::Circle {
//!     x: 0.5,
//!     y: 0.5,
//!     radius: 0.1,
//! })
//! .unwrap();
//!
//! assert!(shape.contains(Point2::new(0.55, 0.5)));
//! assert!(!shape.contains(Point2::new(0.7, 0.5)));
//! ```

use nalgebra::{Point2, Vector2};
use plaster_core::error::{PlasterError, PlasterResult};
use plaster_core::surface::{Obstacle, Waypoint};

/// A 2D obstacle shape
///
/// Containment tests are analytic: point-in-axis-box for boxes, squared
/// distance for circles, ray casting for polygons. A point exactly on the
/// boundary counts as outside, matching interior containment semantics.
#[derive(Debug, Clone)]
pub enum Shape {
    Box {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },
    Circle {
        center: Point2<f64>,
        radius: f64,
    },
    Polygon {
        vertices: Vec<Point2<f64>>,
    },
}

impl Shape {
    /// Build a shape from an obstacle description
    ///
    /// Rectangles and circles are positioned by their center. Fails with
    /// `InvalidObstacle` on non-positive dimensions or a polygon with
    /// fewer than 3 vertices.
    pub fn from_obstacle(obstacle: &Obstacle) -> PlasterResult<Self> {
        match obstacle {
            Obstacle::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                if *width <= 0.0 || *height <= 0.0 {
                    return Err(PlasterError::InvalidObstacle(format!(
                        "rectangle dimensions must be positive, got {}x{}",
                        width, height
                    )));
                }
                Ok(Shape::Box {
                    min_x: x - width / 2.0,
                    min_y: y - height / 2.0,
                    max_x: x + width / 2.0,
                    max_y: y + height / 2.0,
                })
            }
            Obstacle::Circle { x, y, radius } => {
                if *radius <= 0.0 {
                    return Err(PlasterError::InvalidObstacle(format!(
                        "circle radius must be positive, got {}",
                        radius
                    )));
                }
                Ok(Shape::Circle {
                    center: Point2::new(*x, *y),
                    radius: *radius,
                })
            }
            Obstacle::Polygon { vertices } => {
                if vertices.len() < 3 {
                    return Err(PlasterError::InvalidObstacle(format!(
                        "polygon must have at least 3 vertices, got {}",
                        vertices.len()
                    )));
                }
                Ok(Shape::Polygon {
                    vertices: vertices.iter().map(|v| Point2::new(v[0], v[1])).collect(),
                })
            }
        }
    }

    /// Check if a point lies strictly inside the shape
    pub fn contains(&self, point: Point2<f64>) -> bool {
        match self {
            Shape::Box {
                min_x,
                min_y,
                max_x,
                max_y,
            } => {
                point.x > *min_x && point.x < *max_x && point.y > *min_y && point.y < *max_y
            }
            Shape::Circle { center, radius } => {
                let d = point - center;
                d.norm_squared() < radius * radius
            }
            Shape::Polygon { vertices } => ray_cast(vertices, point),
        }
    }

    /// Axis-aligned bounding box as (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            Shape::Box {
                min_x,
                min_y,
                max_x,
                max_y,
            } => (*min_x, *min_y, *max_x, *max_y),
            Shape::Circle { center, radius } => (
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            ),
            Shape::Polygon { vertices } => {
                let mut min_x = f64::INFINITY;
                let mut min_y = f64::INFINITY;
                let mut max_x = f64::NEG_INFINITY;
                let mut max_y = f64::NEG_INFINITY;
                for v in vertices {
                    min_x = min_x.min(v.x);
                    min_y = min_y.min(v.y);
                    max_x = max_x.max(v.x);
                    max_y = max_y.max(v.y);
                }
                (min_x, min_y, max_x, max_y)
            }
        }
    }

    /// Distance from a point to the shape (0 for points inside)
    pub fn distance_to(&self, point: Point2<f64>) -> f64 {
        match self {
            Shape::Box {
                min_x,
                min_y,
                max_x,
                max_y,
            } => {
                let dx = (min_x - point.x).max(0.0).max(point.x - max_x);
                let dy = (min_y - point.y).max(0.0).max(point.y - max_y);
                (dx * dx + dy * dy).sqrt()
            }
            Shape::Circle { center, radius } => ((point - center).norm() - radius).max(0.0),
            Shape::Polygon { vertices } => {
                if ray_cast(vertices, point) {
                    return 0.0;
                }
                let mut min_dist = f64::INFINITY;
                for i in 0..vertices.len() {
                    let a = vertices[i];
                    let b = vertices[(i + 1) % vertices.len()];
                    min_dist = min_dist.min(point_segment_distance(point, a, b));
                }
                min_dist
            }
        }
    }
}

/// Even-odd ray casting test
fn ray_cast(vertices: &[Point2<f64>], point: Point2<f64>) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let a = vertices[i];
        let b = vertices[j];

        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

/// Distance from a point to a line segment
fn point_segment_distance(p: Point2<f64>, a: Point2<f64>, b: Point2<f64>) -> f64 {
    let ab: Vector2<f64> = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Euclidean distance between two points
pub fn distance(p: Point2<f64>, q: Point2<f64>) -> f64 {
    (q - p).norm()
}

/// Total Euclidean length of a waypoint sequence (0 for fewer than 2 points)
pub fn path_length(waypoints: &[Waypoint]) -> f64 {
    waypoints
        .windows(2)
        .map(|w| {
            let dx = w[1].x - w[0].x;
            let dy = w[1].y - w[0].y;
            (dx * dx + dy * dy).sqrt()
        })
        .sum()
}

/// Regular polygon outline approximating a circle
///
/// `quarter_segments` vertices per quarter turn; 16 gives the 64-gon a
/// buffered point produces. Used to validate that the analytic circle test
/// rasterizes like the polygon approximation.
pub fn circle_outline(center: Point2<f64>, radius: f64, quarter_segments: usize) -> Vec<[f64; 2]> {
    let n = quarter_segments * 4;
    (0..n)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
            [
                center.x + radius * theta.cos(),
                center.y + radius * theta.sin(),
            ]
        })
        .collect()
}
