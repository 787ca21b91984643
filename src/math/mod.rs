pub mod arc_2d;
pub mod distance_2d;
pub mod numeric;

use std::f64::consts::{PI, TAU};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Distance under which two points are treated as the same joint.
pub const JOIN_TOLERANCE: f64 = 1e-6;

/// Returns the left-hand normal of a direction (rotated +90 degrees).
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Returns the heading of a direction in radians, in `(-pi, pi]`.
#[must_use]
pub fn heading(dir: &Vector2) -> f64 {
    dir.y.atan2(dir.x)
}

/// Shifts `angle` by whole turns so it lies within `pi` of `previous`.
#[must_use]
pub fn unwrap_angle(previous: f64, angle: f64) -> f64 {
    previous + (angle - previous + PI).rem_euclid(TAU) - PI
}

/// Returns `true` when every coordinate of the point is finite.
#[must_use]
pub fn is_finite_point(p: &Point2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
