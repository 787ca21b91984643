use std::f64::consts::TAU;

use crate::error::GeometryError;
use crate::math::arc_2d::{arc_point_at, arc_tangent_at, sweep_parameter, Winding};
use crate::math::{is_finite_point, Point2, Vector2, TOLERANCE};

use super::Curve;

/// A full circle traversed one or more times.
///
/// Traversal starts at `start_angle` and runs `turns` revolutions in the
/// given winding. Fractional turns are allowed but at least a tiny positive
/// amount is required.
///
/// `P(u) = center + radius * (cos θ, sin θ)` with
/// `θ = start_angle ± 2*pi * turns * u`.
#[derive(Debug, Clone)]
pub struct Circle {
    center: Point2,
    radius: f64,
    start_angle: f64,
    turns: f64,
    winding: Winding,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the circle
    /// * `radius` - Radius (must be positive)
    /// * `start_angle` - Angle (radians) at which traversal begins
    /// * `turns` - Number of revolutions (must be positive)
    /// * `winding` - Direction of travel
    ///
    /// # Errors
    ///
    /// Returns an error if the radius or turn count is non-positive, or any
    /// value is non-finite.
    pub fn new(
        center: Point2,
        radius: f64,
        start_angle: f64,
        turns: f64,
        winding: Winding,
    ) -> Result<Self, GeometryError> {
        if !is_finite_point(&center) {
            return Err(GeometryError::NonFinite("circle center"));
        }
        if !radius.is_finite() || !start_angle.is_finite() || !turns.is_finite() {
            return Err(GeometryError::NonFinite("circle parameter"));
        }
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("circle radius must be positive".into()));
        }
        if turns < TOLERANCE {
            return Err(GeometryError::Degenerate("circle turns must be positive".into()));
        }

        Ok(Self {
            center,
            radius,
            start_angle,
            turns,
            winding,
        })
    }

    /// One counter-clockwise revolution starting at angle zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn full(center: Point2, radius: f64) -> Result<Self, GeometryError> {
        Self::new(center, radius, 0.0, 1.0, Winding::CounterClockwise)
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the number of revolutions.
    #[must_use]
    pub fn turns(&self) -> f64 {
        self.turns
    }

    /// Returns the start angle in radians.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Returns the signed total sweep in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.winding.sign() * TAU * self.turns
    }
}

impl Curve for Circle {
    fn point_at(&self, u: f64) -> Point2 {
        arc_point_at(&self.center, self.radius, self.start_angle, self.sweep(), u)
    }

    fn tangent_at(&self, u: f64) -> Vector2 {
        arc_tangent_at(self.start_angle, self.sweep(), u)
    }

    fn length(&self) -> f64 {
        self.radius * TAU * self.turns
    }

    fn closest_parameter(&self, point: &Point2) -> f64 {
        let offset = point - self.center;
        if offset.norm() < TOLERANCE {
            return 0.0;
        }
        sweep_parameter(offset.y.atan2(offset.x), self.start_angle, self.sweep())
    }
}
