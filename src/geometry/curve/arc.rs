use std::f64::consts::TAU;

use crate::error::GeometryError;
use crate::math::arc_2d::{arc_point_at, arc_tangent_at, sweep_between, sweep_parameter, Winding};
use crate::math::{is_finite_point, Point2, Vector2, TOLERANCE};

use super::Curve;

/// A circular arc in the plane.
///
/// Defined by a center, radius, start angle and a signed sweep (radians).
/// A positive sweep travels counter-clockwise. The sweep never exceeds one
/// full turn; use [`Circle`](super::Circle) for that.
#[derive(Debug, Clone)]
pub struct Arc {
    center: Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
}

impl Arc {
    /// Creates an arc from `start_angle` to `end_angle` travelling in `winding`.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the arc circle
    /// * `radius` - Radius (must be positive)
    /// * `start_angle` - Start angle in radians
    /// * `end_angle` - End angle in radians
    /// * `winding` - Direction of travel from start to end
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, any value is
    /// non-finite, or the two angles coincide.
    pub fn new(
        center: Point2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        winding: Winding,
    ) -> Result<Self, GeometryError> {
        if !end_angle.is_finite() {
            return Err(GeometryError::NonFinite("arc end angle"));
        }
        if !start_angle.is_finite() {
            return Err(GeometryError::NonFinite("arc start angle"));
        }
        let sweep = sweep_between(start_angle, end_angle, winding);
        Self::from_sweep(center, radius, start_angle, sweep)
    }

    /// Creates an arc from a start angle and a signed sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, any value is
    /// non-finite, or the sweep is zero or longer than one turn.
    pub fn from_sweep(
        center: Point2,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    ) -> Result<Self, GeometryError> {
        if !is_finite_point(&center) {
            return Err(GeometryError::NonFinite("arc center"));
        }
        if !radius.is_finite() || !start_angle.is_finite() || !sweep.is_finite() {
            return Err(GeometryError::NonFinite("arc parameter"));
        }
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()));
        }
        if sweep.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("arc sweep must be non-zero".into()));
        }
        if sweep.abs() > TAU + TOLERANCE {
            return Err(GeometryError::Degenerate(
                "arc sweep exceeds a full turn; use a circle".into(),
            ));
        }

        Ok(Self {
            center,
            radius,
            start_angle,
            sweep,
        })
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the start angle in radians.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Returns the signed sweep in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Returns the direction of travel.
    #[must_use]
    pub fn winding(&self) -> Winding {
        Winding::of_sweep(self.sweep)
    }
}

impl Curve for Arc {
    fn point_at(&self, u: f64) -> Point2 {
        arc_point_at(&self.center, self.radius, self.start_angle, self.sweep, u)
    }

    fn tangent_at(&self, u: f64) -> Vector2 {
        arc_tangent_at(self.start_angle, self.sweep, u)
    }

    fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }

    fn closest_parameter(&self, point: &Point2) -> f64 {
        let offset = point - self.center;
        if offset.norm() < TOLERANCE {
            // Every point of the arc is equidistant; take the start.
            return 0.0;
        }
        sweep_parameter(offset.y.atan2(offset.x), self.start_angle, self.sweep)
    }
}
