use std::sync::OnceLock;

use crate::error::GeometryError;
use crate::math::numeric::{closest_parameter_sampled, DEFAULT_SUBDIVISIONS};
use crate::math::{is_finite_point, Point2, Vector2, TOLERANCE};

use super::parametric::chord_direction;
use super::sampled::LengthTable;
use super::{unit_or_none, Curve};

/// Trajectory of a point launched from `origin` under constant gravity.
///
/// `P(t) = origin + v * t + (0, -g * t^2 / 2)` for `t` in `[t_start, t_end]`,
/// mapped linearly onto the local parameter `u`.
#[derive(Debug, Clone)]
pub struct Projectile {
    origin: Point2,
    velocity: Vector2,
    gravity: f64,
    t_start: f64,
    t_end: f64,
    table: OnceLock<LengthTable>,
}

impl Projectile {
    /// Creates a trajectory from launch speed and elevation angle (radians).
    ///
    /// # Errors
    ///
    /// Returns an error if any value is non-finite, the time range is empty,
    /// or the body never moves (zero speed and zero gravity).
    pub fn new(
        origin: Point2,
        speed: f64,
        angle: f64,
        gravity: f64,
        t_start: f64,
        t_end: f64,
    ) -> Result<Self, GeometryError> {
        if !speed.is_finite() || !angle.is_finite() {
            return Err(GeometryError::NonFinite("projectile launch"));
        }
        Self::from_velocity(
            origin,
            Vector2::new(speed * angle.cos(), speed * angle.sin()),
            gravity,
            t_start,
            t_end,
        )
    }

    /// Creates a trajectory from an initial velocity vector.
    ///
    /// # Errors
    ///
    /// See [`Projectile::new`].
    pub fn from_velocity(
        origin: Point2,
        velocity: Vector2,
        gravity: f64,
        t_start: f64,
        t_end: f64,
    ) -> Result<Self, GeometryError> {
        if !is_finite_point(&origin) {
            return Err(GeometryError::NonFinite("projectile origin"));
        }
        if !velocity.x.is_finite() || !velocity.y.is_finite() || !gravity.is_finite() {
            return Err(GeometryError::NonFinite("projectile launch"));
        }
        if !t_start.is_finite() || !t_end.is_finite() {
            return Err(GeometryError::NonFinite("projectile time range"));
        }
        if t_end <= t_start {
            return Err(GeometryError::Degenerate(
                "projectile time range must have t_end > t_start".into(),
            ));
        }
        if velocity.norm() < TOLERANCE && gravity.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("projectile never moves".into()));
        }

        Ok(Self {
            origin,
            velocity,
            gravity,
            t_start,
            t_end,
            table: OnceLock::new(),
        })
    }

    /// Returns the launch point.
    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    /// Returns the initial velocity.
    #[must_use]
    pub fn velocity(&self) -> &Vector2 {
        &self.velocity
    }

    /// Returns the gravitational acceleration (positive pulls toward -y).
    #[must_use]
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Returns the flight-time range `(t_start, t_end)`.
    #[must_use]
    pub fn time_range(&self) -> (f64, f64) {
        (self.t_start, self.t_end)
    }

    /// Position at flight time `t`.
    #[must_use]
    pub fn position_at_time(&self, t: f64) -> Point2 {
        Point2::new(
            self.origin.x + self.velocity.x * t,
            self.origin.y + self.velocity.y * t - 0.5 * self.gravity * t * t,
        )
    }

    fn t_of(&self, u: f64) -> f64 {
        self.t_start + u.clamp(0.0, 1.0) * (self.t_end - self.t_start)
    }

    /// `dP/du` at local parameter `u`.
    fn speed_vector(&self, u: f64) -> Vector2 {
        let t = self.t_of(u);
        Vector2::new(self.velocity.x, self.velocity.y - self.gravity * t) * (self.t_end - self.t_start)
    }

    fn table(&self) -> &LengthTable {
        self.table
            .get_or_init(|| LengthTable::build(|u| self.speed_vector(u).norm(), DEFAULT_SUBDIVISIONS))
    }
}

impl Curve for Projectile {
    fn point_at(&self, u: f64) -> Point2 {
        self.position_at_time(self.t_of(u))
    }

    fn tangent_at(&self, u: f64) -> Vector2 {
        unit_or_none(&self.speed_vector(u))
            .or_else(|| chord_direction(|v| self.point_at(v), u.clamp(0.0, 1.0)))
            .unwrap_or_else(|| -Vector2::y())
    }

    fn length(&self) -> f64 {
        self.table().total()
    }

    fn parameter_at_length(&self, distance: f64) -> f64 {
        self.table().parameter_at(distance)
    }

    fn length_at_parameter(&self, u: f64) -> f64 {
        self.table().length_at(u)
    }

    fn closest_parameter(&self, point: &Point2) -> f64 {
        closest_parameter_sampled(|u| self.point_at(u), point, DEFAULT_SUBDIVISIONS)
    }
}
