use std::fmt;
use std::sync::OnceLock;

use crate::error::GeometryError;
use crate::math::numeric::{
    central_difference, closest_parameter_sampled, DEFAULT_SUBDIVISIONS, MIN_SUBDIVISIONS,
};
use crate::math::{is_finite_point, Point2, Vector2};

use super::sampled::LengthTable;
use super::{unit_or_none, Curve};

/// Position as a function of the curve's own parameter `t`.
pub type PointFn = dyn Fn(f64) -> Point2 + Send + Sync;

/// Derivative `dP/dt` as a function of `t`.
pub type DerivativeFn = dyn Fn(f64) -> Vector2 + Send + Sync;

/// A curve given by a function of a scalar parameter.
///
/// The function's parameter `t` runs over `[t_start, t_end]` and is mapped
/// linearly onto the local parameter `u` in `[0, 1]`. Without an explicit
/// derivative the speed is obtained by central differences.
#[derive(Clone)]
pub struct Parametric {
    position: std::sync::Arc<PointFn>,
    derivative: Option<std::sync::Arc<DerivativeFn>>,
    t_start: f64,
    t_end: f64,
    subdivisions: u32,
    table: OnceLock<LengthTable>,
}

impl Parametric {
    /// Creates a parametric curve over `[t_start, t_end]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is empty or non-finite, or the function
    /// yields a non-finite point at either end.
    pub fn new<F>(position: F, t_start: f64, t_end: f64) -> Result<Self, GeometryError>
    where
        F: Fn(f64) -> Point2 + Send + Sync + 'static,
    {
        if !t_start.is_finite() || !t_end.is_finite() {
            return Err(GeometryError::NonFinite("parametric range"));
        }
        if t_end <= t_start {
            return Err(GeometryError::Degenerate(
                "parametric range must have t_end > t_start".into(),
            ));
        }
        if !is_finite_point(&position(t_start)) || !is_finite_point(&position(t_end)) {
            return Err(GeometryError::NonFinite("parametric endpoint"));
        }

        Ok(Self {
            position: std::sync::Arc::new(position),
            derivative: None,
            t_start,
            t_end,
            subdivisions: DEFAULT_SUBDIVISIONS,
            table: OnceLock::new(),
        })
    }

    /// Supplies the analytic derivative `dP/dt`.
    #[must_use]
    pub fn with_derivative<D>(mut self, derivative: D) -> Self
    where
        D: Fn(f64) -> Vector2 + Send + Sync + 'static,
    {
        self.derivative = Some(std::sync::Arc::new(derivative));
        self.table = OnceLock::new();
        self
    }

    /// Sets the subdivision count used for arc length.
    ///
    /// # Errors
    ///
    /// Returns an error if `subdivisions` is below the fixed minimum.
    pub fn with_subdivisions(mut self, subdivisions: u32) -> Result<Self, GeometryError> {
        if subdivisions < MIN_SUBDIVISIONS {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "subdivisions",
                value: f64::from(subdivisions),
                min: f64::from(MIN_SUBDIVISIONS),
                max: f64::from(u32::MAX),
            });
        }
        self.subdivisions = subdivisions;
        self.table = OnceLock::new();
        Ok(self)
    }

    /// Returns the parameter range `(t_start, t_end)`.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.t_start, self.t_end)
    }

    fn t_of(&self, u: f64) -> f64 {
        self.t_start + u * (self.t_end - self.t_start)
    }

    /// `dP/du` at local parameter `u`.
    fn velocity(&self, u: f64) -> Vector2 {
        match &self.derivative {
            Some(d) => d(self.t_of(u)) * (self.t_end - self.t_start),
            None => central_difference(|v| self.point_at(v), u),
        }
    }

    fn table(&self) -> &LengthTable {
        self.table
            .get_or_init(|| LengthTable::build(|u| self.velocity(u).norm(), self.subdivisions))
    }
}

impl fmt::Debug for Parametric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parametric")
            .field("t_start", &self.t_start)
            .field("t_end", &self.t_end)
            .field("analytic_derivative", &self.derivative.is_some())
            .field("subdivisions", &self.subdivisions)
            .finish_non_exhaustive()
    }
}

impl Curve for Parametric {
    fn point_at(&self, u: f64) -> Point2 {
        (self.position)(self.t_of(u.clamp(0.0, 1.0)))
    }

    fn tangent_at(&self, u: f64) -> Vector2 {
        let u = u.clamp(0.0, 1.0);
        unit_or_none(&self.velocity(u))
            .or_else(|| chord_direction(|v| self.point_at(v), u))
            .unwrap_or_else(Vector2::x)
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
        closest_parameter_sampled(|u| self.point_at(u), point, self.subdivisions)
    }
}

/// Direction of travel from nearby points where the speed vanishes.
///
/// Looks ahead first, then behind, at a few growing step sizes.
pub(crate) fn chord_direction(f: impl Fn(f64) -> Point2, u: f64) -> Option<Vector2> {
    let here = f(u);
    [1e-4, 1e-3, 1e-2].into_iter().find_map(|h| {
        let ahead = (u + h).min(1.0);
        let behind = (u - h).max(0.0);
        (ahead > u)
            .then(|| unit_or_none(&(f(ahead) - here)))
            .flatten()
            .or_else(|| (behind < u).then(|| unit_or_none(&(here - f(behind)))).flatten())
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{PI, TAU};

    fn semicircle() -> Parametric {
        Parametric::new(|t: f64| Point2::new(t.cos(), t.sin()), 0.0, PI).unwrap()
    }

    #[test]
    fn numeric_length_matches_semicircle() {
        assert_relative_eq!(semicircle().length(), PI, epsilon = 1e-6);
    }

    #[test]
    fn analytic_derivative_length() {
        let c = Parametric::new(|t: f64| Point2::new(2.0 * t.cos(), 2.0 * t.sin()), 0.0, TAU)
            .unwrap()
            .with_derivative(|t: f64| Vector2::new(-2.0 * t.sin(), 2.0 * t.cos()));
        assert_relative_eq!(c.length(), 4.0 * PI, epsilon = 1e-9);
    }

    #[test]
    fn parabola_length() {
        // y = x^2 on [0, 1]: length = (2*sqrt(5) + asinh(2)) / 4
        let c = Parametric::new(|t: f64| Point2::new(t, t * t), 0.0, 1.0).unwrap();
        let expected = (2.0 * 5.0_f64.sqrt() + 2.0_f64.asinh()) / 4.0;
        assert_relative_eq!(c.length(), expected, epsilon = 1e-6);
    }

    #[test]
    fn tangent_is_unit() {
        let c = semicircle();
        let t = c.tangent_at(0.5);
        assert_relative_eq!(t.norm(), 1.0, epsilon = 1e-9);
        assert!((t - Vector2::new(-1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn zero_speed_falls_back_to_chord() {
        // Stationary at t = 0.
        let c = Parametric::new(|t: f64| Point2::new(t * t, 0.0), 0.0, 1.0)
            .unwrap()
            .with_derivative(|t: f64| Vector2::new(2.0 * t, 0.0));
        assert!((c.tangent_at(0.0) - Vector2::x()).norm() < 1e-9);
    }

    #[test]
    fn arc_length_round_trip() {
        let c = semicircle();
        let half = c.length() / 2.0;
        let u = c.parameter_at_length(half);
        assert_relative_eq!(u, 0.5, epsilon = 1e-9);
        assert_relative_eq!(c.length_at_parameter(u), half, epsilon = 1e-9);
    }

    #[test]
    fn closest_parameter_refines() {
        let c = semicircle();
        let u = c.closest_parameter(&Point2::new(0.0, 2.0));
        assert_relative_eq!(u, 0.5, epsilon = 1e-7);
    }

    #[test]
    fn rejects_empty_range_and_low_resolution() {
        assert!(Parametric::new(|t: f64| Point2::new(t, 0.0), 1.0, 1.0).is_err());
        let c = Parametric::new(|t: f64| Point2::new(t, 0.0), 0.0, 1.0).unwrap();
        assert!(c.with_subdivisions(8).is_err());
    }
}
