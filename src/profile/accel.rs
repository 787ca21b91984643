use serde::Deserialize;

use crate::error::ProfileConfigError;

/// How a uniformly accelerated profile is pinned down.
///
/// At most one of the forms below may be used:
///
/// - nothing set: start from rest;
/// - `speed_ratio`: start speed over end speed, in `[0, 1)`;
/// - `initial_speed` and/or `acceleration`, in distance per unit of α.
///
/// Whatever is left free is solved from `s(1) = L`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AccelConfig {
    pub initial_speed: Option<f64>,
    pub acceleration: Option<f64>,
    pub speed_ratio: Option<f64>,
}

/// `s(α) = v0·α + a·α²/2` with `v0 ≥ 0`, `a > 0` and `s(1) = L`.
///
/// `a` is 0 only on a zero-length span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    initial_speed: f64,
    acceleration: f64,
    length: f64,
}

impl Quadratic {
    /// Solves the free coefficients for a path of length `length`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileConfigError::ConflictingParameters`] when a speed ratio
    /// is mixed with explicit coefficients, [`ProfileConfigError::LengthMismatch`]
    /// when explicit coefficients do not cover `length`, and
    /// [`ProfileConfigError::Unsatisfiable`] when the acceleration would not
    /// be positive on a non-empty span.
    pub fn new(config: &AccelConfig, length: f64) -> Result<Self, ProfileConfigError> {
        if !length.is_finite() || length < 0.0 {
            return Err(ProfileConfigError::InvalidLength(length));
        }
        let initial_speed = config
            .initial_speed
            .map(|v| non_negative("initial_speed", v))
            .transpose()?;
        let acceleration = config
            .acceleration
            .map(|a| non_negative("acceleration", a))
            .transpose()?;

        let (v0, a) = match (initial_speed, acceleration, config.speed_ratio) {
            (None, None, None) => (0.0, 2.0 * length),
            (None, None, Some(r)) => {
                if !(0.0..1.0).contains(&r) {
                    return Err(ProfileConfigError::InvalidParameter {
                        parameter: "speed_ratio",
                        value: r,
                    });
                }
                (2.0 * length * r / (1.0 + r), 2.0 * length * (1.0 - r) / (1.0 + r))
            }
            (_, _, Some(_)) => {
                return Err(ProfileConfigError::ConflictingParameters(
                    "speed_ratio cannot be combined with initial_speed or acceleration",
                ))
            }
            (Some(v0), Some(a), None) => {
                let actual = v0 + 0.5 * a;
                if (actual - length).abs() > length_tolerance(length) {
                    return Err(ProfileConfigError::LengthMismatch {
                        expected: length,
                        actual,
                    });
                }
                (v0, a)
            }
            (None, Some(a), None) => {
                let v0 = length - 0.5 * a;
                if v0 < -length_tolerance(length) {
                    return Err(ProfileConfigError::Unsatisfiable(format!(
                        "acceleration {a} overshoots a length of {length} even from rest"
                    )));
                }
                (v0.max(0.0), a)
            }
            (Some(v0), None, None) => {
                let a = 2.0 * (length - v0);
                if a < -length_tolerance(length) {
                    return Err(ProfileConfigError::Unsatisfiable(format!(
                        "initial speed {v0} overshoots a length of {length} without braking"
                    )));
                }
                (v0, a.max(0.0))
            }
        };
        if length > 0.0 && a <= 0.0 {
            return Err(ProfileConfigError::Unsatisfiable(format!(
                "initial speed {v0} leaves no acceleration over a length of {length}"
            )));
        }

        Ok(Self {
            initial_speed: v0,
            acceleration: a,
            length,
        })
    }

    /// The length covered at `α = 1`.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn initial_speed(&self) -> f64 {
        self.initial_speed
    }

    #[must_use]
    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    /// Distance covered at `alpha`, clamped into `[0, L]`.
    #[must_use]
    pub fn evaluate(&self, alpha: f64) -> f64 {
        (self.initial_speed * alpha + 0.5 * self.acceleration * alpha * alpha).clamp(0.0, self.length)
    }

    /// `ds/dα` at `alpha`.
    #[must_use]
    pub fn speed(&self, alpha: f64) -> f64 {
        self.initial_speed + self.acceleration * alpha
    }
}

/// Tolerance for checking that coefficients reach the expected length.
pub(crate) fn length_tolerance(length: f64) -> f64 {
    1e-6 * length.max(1.0)
}

fn non_negative(parameter: &'static str, value: f64) -> Result<f64, ProfileConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ProfileConfigError::InvalidParameter { parameter, value })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cfg(v0: Option<f64>, a: Option<f64>, r: Option<f64>) -> AccelConfig {
        AccelConfig {
            initial_speed: v0,
            acceleration: a,
            speed_ratio: r,
        }
    }

    #[test]
    fn from_rest() {
        let q = Quadratic::new(&AccelConfig::default(), 10.0).unwrap();
        assert!(q.initial_speed().abs() < 1e-15);
        assert_relative_eq!(q.acceleration(), 20.0);
        assert_relative_eq!(q.evaluate(0.5), 2.5);
        assert_relative_eq!(q.evaluate(1.0), 10.0);
    }

    #[test]
    fn speed_ratio() {
        let q = Quadratic::new(&cfg(None, None, Some(0.5)), 6.0).unwrap();
        assert_relative_eq!(q.speed(0.0) / q.speed(1.0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(q.evaluate(1.0), 6.0, epsilon = 1e-12);
        assert!(Quadratic::new(&cfg(None, None, Some(1.0)), 6.0).is_err());
    }

    #[test]
    fn explicit_pair_must_cover_length() {
        assert!(Quadratic::new(&cfg(Some(2.0), Some(4.0), None), 4.0).is_ok());
        let err = Quadratic::new(&cfg(Some(2.0), Some(4.0), None), 5.0).unwrap_err();
        assert!(matches!(err, ProfileConfigError::LengthMismatch { .. }));
    }

    #[test]
    fn acceleration_only() {
        let q = Quadratic::new(&cfg(None, Some(4.0), None), 5.0).unwrap();
        assert_relative_eq!(q.initial_speed(), 3.0);
        let err = Quadratic::new(&cfg(None, Some(12.0), None), 5.0).unwrap_err();
        assert!(matches!(err, ProfileConfigError::Unsatisfiable(_)));
    }

    #[test]
    fn initial_speed_only() {
        let q = Quadratic::new(&cfg(Some(1.0), None, None), 5.0).unwrap();
        assert_relative_eq!(q.acceleration(), 8.0);
        let err = Quadratic::new(&cfg(Some(7.0), None, None), 5.0).unwrap_err();
        assert!(matches!(err, ProfileConfigError::Unsatisfiable(_)));
    }

    #[test]
    fn zero_acceleration_is_unsatisfiable() {
        for c in [
            cfg(Some(10.0), Some(0.0), None),
            cfg(None, Some(0.0), None),
            cfg(Some(10.0), None, None),
        ] {
            let err = Quadratic::new(&c, 10.0).unwrap_err();
            assert!(matches!(err, ProfileConfigError::Unsatisfiable(_)), "{c:?}");
        }
        let q = Quadratic::new(&cfg(Some(0.0), Some(0.0), None), 0.0).unwrap();
        assert!(q.evaluate(0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_conflicts_and_negatives() {
        let err = Quadratic::new(&cfg(Some(1.0), None, Some(0.2)), 5.0).unwrap_err();
        assert!(matches!(err, ProfileConfigError::ConflictingParameters(_)));
        let err = Quadratic::new(&cfg(None, Some(-1.0), None), 5.0).unwrap_err();
        assert!(matches!(
            err,
            ProfileConfigError::InvalidParameter {
                parameter: "acceleration",
                ..
            }
        ));
        assert!(Quadratic::new(&AccelConfig::default(), f64::NAN).is_err());
    }
}
