//! Kinematic laws mapping normalized time α in `[0, 1]` to arc length.
//!
//! A profile is bound once to the length it has to cover. Binding is strict
//! and fails on inconsistent parameters; evaluation afterwards is total and
//! always yields `s(0) = 0` and `s(1) = L` exactly.

pub mod accel;
pub mod keyframes;

pub use accel::{AccelConfig, Quadratic};
pub use keyframes::{Interpolation, Keyframe, KeyframeConfig, KeyframeCurve, KeyframeUnits};

use serde::Deserialize;
use tracing::debug;

use crate::error::ProfileConfigError;
use crate::track::Track;

use accel::length_tolerance;

/// Unbound description of a motion law, as read from a plan.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(tag = "law", rename_all = "snake_case")]
pub enum ProfileConfig {
    /// Uniform speed.
    #[default]
    Constant,
    /// Speeding up under constant acceleration.
    ConstantAccel(AccelConfig),
    /// Mirror image of [`ProfileConfig::ConstantAccel`]: the parameters
    /// describe the motion run backwards from the end, so `initial_speed`
    /// is the speed on arrival.
    ConstantDecel(AccelConfig),
    Keyframes(KeyframeConfig),
}

/// A motion law bound to a length `L`.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionProfile {
    Constant { length: f64 },
    ConstantAccel(Quadratic),
    ConstantDecel { ramp: Quadratic, length: f64 },
    Keyframes { curve: KeyframeCurve, length: f64 },
}

impl MotionProfile {
    /// Binds `config` to a path of length `length`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileConfigError`] when the length is negative or
    /// non-finite, or the law's parameters cannot produce `s(1) = L`.
    pub fn bind(config: &ProfileConfig, length: f64) -> Result<Self, ProfileConfigError> {
        if !length.is_finite() || length < 0.0 {
            return Err(ProfileConfigError::InvalidLength(length));
        }
        let profile = match config {
            ProfileConfig::Constant => Self::Constant { length },
            ProfileConfig::ConstantAccel(accel) => Self::ConstantAccel(Quadratic::new(accel, length)?),
            ProfileConfig::ConstantDecel(accel) => Self::ConstantDecel {
                ramp: Quadratic::new(accel, length)?,
                length,
            },
            ProfileConfig::Keyframes(keys) => Self::Keyframes {
                curve: KeyframeCurve::new(keys, length)?,
                length,
            },
        };
        debug!(law = profile.law(), length, "motion profile bound");
        Ok(profile)
    }

    /// Binds `config` to the whole of `track`.
    ///
    /// # Errors
    ///
    /// See [`MotionProfile::bind`].
    pub fn bind_to_track(config: &ProfileConfig, track: &Track) -> Result<Self, ProfileConfigError> {
        Self::bind(config, track.total_length())
    }

    /// Checks that this profile covers exactly `length`, within tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileConfigError::LengthMismatch`] otherwise.
    pub fn check_length(&self, length: f64) -> Result<(), ProfileConfigError> {
        let actual = self.length();
        if (actual - length).abs() > length_tolerance(length) {
            return Err(ProfileConfigError::LengthMismatch {
                expected: length,
                actual,
            });
        }
        Ok(())
    }

    /// Uniform motion over `length`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileConfigError::InvalidLength`] for a negative or
    /// non-finite length.
    pub fn constant(length: f64) -> Result<Self, ProfileConfigError> {
        Self::bind(&ProfileConfig::Constant, length)
    }

    /// The length this profile covers.
    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            Self::Constant { length }
            | Self::ConstantDecel { length, .. }
            | Self::Keyframes { length, .. } => *length,
            Self::ConstantAccel(q) => q.length(),
        }
    }

    /// Short name of the law, for logs.
    #[must_use]
    pub fn law(&self) -> &'static str {
        match self {
            Self::Constant { .. } => "constant",
            Self::ConstantAccel(_) => "constant_accel",
            Self::ConstantDecel { .. } => "constant_decel",
            Self::Keyframes { .. } => "keyframes",
        }
    }

    /// Arc length reached at `alpha`.
    ///
    /// `alpha` is clamped into `[0, 1]`; NaN counts as 0.
    #[must_use]
    pub fn evaluate(&self, alpha: f64) -> f64 {
        let length = self.length();
        if alpha.is_nan() || alpha <= 0.0 {
            return 0.0;
        }
        if alpha >= 1.0 {
            return length;
        }
        let s = match self {
            Self::Constant { length } => alpha * length,
            Self::ConstantAccel(q) => q.evaluate(alpha),
            Self::ConstantDecel { ramp, length } => length - ramp.evaluate(1.0 - alpha),
            Self::Keyframes { curve, .. } => curve.evaluate(alpha),
        };
        s.clamp(0.0, length)
    }

    /// `ds/dα` at `alpha`, after the same clamping as [`MotionProfile::evaluate`].
    #[must_use]
    pub fn speed(&self, alpha: f64) -> f64 {
        let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        match self {
            Self::Constant { length } => *length,
            Self::ConstantAccel(q) => q.speed(alpha),
            Self::ConstantDecel { ramp, .. } => ramp.speed(1.0 - alpha),
            Self::Keyframes { curve, .. } => curve.speed(alpha),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn all_laws(length: f64) -> Vec<MotionProfile> {
        let keys = KeyframeConfig {
            points: vec![
                Keyframe::new(0.0, 0.0),
                Keyframe::new(0.5, 0.9 * length),
                Keyframe::new(1.0, length),
            ],
            ..KeyframeConfig::default()
        };
        [
            ProfileConfig::Constant,
            ProfileConfig::ConstantAccel(AccelConfig::default()),
            ProfileConfig::ConstantDecel(AccelConfig::default()),
            ProfileConfig::Keyframes(keys),
        ]
        .iter()
        .map(|c| MotionProfile::bind(c, length).unwrap())
        .collect()
    }

    #[test]
    fn endpoints_are_exact() {
        let length = 17.853_981_633_974_48;
        for p in all_laws(length) {
            assert_eq!(p.evaluate(0.0).to_bits(), 0.0_f64.to_bits(), "{}", p.law());
            assert_eq!(p.evaluate(1.0).to_bits(), length.to_bits(), "{}", p.law());
        }
    }

    #[test]
    fn alpha_is_clamped() {
        for p in all_laws(4.0) {
            assert!(p.evaluate(-0.5).abs() < f64::EPSILON);
            assert!((p.evaluate(3.0) - 4.0).abs() < f64::EPSILON);
            assert!(p.evaluate(f64::NAN).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn constant_is_linear() {
        let p = MotionProfile::constant(10.0).unwrap();
        assert_relative_eq!(p.evaluate(0.5), 5.0);
        assert_relative_eq!(p.speed(0.3), 10.0);
    }

    #[test]
    fn accel_increments_grow() {
        let p = MotionProfile::bind(&ProfileConfig::ConstantAccel(AccelConfig::default()), 1.0).unwrap();
        let mut prev_step = 0.0;
        for i in 0..10 {
            let step = p.evaluate(f64::from(i + 1) / 10.0) - p.evaluate(f64::from(i) / 10.0);
            assert!(step > prev_step);
            prev_step = step;
        }
    }

    #[test]
    fn decel_mirrors_accel() {
        let accel = MotionProfile::bind(&ProfileConfig::ConstantAccel(AccelConfig::default()), 8.0).unwrap();
        let decel = MotionProfile::bind(&ProfileConfig::ConstantDecel(AccelConfig::default()), 8.0).unwrap();
        for i in 0..=10 {
            let a = f64::from(i) / 10.0;
            assert_relative_eq!(decel.evaluate(a), 8.0 - accel.evaluate(1.0 - a), epsilon = 1e-12);
        }
        // Arrives at rest.
        assert!(decel.speed(1.0).abs() < 1e-12);
        assert_relative_eq!(decel.speed(0.0), 16.0);
    }

    #[test]
    fn keyframes_differ_from_constant() {
        let laws = all_laws(10.0);
        let k = laws[3].evaluate(0.25);
        assert!(k > 0.0 && k < 9.0);
        assert!((k - laws[0].evaluate(0.25)).abs() > 1e-6);
    }

    #[test]
    fn length_is_checked_against_track() {
        use crate::geometry::Polyline;
        use crate::math::Point2;

        let track = Track::new(vec![Polyline::line(Point2::origin(), Point2::new(10.0, 0.0))
            .unwrap()
            .into()])
        .unwrap();
        let bound = MotionProfile::bind_to_track(&ProfileConfig::Constant, &track).unwrap();
        assert!(bound.check_length(track.total_length()).is_ok());
        assert!(bound.check_length(10.0 + 1e-9).is_ok());

        let err = MotionProfile::constant(30.0).unwrap().check_length(10.0).unwrap_err();
        assert_eq!(
            err,
            ProfileConfigError::LengthMismatch {
                expected: 10.0,
                actual: 30.0
            }
        );
    }

    #[test]
    fn rejects_bad_length() {
        assert_eq!(
            MotionProfile::constant(-1.0).unwrap_err(),
            ProfileConfigError::InvalidLength(-1.0)
        );
    }

    #[test]
    fn config_from_json() {
        let c: ProfileConfig = serde_json::from_str(r#"{"law": "constant_accel", "speed_ratio": 0.25}"#).unwrap();
        assert_eq!(
            c,
            ProfileConfig::ConstantAccel(AccelConfig {
                speed_ratio: Some(0.25),
                ..AccelConfig::default()
            })
        );
        let c: ProfileConfig = serde_json::from_str(r#"{"law": "constant"}"#).unwrap();
        assert_eq!(c, ProfileConfig::Constant);
        let c: ProfileConfig = serde_json::from_str(
            r#"{"law": "keyframes", "points": [{"alpha": 0, "distance": 0}, {"alpha": 1, "distance": 1}],
                "units": "fraction", "interpolation": "smooth"}"#,
        )
        .unwrap();
        let p = MotionProfile::bind(&c, 3.0).unwrap();
        assert_relative_eq!(p.evaluate(0.5), 1.5, epsilon = 1e-12);
    }
}
