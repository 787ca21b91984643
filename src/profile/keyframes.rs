use serde::Deserialize;

use crate::error::ProfileConfigError;

use super::accel::length_tolerance;

/// One control point of a keyframed profile.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Keyframe {
    pub alpha: f64,
    pub distance: f64,
    /// `ds/dα` at this keyframe; estimated when absent.
    #[serde(default)]
    pub slope: Option<f64>,
}

impl Keyframe {
    #[must_use]
    pub fn new(alpha: f64, distance: f64) -> Self {
        Self {
            alpha,
            distance,
            slope: None,
        }
    }

    #[must_use]
    pub fn with_slope(mut self, slope: f64) -> Self {
        self.slope = Some(slope);
        self
    }
}

/// Unit of keyframe distances and slopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyframeUnits {
    /// Arc length along the span.
    #[default]
    Absolute,
    /// Fraction of the span length.
    Fraction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    #[default]
    Linear,
    /// Monotone cubic Hermite.
    Smooth,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct KeyframeConfig {
    pub points: Vec<Keyframe>,
    pub units: KeyframeUnits,
    /// Supplying any slope implies [`Interpolation::Smooth`].
    pub interpolation: Interpolation,
}

/// Piecewise interpolation through validated keyframes.
///
/// Distances are absolute and run from exactly 0 to exactly `L`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeCurve {
    alphas: Vec<f64>,
    distances: Vec<f64>,
    /// Hermite slopes; `None` for linear interpolation.
    slopes: Option<Vec<f64>>,
}

impl KeyframeCurve {
    /// Validates the keyframes against a span of length `length`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileConfigError`] if there are fewer than two keyframes,
    /// alphas leave `[0, 1]`, alphas or distances do not strictly increase,
    /// the first distance is not 0, the last is not `length`, or a supplied
    /// slope would break monotonicity.
    pub fn new(config: &KeyframeConfig, length: f64) -> Result<Self, ProfileConfigError> {
        if !length.is_finite() || length < 0.0 {
            return Err(ProfileConfigError::InvalidLength(length));
        }
        let points = &config.points;
        if points.len() < 2 {
            return Err(ProfileConfigError::TooFewKeyframes(points.len()));
        }
        let scale = match config.units {
            KeyframeUnits::Absolute => 1.0,
            KeyframeUnits::Fraction => length,
        };

        let mut alphas = Vec::with_capacity(points.len());
        let mut distances = Vec::with_capacity(points.len());
        for (index, k) in points.iter().enumerate() {
            if !(0.0..=1.0).contains(&k.alpha) {
                return Err(ProfileConfigError::KeyframeOutOfRange {
                    index,
                    alpha: k.alpha,
                });
            }
            if !k.distance.is_finite() {
                return Err(ProfileConfigError::InvalidParameter {
                    parameter: "keyframe distance",
                    value: k.distance,
                });
            }
            if let Some(&prev_alpha) = alphas.last() {
                if k.alpha <= prev_alpha {
                    return Err(ProfileConfigError::NonMonotonic {
                        index,
                        field: "alpha",
                    });
                }
                // Compared before scaling so fractions still order on a zero-length span.
                if k.distance <= points[index - 1].distance {
                    return Err(ProfileConfigError::NonMonotonic {
                        index,
                        field: "distance",
                    });
                }
            }
            alphas.push(k.alpha);
            distances.push(k.distance * scale);
        }

        let tol = length_tolerance(length);
        let last = distances.len() - 1;
        if distances[0].abs() > tol {
            return Err(ProfileConfigError::StartMismatch(distances[0]));
        }
        if (distances[last] - length).abs() > tol {
            return Err(ProfileConfigError::LengthMismatch {
                expected: length,
                actual: distances[last],
            });
        }
        distances[0] = 0.0;
        distances[last] = length;
        for d in &mut distances[1..last] {
            *d = d.clamp(0.0, length);
        }

        let smooth = config.interpolation == Interpolation::Smooth
            || points.iter().any(|k| k.slope.is_some());
        let slopes = if smooth {
            Some(hermite_slopes(points, &alphas, &distances, scale)?)
        } else {
            None
        };

        Ok(Self {
            alphas,
            distances,
            slopes,
        })
    }

    #[must_use]
    pub fn is_smooth(&self) -> bool {
        self.slopes.is_some()
    }

    /// Index of the keyframe interval containing `alpha`.
    fn interval(&self, alpha: f64) -> usize {
        self.alphas
            .partition_point(|&a| a <= alpha)
            .saturating_sub(1)
            .min(self.alphas.len() - 2)
    }

    /// Distance at `alpha`; flat before the first and after the last keyframe.
    #[must_use]
    pub fn evaluate(&self, alpha: f64) -> f64 {
        let last = self.alphas.len() - 1;
        if alpha.is_nan() || alpha <= self.alphas[0] {
            return self.distances[0];
        }
        if alpha >= self.alphas[last] {
            return self.distances[last];
        }
        let i = self.interval(alpha);
        let (a0, a1) = (self.alphas[i], self.alphas[i + 1]);
        let (d0, d1) = (self.distances[i], self.distances[i + 1]);
        let h = a1 - a0;
        let t = (alpha - a0) / h;
        let s = match &self.slopes {
            None => d0 + (d1 - d0) * t,
            Some(m) => {
                let t2 = t * t;
                let t3 = t2 * t;
                (2.0 * t3 - 3.0 * t2 + 1.0) * d0
                    + (t3 - 2.0 * t2 + t) * h * m[i]
                    + (-2.0 * t3 + 3.0 * t2) * d1
                    + (t3 - t2) * h * m[i + 1]
            }
        };
        s.clamp(d0, d1)
    }

    /// `ds/dα` at `alpha`; zero outside the keyframed range.
    #[must_use]
    pub fn speed(&self, alpha: f64) -> f64 {
        let last = self.alphas.len() - 1;
        if alpha.is_nan() || alpha < self.alphas[0] || alpha > self.alphas[last] {
            return 0.0;
        }
        let i = self.interval(alpha);
        let (a0, a1) = (self.alphas[i], self.alphas[i + 1]);
        let (d0, d1) = (self.distances[i], self.distances[i + 1]);
        let h = a1 - a0;
        match &self.slopes {
            None => (d1 - d0) / h,
            Some(m) => {
                let t = (alpha - a0) / h;
                let t2 = t * t;
                (6.0 * t2 - 6.0 * t) / h * d0
                    + (3.0 * t2 - 4.0 * t + 1.0) * m[i]
                    + (6.0 * t - 6.0 * t2) / h * d1
                    + (3.0 * t2 - 2.0 * t) * m[i + 1]
            }
        }
    }
}

/// Slopes for monotone cubic Hermite interpolation.
///
/// Missing interior slopes use the Fritsch-Butland weighted harmonic mean of
/// the neighbouring secants; missing end slopes use the end secant. Supplied
/// slopes must stay within `[0, 3]` times every adjacent secant.
fn hermite_slopes(
    points: &[Keyframe],
    alphas: &[f64],
    distances: &[f64],
    scale: f64,
) -> Result<Vec<f64>, ProfileConfigError> {
    let n = alphas.len();
    let h: Vec<f64> = alphas.windows(2).map(|w| w[1] - w[0]).collect();
    let secant: Vec<f64> = distances
        .windows(2)
        .zip(&h)
        .map(|(d, h)| (d[1] - d[0]) / h)
        .collect();

    let mut slopes = Vec::with_capacity(n);
    for (index, k) in points.iter().enumerate() {
        let left = index.checked_sub(1).map(|j| secant[j]);
        let right = secant.get(index).copied();
        let m = match k.slope {
            Some(raw) => {
                let m = raw * scale;
                let fits = |d: f64| {
                    if d <= 0.0 {
                        m.abs() <= f64::EPSILON * scale.max(1.0)
                    } else {
                        (0.0..=3.0 * d).contains(&m)
                    }
                };
                if !m.is_finite() || !left.is_none_or(fits) || !right.is_none_or(fits) {
                    return Err(ProfileConfigError::NonMonotonicTangent { index });
                }
                m
            }
            None => match (left, right) {
                (Some(d0), Some(d1)) if d0 > 0.0 && d1 > 0.0 => {
                    let (h0, h1) = (h[index - 1], h[index]);
                    3.0 * (h0 + h1) / ((2.0 * h1 + h0) / d0 + (h1 + 2.0 * h0) / d1)
                }
                (Some(_), Some(_)) => 0.0,
                (Some(d), None) | (None, Some(d)) => d,
                (None, None) => 0.0,
            },
        };
        slopes.push(m);
    }
    Ok(slopes)
}
