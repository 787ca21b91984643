//! Choosing a round diagram unit so a scene fits its canvas.

pub mod extents;
pub mod viewport;

pub use extents::Extents;
pub use viewport::{FitMode, Viewport};

use serde::Deserialize;
use tracing::warn;

use crate::error::DegenerateScaleWarning;
use crate::math::Point2;

const STEPS: [f64; 4] = [1.0, 2.0, 5.0, 10.0];

/// Rounds a positive raw scale up to the nearest `q * 10^n`, `q` in {1, 2, 5}.
///
/// The result lies in `[raw, 10 * raw]`; a raw value that is already round up
/// to float rounding comes back unchanged. Callers must pass a positive,
/// finite value. Values within a step of `f64::MAX` round up to infinity.
#[must_use]
pub fn quantize_unit(raw: f64) -> f64 {
    #[allow(clippy::cast_possible_truncation)]
    let exponent = raw.log10().floor() as i32;
    let mut magnitude = 10f64.powi(exponent);
    // log10 can land one decade off near exact powers of ten.
    if raw / magnitude >= 10.0 {
        magnitude *= 10.0;
    } else if raw / magnitude < 1.0 {
        magnitude /= 10.0;
    }
    for q in STEPS {
        let unit = q * magnitude;
        if unit >= raw {
            return unit;
        }
        if raw - unit <= 4.0 * f64::EPSILON * raw {
            return raw;
        }
    }
    10.0 * magnitude
}

/// Size of the drawing area, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Options for scale selection.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Round the unit to a 1-2-5 step; otherwise the raw scale is used.
    pub quantize: bool,
    /// Factor applied to the raw scale before rounding, leaving room around
    /// the scene when above 1.
    pub margin: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            quantize: true,
            margin: 1.0,
        }
    }
}

impl ScaleConfig {
    pub(crate) fn effective_margin(&self) -> f64 {
        if self.margin.is_finite() && self.margin > 0.0 {
            self.margin
        } else {
            warn!(margin = self.margin, "invalid scale margin, using 1");
            1.0
        }
    }
}

/// The chosen unit: physical length per canvas unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSpec {
    pub unit: f64,
    /// Scale before rounding.
    pub raw: f64,
    /// Set when `raw` was unusable and `unit` fell back to 1.
    pub warning: Option<DegenerateScaleWarning>,
}

impl ScaleSpec {
    /// Picks the unit for a raw scale, falling back to 1 when `raw` is not
    /// positive and finite or rounding it overflows.
    #[must_use]
    pub fn from_raw(raw: f64, quantize: bool) -> Self {
        let unit = if !raw.is_finite() || raw <= 0.0 {
            f64::NAN
        } else if quantize {
            quantize_unit(raw)
        } else {
            raw
        };
        if !unit.is_finite() {
            let w = DegenerateScaleWarning { raw };
            warn!(warning = %w, "scale selection");
            return Self {
                unit: 1.0,
                raw,
                warning: Some(w),
            };
        }
        Self {
            unit,
            raw,
            warning: None,
        }
    }

    /// Converts a physical length to canvas units.
    #[must_use]
    pub fn to_canvas(&self, length: f64) -> f64 {
        length / self.unit
    }

    /// Scales a point toward `origin` into canvas units.
    #[must_use]
    pub fn scale_point(&self, p: &Point2, origin: &Point2) -> Point2 {
        origin + (p - origin) / self.unit
    }
}
