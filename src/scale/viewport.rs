use serde::Deserialize;

use crate::math::Point2;

/// Smallest span a viewport axis may have.
const MIN_SPAN: f64 = 1e-6;

/// How world ranges are stretched onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// One scale for both axes, chosen so both ranges fit.
    #[default]
    Fit,
    /// Independent scales per axis; fills the canvas exactly.
    Stretch,
}

/// Maps world coordinates onto a canvas centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Viewport {
    /// Fits world ranges into a `width` by `height` canvas.
    ///
    /// Spans narrower than a small positive minimum are widened to it.
    #[must_use]
    pub fn fit(x_range: (f64, f64), y_range: (f64, f64), width: f64, height: f64, mode: FitMode) -> Self {
        let x_span = (x_range.1 - x_range.0).max(MIN_SPAN);
        let y_span = (y_range.1 - y_range.0).max(MIN_SPAN);
        let (mut scale_x, mut scale_y) = (width / x_span, height / y_span);
        if mode == FitMode::Fit {
            let scale = scale_x.min(scale_y);
            scale_x = scale;
            scale_y = scale;
        }
        Self {
            width,
            height,
            x_range,
            y_range,
            scale_x,
            scale_y,
        }
    }

    /// Centre of the world ranges.
    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(
            0.5 * (self.x_range.0 + self.x_range.1),
            0.5 * (self.y_range.0 + self.y_range.1),
        )
    }

    /// World point to canvas point; the world centre lands on the canvas origin.
    #[must_use]
    pub fn to_scene(&self, p: &Point2) -> Point2 {
        let c = self.center();
        Point2::new((p.x - c.x) * self.scale_x, (p.y - c.y) * self.scale_y)
    }
}
