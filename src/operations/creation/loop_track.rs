use std::f64::consts::FRAC_PI_2;

use serde::Deserialize;

use crate::error::GeometryError;
use crate::geometry::{Circle, Polyline, Segment};
use crate::math::arc_2d::Winding;
use crate::math::{Point2, Vector2};
use crate::track::Track;

/// Builds a loop-the-loop: a straight run-up, one full counter-clockwise
/// turn starting and ending at the bottom of the loop, then a straight exit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoopTrack {
    pub center: Point2,
    pub radius: f64,
    pub entry_length: f64,
    /// Defaults to the entry length.
    pub exit_length: Option<f64>,
}

impl Default for LoopTrack {
    fn default() -> Self {
        Self {
            center: Point2::origin(),
            radius: 1.6,
            entry_length: 2.0,
            exit_length: None,
        }
    }
}

impl LoopTrack {
    /// Creates a new `LoopTrack` operation.
    #[must_use]
    pub fn new(center: Point2, radius: f64) -> Self {
        Self {
            center,
            radius,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_entry_length(mut self, length: f64) -> Self {
        self.entry_length = length;
        self
    }

    #[must_use]
    pub fn with_exit_length(mut self, length: f64) -> Self {
        self.exit_length = Some(length);
        self
    }

    /// Executes the operation.
    ///
    /// A zero entry or exit length leaves that straight out.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] for a degenerate radius or a negative or
    /// non-finite straight length.
    pub fn execute(&self) -> Result<Track, GeometryError> {
        let exit_length = self.exit_length.unwrap_or(self.entry_length);
        for (parameter, value) in [("entry_length", self.entry_length), ("exit_length", exit_length)] {
            if !value.is_finite() || value < 0.0 {
                return Err(GeometryError::ParameterOutOfRange {
                    parameter,
                    value,
                    min: 0.0,
                    max: f64::INFINITY,
                });
            }
        }

        let bottom = self.center - Vector2::new(0.0, self.radius);
        let mut segments: Vec<Segment> = Vec::with_capacity(3);
        if self.entry_length > 0.0 {
            let start = bottom - Vector2::new(self.entry_length, 0.0);
            segments.push(Polyline::line(start, bottom)?.into());
        }
        segments.push(Circle::new(self.center, self.radius, -FRAC_PI_2, 1.0, Winding::CounterClockwise)?.into());
        if exit_length > 0.0 {
            segments.push(Polyline::line(bottom, bottom + Vector2::new(exit_length, 0.0))?.into());
        }
        Track::new(segments)
    }
}
