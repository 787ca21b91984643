//! Parsed track descriptions as they arrive from the plan layer.
//!
//! Angles are given in degrees, points as `[x, y]`.

use serde::Deserialize;

use crate::error::GeometryError;
use crate::math::arc_2d::Winding;
use crate::math::{Point2, JOIN_TOLERANCE};
use crate::track::NormalMode;

use super::curve::{Arc, Circle, Parametric, Polyline, Projectile, Segment};

const DEFAULT_ARC_SWEEP_DEG: f64 = 90.0;

/// Description of one track segment.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SegmentConfig {
    Line {
        start: Point2,
        end: Point2,
    },
    Polyline {
        points: Vec<Point2>,
    },
    /// Sweeps from `start_angle_deg` to `end_angle_deg`, or by `angle_deg`
    /// when no end is given (90 degrees when neither is). Without a
    /// `winding` the sweep is the signed difference of the two angles.
    Arc {
        center: Point2,
        radius: f64,
        #[serde(default)]
        start_angle_deg: f64,
        #[serde(default)]
        end_angle_deg: Option<f64>,
        #[serde(default)]
        angle_deg: Option<f64>,
        #[serde(default)]
        winding: Option<Winding>,
    },
    Circle {
        center: Point2,
        radius: f64,
        #[serde(default)]
        start_angle_deg: f64,
        #[serde(default = "one")]
        turns: f64,
        #[serde(default)]
        winding: Winding,
    },
    Projectile(ProjectileConfig),
    /// Built in code; closures have no serialized form.
    #[serde(skip)]
    Parametric(Parametric),
}

/// Launch description of a projectile segment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub origin: Point2,
    pub v0: f64,
    pub angle_deg: f64,
    pub g: f64,
    pub t_start: f64,
    pub t_end: f64,
    /// Overrides `t_start`/`t_end` when present.
    pub t_range: Option<[f64; 2]>,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            origin: Point2::origin(),
            v0: 4.0,
            angle_deg: 45.0,
            g: 9.8,
            t_start: 0.0,
            t_end: 2.0,
            t_range: None,
        }
    }
}

/// Description of a whole track.
///
/// A non-empty `points` list describes a single polyline and takes
/// precedence over `segments`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    pub points: Vec<Point2>,
    pub segments: Vec<SegmentConfig>,
    pub normal_mode: NormalMode,
    /// Largest gap allowed between consecutive segment endpoints.
    pub join_tolerance: f64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            segments: Vec::new(),
            normal_mode: NormalMode::default(),
            join_tolerance: JOIN_TOLERANCE,
        }
    }
}

fn one() -> f64 {
    1.0
}

impl SegmentConfig {
    /// Validates the description and builds the segment.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] for malformed parameters.
    pub fn build(&self) -> Result<Segment, GeometryError> {
        match self {
            Self::Line { start, end } => Ok(Polyline::line(*start, *end)?.into()),
            Self::Polyline { points } => Ok(Polyline::new(points.clone())?.into()),
            Self::Arc {
                center,
                radius,
                start_angle_deg,
                end_angle_deg,
                angle_deg,
                winding,
            } => {
                let end_deg = end_angle_deg
                    .unwrap_or_else(|| start_angle_deg + angle_deg.unwrap_or(DEFAULT_ARC_SWEEP_DEG));
                let start = start_angle_deg.to_radians();
                let end = end_deg.to_radians();
                let arc = match winding {
                    Some(w) => Arc::new(*center, *radius, start, end, *w)?,
                    None => Arc::from_sweep(*center, *radius, start, end - start)?,
                };
                Ok(arc.into())
            }
            Self::Circle {
                center,
                radius,
                start_angle_deg,
                turns,
                winding,
            } => Ok(Circle::new(*center, *radius, start_angle_deg.to_radians(), *turns, *winding)?.into()),
            Self::Projectile(p) => {
                let (t_start, t_end) = p.t_range.map_or((p.t_start, p.t_end), |[a, b]| (a, b));
                Ok(Projectile::new(p.origin, p.v0, p.angle_deg.to_radians(), p.g, t_start, t_end)?
                    .into())
            }
            Self::Parametric(p) => Ok(p.clone().into()),
        }
    }
}

impl From<Parametric> for SegmentConfig {
    fn from(value: Parametric) -> Self {
        Self::Parametric(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn parse(json: &str) -> SegmentConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn line_from_json() {
        let seg = parse(r#"{"type": "line", "start": [0, 0], "end": [3, 4]}"#).build().unwrap();
        assert_relative_eq!(seg.length(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn arc_defaults_to_quarter_turn() {
        let seg = parse(r#"{"type": "arc", "center": [0, 0], "radius": 2.0}"#).build().unwrap();
        assert_relative_eq!(seg.length(), 2.0 * FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn arc_end_angle_wins_over_sweep() {
        let seg = parse(
            r#"{"type": "arc", "center": [0, 0], "radius": 1.0,
                "start_angle_deg": 0, "end_angle_deg": -90, "angle_deg": 45}"#,
        )
        .build()
        .unwrap();
        assert_relative_eq!(seg.length(), FRAC_PI_2, epsilon = 1e-12);
        // Signed difference, so this one runs clockwise.
        let t = seg.sample(0.0).unwrap().tangent;
        assert!(t.y < -0.99);
    }

    #[test]
    fn arc_with_winding_takes_requested_direction() {
        let seg = parse(
            r#"{"type": "arc", "center": [0, 0], "radius": 1.0,
                "start_angle_deg": 0, "end_angle_deg": -90, "winding": "counter_clockwise"}"#,
        )
        .build()
        .unwrap();
        assert_relative_eq!(seg.length(), 3.0 * FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn circle_turns_default_to_one() {
        let seg = parse(r#"{"type": "circle", "center": [1, 1], "radius": 1.0}"#).build().unwrap();
        assert_relative_eq!(seg.length(), 2.0 * PI, epsilon = 1e-12);
    }

    #[test]
    fn projectile_defaults() {
        let seg = parse(r#"{"type": "projectile"}"#).build().unwrap();
        assert_eq!(seg.kind(), "projectile");
        let end = seg.end_point();
        // x = v0 cos(45°) * 2
        assert_relative_eq!(end.x, 8.0 * (PI / 4.0).cos(), epsilon = 1e-9);
    }

    #[test]
    fn projectile_t_range_overrides() {
        let seg = parse(r#"{"type": "projectile", "v0": 2, "angle_deg": 0, "g": 0, "t_range": [1, 3]}"#)
            .build()
            .unwrap();
        assert_relative_eq!(seg.start_point().x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(seg.length(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn track_config_defaults() {
        let cfg: TrackConfig = serde_json::from_str(r#"{"points": [[0, 0], [1, 0]]}"#).unwrap();
        assert_eq!(cfg.normal_mode, NormalMode::Left);
        assert_relative_eq!(cfg.join_tolerance, JOIN_TOLERANCE);
        assert!(cfg.segments.is_empty());
    }

    #[test]
    fn malformed_segment_is_geometry_error() {
        let err = parse(r#"{"type": "circle", "center": [0, 0], "radius": 0}"#)
            .build()
            .unwrap_err();
        assert!(matches!(err, GeometryError::Degenerate(_)));
    }
}
