//! 2D arc math utilities.
//!
//! Arcs are described by a start angle and a signed sweep:
//! - `sweep > 0`: counter-clockwise
//! - `sweep < 0`: clockwise
//! - `|sweep| > 2*pi`: more than one revolution (circles only)
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::{Point2, Vector2, TOLERANCE};

/// Direction of travel around a center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winding {
    #[default]
    CounterClockwise,
    Clockwise,
}

impl Winding {
    /// `+1` for counter-clockwise, `-1` for clockwise.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::CounterClockwise => 1.0,
            Self::Clockwise => -1.0,
        }
    }

    /// Winding implied by the sign of a sweep.
    #[must_use]
    pub fn of_sweep(sweep: f64) -> Self {
        if sweep < 0.0 {
            Self::Clockwise
        } else {
            Self::CounterClockwise
        }
    }
}

/// Signed sweep from `start_angle` to `end_angle` travelling in `winding`.
///
/// The magnitude lies in `[0, 2*pi)`; coincident angles give zero.
#[must_use]
pub fn sweep_between(start_angle: f64, end_angle: f64, winding: Winding) -> f64 {
    let sign = winding.sign();
    let magnitude = (sign * (end_angle - start_angle)).rem_euclid(TAU);
    if TAU - magnitude < TOLERANCE {
        return 0.0;
    }
    sign * magnitude
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(center: &Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let angle = start_angle + sweep * t;
    Point2::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Computes the unit tangent direction on an arc at parameter `t` in `[0, 1]`.
///
/// The tangent points in the direction of increasing `t`.
#[must_use]
pub fn arc_tangent_at(start_angle: f64, sweep: f64, t: f64) -> Vector2 {
    let angle = start_angle + sweep * t;
    let sign = if sweep >= 0.0 { 1.0 } else { -1.0 };
    // Tangent to circle at angle θ is (-sin θ, cos θ) for CCW; negate for CW.
    Vector2::new(-sign * angle.sin(), sign * angle.cos())
}

/// Parameter in `[0, 1]` of the arc point nearest to a direction `angle`
/// seen from the center.
///
/// Angles outside the swept span snap to the angularly nearer endpoint.
/// For sweeps longer than one turn the first matching revolution wins.
#[must_use]
pub fn sweep_parameter(angle: f64, start_angle: f64, sweep: f64) -> f64 {
    let span = sweep.abs();
    if span < TOLERANCE {
        return 0.0;
    }
    let sign = if sweep >= 0.0 { 1.0 } else { -1.0 };
    let delta = (sign * (angle - start_angle)).rem_euclid(TAU);
    if delta <= span {
        return delta / span;
    }
    let past_end = delta - span;
    let before_start = TAU - delta;
    if before_start < past_end {
        0.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn sweep_between_ccw_wraps_forward() {
        let s = sweep_between(3.0 * FRAC_PI_2, 0.0, Winding::CounterClockwise);
        assert!((s - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn sweep_between_cw_is_negative() {
        let s = sweep_between(0.0, -FRAC_PI_2, Winding::Clockwise);
        assert!((s + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn sweep_between_coincident_is_zero() {
        assert!(sweep_between(1.0, 1.0 + TAU, Winding::CounterClockwise).abs() < 1e-12);
    }

    #[test]
    fn tangent_follows_winding() {
        let ccw = arc_tangent_at(0.0, FRAC_PI_2, 0.0);
        assert!((ccw - Vector2::y()).norm() < 1e-12);
        let cw = arc_tangent_at(0.0, -FRAC_PI_2, 0.0);
        assert!((cw + Vector2::y()).norm() < 1e-12);
    }

    #[test]
    fn sweep_parameter_inside_span() {
        let t = sweep_parameter(FRAC_PI_2 / 2.0, 0.0, FRAC_PI_2);
        assert!((t - 0.5).abs() < 1e-12);
    }

    #[test]
    fn sweep_parameter_snaps_to_nearer_endpoint() {
        // Span is [0, pi/2]; -0.1 is just before the start.
        assert!(sweep_parameter(-0.1, 0.0, FRAC_PI_2).abs() < 1e-12);
        // pi/2 + 0.1 is just past the end.
        assert!((sweep_parameter(FRAC_PI_2 + 0.1, 0.0, FRAC_PI_2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn sweep_parameter_clockwise() {
        let t = sweep_parameter(-PI / 4.0, 0.0, -FRAC_PI_2);
        assert!((t - 0.5).abs() < 1e-12);
    }

    #[test]
    fn sweep_parameter_multi_turn_uses_first_revolution() {
        let t = sweep_parameter(PI, 0.0, 2.0 * TAU);
        assert!((t - 0.25).abs() < 1e-12);
    }
}
