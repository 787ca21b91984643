//! Fixed-cost numeric helpers for curves without closed forms.

use super::{Point2, Vector2};

/// Default subdivision count for numeric arc length.
pub const DEFAULT_SUBDIVISIONS: u32 = 128;

/// Lowest subdivision count accepted for numeric arc length.
pub const MIN_SUBDIVISIONS: u32 = 64;

/// Step used for central differences in parameter space.
pub const DIFF_STEP: f64 = 1e-6;

const INV_GOLDEN: f64 = 0.618_033_988_749_894_9;

/// Cumulative arc length at `subdivisions + 1` evenly spaced parameters in `[0, 1]`.
///
/// Each sub-interval is integrated with Simpson's rule on `speed`.
/// The first entry is always `0.0`.
#[must_use]
pub fn cumulative_simpson(speed: impl Fn(f64) -> f64, subdivisions: u32) -> Vec<f64> {
    let n = subdivisions.max(1);
    let h = 1.0 / f64::from(n);
    let mut cumulative = Vec::with_capacity(n as usize + 1);
    cumulative.push(0.0);

    let mut total = 0.0;
    let mut left = speed(0.0);
    for i in 0..n {
        let a = f64::from(i) * h;
        let b = if i + 1 == n { 1.0 } else { a + h };
        let mid = speed(0.5 * (a + b));
        let right = speed(b);
        total += (b - a) / 6.0 * (left + 4.0 * mid + right);
        cumulative.push(total);
        left = right;
    }
    cumulative
}

/// Minimizes a unimodal `f` on `[lo, hi]` by golden-section search.
///
/// Runs a fixed number of iterations and returns the midpoint of the
/// final bracket.
#[must_use]
pub fn golden_section_min(f: impl Fn(f64) -> f64, lo: f64, hi: f64, iterations: u32) -> f64 {
    let (mut a, mut b) = (lo, hi);
    let mut c = b - INV_GOLDEN * (b - a);
    let mut d = a + INV_GOLDEN * (b - a);
    let mut fc = f(c);
    let mut fd = f(d);

    for _ in 0..iterations {
        if fc <= fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_GOLDEN * (b - a);
            fc = f(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_GOLDEN * (b - a);
            fd = f(d);
        }
    }

    0.5 * (a + b)
}

/// Derivative of `f` at `u` by central difference, one-sided at the ends of `[0, 1]`.
#[must_use]
pub fn central_difference(f: impl Fn(f64) -> Point2, u: f64) -> Vector2 {
    let lo = (u - DIFF_STEP).max(0.0);
    let hi = (u + DIFF_STEP).min(1.0);
    let span = hi - lo;
    if span <= 0.0 {
        return Vector2::zeros();
    }
    (f(hi) - f(lo)) / span
}

/// Parameter in `[0, 1]` of the point of `f` closest to `target`.
///
/// Samples `samples + 1` evenly spaced parameters, keeps the first minimum,
/// then refines within the neighbouring sample interval.
#[must_use]
pub fn closest_parameter_sampled(f: impl Fn(f64) -> Point2, target: &Point2, samples: u32) -> f64 {
    let n = samples.max(2);
    let step = 1.0 / f64::from(n);
    let distance = |u: f64| (f(u) - target).norm();

    let mut best_u = 0.0;
    let mut best_dist = f64::INFINITY;
    for i in 0..=n {
        let u = f64::from(i) * step;
        let d = distance(u);
        if d < best_dist {
            best_dist = d;
            best_u = u;
        }
    }

    let lo = (best_u - step).max(0.0);
    let hi = (best_u + step).min(1.0);
    let refined = golden_section_min(&distance, lo, hi, 60);
    if distance(refined) < best_dist {
        refined
    } else {
        best_u
    }
}
