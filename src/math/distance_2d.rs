use super::{Point2, TOLERANCE};

/// Projects `p` onto the segment `a -> b`.
///
/// Returns the clamped parameter in `[0, 1]` and the closest point.
/// A zero-length segment projects everything onto `a`.
#[must_use]
pub fn project_onto_segment(p: &Point2, a: &Point2, b: &Point2) -> (f64, Point2) {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < TOLERANCE * TOLERANCE {
        return (0.0, *a);
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    (t, a + d * t)
}

/// Returns the minimum distance from `p` to the segment `a -> b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let (_, closest) = project_onto_segment(p, a, b);
    (p - closest).norm()
}
