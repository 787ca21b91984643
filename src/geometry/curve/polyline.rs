use crate::error::GeometryError;
use crate::math::distance_2d::project_onto_segment;
use crate::math::{is_finite_point, Point2, Vector2, JOIN_TOLERANCE};

use super::Curve;

/// Straight pieces through an ordered list of vertices.
///
/// The local parameter is proportional to arc length along the whole
/// polyline, so `u = 0.5` is halfway along regardless of vertex spacing.
#[derive(Debug, Clone)]
pub struct Polyline {
    points: Vec<Point2>,
    cumulative: Vec<f64>,
}

impl Polyline {
    /// Creates a polyline, dropping consecutive duplicate vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if any vertex is non-finite or fewer than two
    /// distinct vertices remain.
    pub fn new(points: Vec<Point2>) -> Result<Self, GeometryError> {
        if !points.iter().all(is_finite_point) {
            return Err(GeometryError::NonFinite("polyline vertex"));
        }

        let mut cleaned: Vec<Point2> = Vec::with_capacity(points.len());
        for p in points {
            if cleaned
                .last()
                .is_none_or(|last| (p - last).norm() > JOIN_TOLERANCE)
            {
                cleaned.push(p);
            }
        }
        if cleaned.len() < 2 {
            return Err(GeometryError::Degenerate(
                "polyline needs at least two distinct points".into(),
            ));
        }

        let mut cumulative = Vec::with_capacity(cleaned.len());
        let mut total = 0.0;
        cumulative.push(total);
        for pair in cleaned.windows(2) {
            total += (pair[1] - pair[0]).norm();
            cumulative.push(total);
        }

        Ok(Self {
            points: cleaned,
            cumulative,
        })
    }

    /// Creates a single straight segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoints coincide or are non-finite.
    pub fn line(start: Point2, end: Point2) -> Result<Self, GeometryError> {
        Self::new(vec![start, end])
    }

    /// Returns the vertices.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Index of the piece containing arc length `d`.
    ///
    /// A distance exactly on an interior vertex belongs to the piece that starts there.
    fn piece_at(&self, d: f64) -> usize {
        let pieces = self.points.len() - 1;
        self.cumulative
            .partition_point(|&c| c <= d)
            .saturating_sub(1)
            .min(pieces - 1)
    }

    fn direction(&self, piece: usize) -> Vector2 {
        let d = self.points[piece + 1] - self.points[piece];
        d / d.norm()
    }
}

impl Curve for Polyline {
    fn point_at(&self, u: f64) -> Point2 {
        let d = u.clamp(0.0, 1.0) * self.total();
        let i = self.piece_at(d);
        let piece_len = self.cumulative[i + 1] - self.cumulative[i];
        let t = ((d - self.cumulative[i]) / piece_len).clamp(0.0, 1.0);
        self.points[i] + (self.points[i + 1] - self.points[i]) * t
    }

    fn tangent_at(&self, u: f64) -> Vector2 {
        let d = u.clamp(0.0, 1.0) * self.total();
        self.direction(self.piece_at(d))
    }

    fn length(&self) -> f64 {
        self.total()
    }

    fn closest_parameter(&self, point: &Point2) -> f64 {
        let mut best_dist = f64::INFINITY;
        let mut best_d = 0.0;
        for (i, pair) in self.points.windows(2).enumerate() {
            let (t, q) = project_onto_segment(point, &pair[0], &pair[1]);
            let dist = (point - q).norm();
            if dist < best_dist {
                best_dist = dist;
                best_d = self.cumulative[i] + t * (self.cumulative[i + 1] - self.cumulative[i]);
            }
        }
        self.parameter_at_length(best_d)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn l_shape() -> Polyline {
        Polyline::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 4.0),
        ])
        .unwrap()
    }

    #[test]
    fn line_length_3_4_5() {
        let line = Polyline::line(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0)).unwrap();
        assert!((line.length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn parameter_is_proportional_to_length() {
        let p = l_shape();
        assert!((p.length() - 7.0).abs() < 1e-12);
        // 3/7 of the way is the corner.
        let corner = p.point_at(3.0 / 7.0);
        assert!((corner - Point2::new(3.0, 0.0)).norm() < 1e-12);
        let q = p.point_at(5.0 / 7.0);
        assert!((q - Point2::new(3.0, 2.0)).norm() < 1e-12);
    }

    #[test]
    fn tangent_switches_at_corner() {
        let p = l_shape();
        assert!((p.tangent_at(0.1) - Vector2::x()).norm() < 1e-12);
        assert!((p.tangent_at(3.0 / 7.0) - Vector2::y()).norm() < 1e-12);
        assert!((p.tangent_at(1.0) - Vector2::y()).norm() < 1e-12);
    }

    #[test]
    fn duplicates_are_dropped() {
        let p = Polyline::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0 + 1e-9, 0.0),
        ])
        .unwrap();
        assert_eq!(p.points().len(), 2);
    }

    #[test]
    fn rejects_single_point() {
        let err = Polyline::new(vec![Point2::new(1.0, 1.0), Point2::new(1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, GeometryError::Degenerate(_)));
    }

    #[test]
    fn rejects_nan() {
        let err = Polyline::line(Point2::new(f64::NAN, 0.0), Point2::new(1.0, 0.0)).unwrap_err();
        assert_eq!(err, GeometryError::NonFinite("polyline vertex"));
    }

    #[test]
    fn closest_parameter_on_second_piece() {
        let p = l_shape();
        let u = p.closest_parameter(&Point2::new(5.0, 2.0));
        assert!((u - 5.0 / 7.0).abs() < 1e-12);
    }
}
