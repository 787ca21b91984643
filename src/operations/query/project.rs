use crate::error::GeometryError;
use crate::math::{is_finite_point, Point2, TOLERANCE};
use crate::track::Track;

/// Result of projecting a point onto a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Global arc length of the closest point.
    pub arc_length: f64,
    /// Distance from the query point to the closest point.
    pub distance: f64,
    /// The closest point on the track.
    pub point: Point2,
    /// Index of the segment holding the closest point.
    pub segment: usize,
    /// Local parameter within that segment.
    pub parameter: f64,
}

/// Finds the arc-length coordinate of the track point nearest to a point.
pub struct ProjectPoint {
    point: Point2,
}

impl ProjectPoint {
    /// Creates a new `ProjectPoint` query.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self { point }
    }

    /// Executes the query.
    ///
    /// Each segment reports its own closest parameter: analytically for
    /// straight pieces and circular arcs, by sampling and golden-section
    /// refinement otherwise. The nearest across segments wins; on a tie the
    /// earlier segment is kept.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonFinite`] if the query point is not finite.
    pub fn execute(&self, track: &Track) -> Result<Projection, GeometryError> {
        if !is_finite_point(&self.point) {
            return Err(GeometryError::NonFinite("projection point"));
        }
        let index = track.index();
        let mut best: Option<Projection> = None;
        for (i, segment) in track.segments().iter().enumerate() {
            let curve = segment.curve();
            let u = curve.closest_parameter(&self.point);
            let point = curve.point_at(u);
            let distance = (self.point - point).norm();
            if best.is_some_and(|b| distance >= b.distance - TOLERANCE) {
                continue;
            }
            best = Some(Projection {
                arc_length: (index.segment_start(i) + curve.length_at_parameter(u)).min(index.total()),
                distance,
                point,
                segment: i,
                parameter: u,
            });
        }
        // A track always has at least one segment.
        best.ok_or(GeometryError::EmptyTrack)
    }
}
