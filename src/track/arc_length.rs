use tracing::{trace, warn};

use crate::error::OutOfRangeWarning;
use crate::geometry::Segment;

/// Cumulative arc length at every segment boundary.
///
/// Entry `i` is the distance from the track start to the start of segment
/// `i`; the final entry is the total length.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    cumulative: Vec<f64>,
}

/// A global arc length mapped onto one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    /// Index of the segment containing the arc length.
    pub segment: usize,
    /// Local parameter within that segment.
    pub parameter: f64,
    /// The arc length actually used, after clamping.
    pub arc_length: f64,
    /// Present when the requested arc length was outside the track.
    pub warning: Option<OutOfRangeWarning>,
}

impl ArcLengthTable {
    /// Tabulates boundary distances for the given segments.
    #[must_use]
    pub fn build(segments: &[Segment]) -> Self {
        let mut cumulative = Vec::with_capacity(segments.len() + 1);
        let mut total = 0.0;
        cumulative.push(total);
        for segment in segments {
            total += segment.length();
            cumulative.push(total);
        }
        Self { cumulative }
    }

    /// Total length of the track.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Arc length at which segment `index` starts.
    #[must_use]
    pub fn segment_start(&self, index: usize) -> f64 {
        self.cumulative[index.min(self.cumulative.len() - 1)]
    }

    /// All boundary distances, starting with 0.
    #[must_use]
    pub fn boundaries(&self) -> &[f64] {
        &self.cumulative
    }

    /// Clamps `s` into `[0, total]`.
    ///
    /// NaN is treated as 0. Clamps smaller than float noise are traced and
    /// not reported; anything larger is logged and returned as a warning.
    #[must_use]
    pub fn clamp(&self, s: f64) -> (f64, Option<OutOfRangeWarning>) {
        let length = self.total();
        if s.is_nan() {
            let w = OutOfRangeWarning {
                requested: s,
                clamped: 0.0,
                length,
            };
            warn!(warning = %w, "arc length query clamped");
            return (0.0, Some(w));
        }
        if (0.0..=length).contains(&s) {
            return (s, None);
        }
        let clamped = s.clamp(0.0, length);
        let noise = 1e-9 * length.max(1.0);
        if (s - clamped).abs() <= noise {
            trace!(requested = s, clamped, "arc length clamped within float noise");
            return (clamped, None);
        }
        let w = OutOfRangeWarning {
            requested: s,
            clamped,
            length,
        };
        warn!(warning = %w, "arc length query clamped");
        (clamped, Some(w))
    }

    /// Finds the segment containing `s` and the distance into it.
    ///
    /// `s` must already be clamped. A distance exactly on a boundary belongs
    /// to the segment that starts there, except at the very end.
    #[must_use]
    pub fn locate(&self, s: f64) -> (usize, f64) {
        let count = self.cumulative.len() - 1;
        let index = self.cumulative[..count]
            .partition_point(|&c| c <= s)
            .saturating_sub(1)
            .min(count.saturating_sub(1));
        (index, s - self.cumulative[index])
    }

    /// Resolves a global arc length to a segment and local parameter.
    #[must_use]
    pub fn resolve(&self, segments: &[Segment], s: f64) -> Resolved {
        let (arc_length, warning) = self.clamp(s);
        let (segment, local) = self.locate(arc_length);
        let parameter = segments[segment].curve().parameter_at_length(local);
        Resolved {
            segment,
            parameter,
            arc_length,
            warning,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polyline;
    use crate::math::Point2;

    fn three_lines() -> Vec<Segment> {
        vec![
            Polyline::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)).unwrap().into(),
            Polyline::line(Point2::new(1.0, 0.0), Point2::new(1.0, 2.0)).unwrap().into(),
            Polyline::line(Point2::new(1.0, 2.0), Point2::new(4.0, 2.0)).unwrap().into(),
        ]
    }

    #[test]
    fn boundaries_accumulate() {
        let table = ArcLengthTable::build(&three_lines());
        assert_eq!(table.boundaries(), &[0.0, 1.0, 3.0, 6.0]);
        assert!((table.total() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn boundary_belongs_to_next_segment() {
        let table = ArcLengthTable::build(&three_lines());
        assert_eq!(table.locate(1.0), (1, 0.0));
        assert_eq!(table.locate(0.0), (0, 0.0));
        let (i, d) = table.locate(6.0);
        assert_eq!(i, 2);
        assert!((d - 3.0).abs() < 1e-12);
    }

    #[test]
    fn resolve_maps_to_local_parameter() {
        let segments = three_lines();
        let table = ArcLengthTable::build(&segments);
        let r = table.resolve(&segments, 2.0);
        assert_eq!(r.segment, 1);
        assert!((r.parameter - 0.5).abs() < 1e-12);
        assert!(r.warning.is_none());
    }

    #[test]
    fn out_of_range_is_clamped_and_reported() {
        let segments = three_lines();
        let table = ArcLengthTable::build(&segments);
        let r = table.resolve(&segments, 7.5);
        assert_eq!(r.segment, 2);
        assert!((r.parameter - 1.0).abs() < 1e-12);
        let w = r.warning.unwrap();
        assert!((w.requested - 7.5).abs() < 1e-12);
        assert!((w.clamped - 6.0).abs() < 1e-12);

        let r = table.resolve(&segments, -1.0);
        assert_eq!(r.segment, 0);
        assert!(r.parameter.abs() < 1e-12);
        assert!(r.warning.is_some());
    }

    #[test]
    fn float_noise_is_not_reported() {
        let table = ArcLengthTable::build(&three_lines());
        let (s, w) = table.clamp(6.0 + 1e-13);
        assert!((s - 6.0).abs() < 1e-15);
        assert!(w.is_none());
    }

    #[test]
    fn nan_resolves_to_start() {
        let table = ArcLengthTable::build(&three_lines());
        let (s, w) = table.clamp(f64::NAN);
        assert!(s.abs() < 1e-15);
        assert!(w.is_some());
    }
}
