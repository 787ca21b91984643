//! Continuous tracks built from segments, addressed by global arc length.

pub mod arc_length;
pub mod store;

pub use arc_length::{ArcLengthTable, Resolved};
pub use store::{TrackId, TrackStore};

use std::sync::OnceLock;

use serde::Deserialize;
use tracing::debug;

use crate::error::{GeometryError, OutOfRangeWarning};
use crate::geometry::{Aabb, Segment};
use crate::math::{left_normal, Point2, Vector2, JOIN_TOLERANCE};
use crate::operations::query::BoundingBox;

/// Which side of the tangent the track normal points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalMode {
    /// Tangent rotated +90 degrees.
    #[default]
    Left,
    /// Tangent rotated -90 degrees.
    Right,
    /// Whichever of the two normals has a non-negative y component.
    Up,
    /// Whichever of the two normals has a non-positive y component.
    Down,
}

impl NormalMode {
    /// Picks the normal for a unit tangent.
    #[must_use]
    pub fn normal(self, tangent: &Vector2) -> Vector2 {
        let left = left_normal(tangent);
        match self {
            Self::Left => left,
            Self::Right => -left,
            Self::Up if left.y < 0.0 => -left,
            Self::Down if left.y > 0.0 => -left,
            Self::Up | Self::Down => left,
        }
    }
}

/// Everything known about the track at one arc length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSample {
    pub position: Point2,
    pub tangent: Vector2,
    pub normal: Vector2,
    /// Arc length after clamping.
    pub arc_length: f64,
    pub segment: usize,
    /// Local parameter within `segment`.
    pub parameter: f64,
    pub warning: Option<OutOfRangeWarning>,
}

/// An ordered, continuous sequence of segments.
///
/// The arc-length index is built on the first query and shared by every
/// reader afterwards.
#[derive(Debug, Clone)]
pub struct Track {
    segments: Vec<Segment>,
    normal_mode: NormalMode,
    join_tolerance: f64,
    index: OnceLock<ArcLengthTable>,
}

impl Track {
    /// Creates a track, checking that consecutive segments meet.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyTrack`] for no segments,
    /// [`GeometryError::NonFinite`] when a segment's length is not finite and
    /// [`GeometryError::Discontinuous`] when a gap exceeds the join tolerance.
    pub fn new(segments: Vec<Segment>) -> Result<Self, GeometryError> {
        Self::with_tolerance(segments, JOIN_TOLERANCE)
    }

    /// Like [`Track::new`] with an explicit join tolerance.
    ///
    /// # Errors
    ///
    /// See [`Track::new`]; also rejects a negative or non-finite tolerance.
    pub fn with_tolerance(segments: Vec<Segment>, join_tolerance: f64) -> Result<Self, GeometryError> {
        if !join_tolerance.is_finite() || join_tolerance < 0.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "join_tolerance",
                value: join_tolerance,
                min: 0.0,
                max: f64::INFINITY,
            });
        }
        check_continuity(&segments, join_tolerance)?;
        debug!(segments = segments.len(), "track built");
        Ok(Self {
            segments,
            normal_mode: NormalMode::default(),
            join_tolerance,
            index: OnceLock::new(),
        })
    }

    /// Sets the normal convention.
    #[must_use]
    pub fn with_normal_mode(mut self, mode: NormalMode) -> Self {
        self.normal_mode = mode;
        self
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn normal_mode(&self) -> NormalMode {
        self.normal_mode
    }

    /// Replaces every segment, revalidating continuity.
    ///
    /// On error the track is left unchanged.
    ///
    /// # Errors
    ///
    /// See [`Track::new`].
    pub fn replace_segments(&mut self, segments: Vec<Segment>) -> Result<(), GeometryError> {
        check_continuity(&segments, self.join_tolerance)?;
        self.segments = segments;
        self.index = OnceLock::new();
        Ok(())
    }

    /// The arc-length index, built on first use.
    #[must_use]
    pub fn index(&self) -> &ArcLengthTable {
        self.index.get_or_init(|| {
            let table = ArcLengthTable::build(&self.segments);
            debug!(length = table.total(), "arc-length index built");
            table
        })
    }

    /// Sum of all segment lengths.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.index().total()
    }

    /// Maps a global arc length to a segment and local parameter.
    ///
    /// Values outside `[0, total_length]` are clamped and reported.
    #[must_use]
    pub fn resolve(&self, s: f64) -> Resolved {
        self.index().resolve(&self.segments, s)
    }

    /// Position, tangent and normal at arc length `s`.
    #[must_use]
    pub fn sample_at(&self, s: f64) -> TrackSample {
        let r = self.resolve(s);
        let curve = self.segments[r.segment].curve();
        let tangent = curve.tangent_at(r.parameter);
        TrackSample {
            position: curve.point_at(r.parameter),
            tangent,
            normal: self.normal_mode.normal(&tangent),
            arc_length: r.arc_length,
            segment: r.segment,
            parameter: r.parameter,
            warning: r.warning,
        }
    }

    #[must_use]
    pub fn position_at(&self, s: f64) -> Point2 {
        let r = self.resolve(s);
        self.segments[r.segment].curve().point_at(r.parameter)
    }

    #[must_use]
    pub fn tangent_at(&self, s: f64) -> Vector2 {
        let r = self.resolve(s);
        self.segments[r.segment].curve().tangent_at(r.parameter)
    }

    /// Unit normal at `s` under the track's [`NormalMode`].
    #[must_use]
    pub fn normal_at(&self, s: f64) -> Vector2 {
        self.normal_mode.normal(&self.tangent_at(s))
    }

    /// Positions at `count` evenly spaced arc-length fractions, ends included.
    ///
    /// A single sample sits at the midpoint.
    #[must_use]
    pub fn sample_fractions(&self, count: usize) -> Vec<Point2> {
        let length = self.total_length();
        match count {
            0 => Vec::new(),
            1 => vec![self.position_at(0.5 * length)],
            _ => {
                #[allow(clippy::cast_precision_loss)]
                let last = (count - 1) as f64;
                (0..count)
                    .map(|i| {
                        #[allow(clippy::cast_precision_loss)]
                        let f = i as f64 / last;
                        self.position_at(f * length)
                    })
                    .collect()
            }
        }
    }

    /// Positions at explicit arc-length fractions, each clamped to `[0, 1]`.
    #[must_use]
    pub fn points_at_fractions(&self, fractions: &[f64]) -> Vec<Point2> {
        let length = self.total_length();
        fractions
            .iter()
            .map(|f| {
                let f = if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) };
                self.position_at(f * length)
            })
            .collect()
    }

    /// Axis-aligned bounds of the whole track.
    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        BoundingBox::new().execute(self)
    }
}

fn check_continuity(segments: &[Segment], tolerance: f64) -> Result<(), GeometryError> {
    if segments.is_empty() {
        return Err(GeometryError::EmptyTrack);
    }
    if segments.iter().any(|segment| !segment.length().is_finite()) {
        return Err(GeometryError::NonFinite("segment length"));
    }
    for (index, pair) in segments.windows(2).enumerate() {
        let gap = (pair[1].start_point() - pair[0].end_point()).norm();
        if gap > tolerance {
            return Err(GeometryError::Discontinuous { index, gap });
        }
    }
    Ok(())
}
