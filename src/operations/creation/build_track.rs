use tracing::{debug, warn};

use crate::error::GeometryError;
use crate::geometry::{Polyline, Segment, SegmentConfig, TrackConfig};
use crate::track::Track;

/// Builds a validated track from its description.
pub struct BuildTrack {
    config: TrackConfig,
}

impl BuildTrack {
    /// Creates a new `BuildTrack` operation.
    #[must_use]
    pub fn new(config: TrackConfig) -> Self {
        Self { config }
    }

    /// Executes the operation.
    ///
    /// A non-empty `points` list becomes a single polyline and any
    /// `segments` are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if a segment is malformed, consecutive
    /// segments do not meet, or there is nothing to build.
    pub fn execute(&self) -> Result<Track, GeometryError> {
        let config = &self.config;
        let segments: Vec<Segment> = if config.points.is_empty() {
            config
                .segments
                .iter()
                .enumerate()
                .map(|(index, s)| {
                    s.build()
                        .inspect_err(|e| debug!(index, error = %e, "segment rejected"))
                })
                .collect::<Result<_, _>>()?
        } else {
            if !config.segments.is_empty() {
                warn!(
                    ignored = config.segments.len(),
                    "track has both points and segments; using points"
                );
            }
            vec![Polyline::new(config.points.clone())?.into()]
        };
        Ok(Track::with_tolerance(segments, config.join_tolerance)?.with_normal_mode(config.normal_mode))
    }
}

impl From<Vec<SegmentConfig>> for BuildTrack {
    fn from(segments: Vec<SegmentConfig>) -> Self {
        Self::new(TrackConfig {
            segments,
            ..TrackConfig::default()
        })
    }
}
