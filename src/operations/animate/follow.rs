use serde::Deserialize;
use tracing::debug;

use crate::error::{BindError, Result};
use crate::math::{heading, unwrap_angle, Point2};
use crate::operations::query::ProjectPoint;
use crate::profile::{MotionProfile, ProfileConfig};
use crate::track::Track;

use super::frame_at::{uniform_alphas, Frame, FrameContext};

/// Where along a track a follow starts or ends.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathEndpoint {
    /// Fraction of the total length, clamped to `[0, 1]`.
    Fraction(f64),
    /// Absolute arc length, clamped to the track.
    ArcLength(f64),
    /// Wherever the body currently is, projected onto the track.
    Auto,
}

/// How a body follows a track.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FollowConfig {
    pub start: PathEndpoint,
    pub end: PathEndpoint,
    /// Swap `start` and `end`.
    pub reverse: bool,
    /// Added to the body heading when rotating.
    pub angle_offset_deg: f64,
    /// Distance to shift the body along the track normal.
    pub normal_offset: f64,
    /// Turn the body to face along the track.
    pub rotate: bool,
    pub profile: ProfileConfig,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            start: PathEndpoint::Fraction(0.0),
            end: PathEndpoint::Fraction(1.0),
            reverse: false,
            angle_offset_deg: 0.0,
            normal_offset: 0.0,
            rotate: true,
            profile: ProfileConfig::Constant,
        }
    }
}

/// Binds a body to a span of a track.
pub struct FollowPath {
    config: FollowConfig,
    body_position: Option<Point2>,
}

impl FollowPath {
    /// Creates a new `FollowPath` operation.
    #[must_use]
    pub fn new(config: FollowConfig) -> Self {
        Self {
            config,
            body_position: None,
        }
    }

    /// Supplies the body's current position, used by [`PathEndpoint::Auto`].
    #[must_use]
    pub fn with_body_position(mut self, position: Point2) -> Self {
        self.body_position = Some(position);
        self
    }

    /// Executes the operation.
    ///
    /// Endpoints are resolved to arc lengths and the profile is bound to the
    /// distance between them.
    ///
    /// # Errors
    ///
    /// Returns [`BindError`] for an `auto` endpoint without a body position
    /// or a non-finite endpoint, and a profile error if the profile cannot
    /// cover the span.
    pub fn execute<'a>(&self, track: &'a Track) -> Result<Follower<'a>> {
        let mut start = self.resolve(self.config.start, track)?;
        let mut end = self.resolve(self.config.end, track)?;
        if self.config.reverse {
            std::mem::swap(&mut start, &mut end);
        }
        let profile = MotionProfile::bind(&self.config.profile, (end - start).abs())?;
        debug!(start, end, law = profile.law(), "follower bound");
        Ok(Follower {
            track,
            start,
            end,
            profile,
            angle_offset: self.config.angle_offset_deg.to_radians(),
            normal_offset: self.config.normal_offset,
            rotate: self.config.rotate,
        })
    }

    fn resolve(&self, endpoint: PathEndpoint, track: &Track) -> Result<f64> {
        let s = match endpoint {
            PathEndpoint::Fraction(f) => {
                if !f.is_finite() {
                    return Err(BindError::InvalidEndpoint(f).into());
                }
                f.clamp(0.0, 1.0) * track.total_length()
            }
            PathEndpoint::ArcLength(s) => {
                if !s.is_finite() {
                    return Err(BindError::InvalidEndpoint(s).into());
                }
                track.index().clamp(s).0
            }
            PathEndpoint::Auto => {
                let body = self.body_position.ok_or(BindError::MissingBodyPosition)?;
                ProjectPoint::new(body).execute(track)?.arc_length
            }
        };
        Ok(s)
    }
}

/// A body bound to a span of a track under a motion profile.
#[derive(Debug, Clone)]
pub struct Follower<'a> {
    track: &'a Track,
    start: f64,
    end: f64,
    profile: MotionProfile,
    angle_offset: f64,
    normal_offset: f64,
    rotate: bool,
}

impl Follower<'_> {
    /// Arc length at which the body starts.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Arc length at which the body ends.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn profile(&self) -> &MotionProfile {
        &self.profile
    }

    /// Track arc length reached at `alpha`.
    #[must_use]
    pub fn arc_length_at(&self, alpha: f64) -> f64 {
        let travelled = self.profile.evaluate(alpha);
        if self.end >= self.start {
            self.start + travelled
        } else {
            self.start - travelled
        }
    }

    /// The body's frame at `alpha`.
    ///
    /// Tangent and normal are those of the track, whichever way the body
    /// travels. The position is shifted along the normal by the configured
    /// offset; without rotation the angle stays 0.
    #[must_use]
    pub fn frame(&self, alpha: f64, ctx: FrameContext) -> Frame {
        let sample = self.track.sample_at(self.arc_length_at(alpha));
        let rotation = if self.rotate {
            heading(&sample.tangent) + self.angle_offset
        } else {
            0.0
        };
        let mut frame = Frame::from_sample(&sample, rotation, alpha, ctx);
        frame.position += sample.normal * self.normal_offset;
        frame
    }

    /// Frames at `count` evenly spaced instants, first and last included.
    ///
    /// Rotation angles are unwrapped so consecutive frames never differ by
    /// a whole turn.
    #[must_use]
    pub fn frames(&self, count: usize, ctx: FrameContext) -> Vec<Frame> {
        let mut frames: Vec<Frame> = uniform_alphas(count).map(|a| self.frame(a, ctx)).collect();
        let mut previous: Option<f64> = None;
        for frame in &mut frames {
            if let Some(p) = previous {
                frame.rotation_angle = unwrap_angle(p, frame.rotation_angle);
            }
            previous = Some(frame.rotation_angle);
        }
        frames
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{ProfileConfigError, TracklineError};
    use crate::geometry::Polyline;
    use crate::math::Vector2;
    use crate::operations::creation::LoopTrack;
    use crate::profile::AccelConfig;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn straight(len: f64) -> Track {
        Track::new(vec![Polyline::line(Point2::origin(), Point2::new(len, 0.0))
            .unwrap()
            .into()])
        .unwrap()
    }

    #[test]
    fn default_follows_whole_track() {
        let track = straight(10.0);
        let f = FollowPath::new(FollowConfig::default()).execute(&track).unwrap();
        assert!(f.start().abs() < f64::EPSILON);
        assert_relative_eq!(f.end(), 10.0);
        let frame = f.frame(0.3, FrameContext::default());
        assert!((frame.position - Point2::new(3.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn reverse_runs_backwards_with_track_tangent() {
        let track = straight(10.0);
        let cfg = FollowConfig {
            start: PathEndpoint::Fraction(0.2),
            end: PathEndpoint::ArcLength(8.0),
            reverse: true,
            ..FollowConfig::default()
        };
        let f = FollowPath::new(cfg).execute(&track).unwrap();
        assert_relative_eq!(f.arc_length_at(0.0), 8.0);
        assert_relative_eq!(f.arc_length_at(1.0), 2.0);
        assert_relative_eq!(f.arc_length_at(0.5), 5.0);
        let frame = f.frame(0.5, FrameContext::default());
        assert!((frame.tangent - Vector2::x()).norm() < 1e-12);
    }

    #[test]
    fn auto_start_projects_body() {
        let track = straight(10.0);
        let cfg = FollowConfig {
            start: PathEndpoint::Auto,
            ..FollowConfig::default()
        };
        let f = FollowPath::new(cfg.clone())
            .with_body_position(Point2::new(4.0, 3.0))
            .execute(&track)
            .unwrap();
        assert_relative_eq!(f.start(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(f.profile().length(), 6.0, epsilon = 1e-12);

        let err = FollowPath::new(cfg).execute(&track).unwrap_err();
        assert!(matches!(err, TracklineError::Bind(BindError::MissingBodyPosition)));
    }

    #[test]
    fn offset_and_rotation() {
        let track = straight(10.0);
        let cfg = FollowConfig {
            angle_offset_deg: 90.0,
            normal_offset: 0.5,
            ..FollowConfig::default()
        };
        let f = FollowPath::new(cfg).execute(&track).unwrap();
        let frame = f.frame(0.5, FrameContext::default());
        assert!((frame.position - Point2::new(5.0, 0.5)).norm() < 1e-12);
        assert_relative_eq!(frame.rotation_angle, FRAC_PI_2, epsilon = 1e-12);

        let still = FollowConfig {
            rotate: false,
            angle_offset_deg: 90.0,
            ..FollowConfig::default()
        };
        let f = FollowPath::new(still).execute(&track).unwrap();
        assert!(f.frame(0.5, FrameContext::default()).rotation_angle.abs() < f64::EPSILON);
    }

    #[test]
    fn profile_is_checked_against_span() {
        let track = straight(10.0);
        let cfg = FollowConfig {
            end: PathEndpoint::Fraction(0.5),
            profile: ProfileConfig::ConstantAccel(AccelConfig {
                initial_speed: Some(2.0),
                acceleration: Some(4.0),
                speed_ratio: None,
            }),
            ..FollowConfig::default()
        };
        // 2 + 4/2 = 4, but the span is 5.
        let err = FollowPath::new(cfg).execute(&track).unwrap_err();
        assert!(matches!(
            err,
            TracklineError::ProfileConfig(ProfileConfigError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_endpoint() {
        let track = straight(1.0);
        let cfg = FollowConfig {
            end: PathEndpoint::ArcLength(f64::NAN),
            ..FollowConfig::default()
        };
        assert!(FollowPath::new(cfg).execute(&track).is_err());
    }

    #[test]
    fn frames_unwrap_rotation_around_a_loop() {
        let track = LoopTrack::default().execute().unwrap();
        let f = FollowPath::new(FollowConfig::default()).execute(&track).unwrap();
        let frames = f.frames(200, FrameContext::default());
        assert_eq!(frames.len(), 200);
        for pair in frames.windows(2) {
            assert!((pair[1].rotation_angle - pair[0].rotation_angle).abs() < 0.5);
        }
        // One full turn through the loop.
        let turned = frames[199].rotation_angle - frames[0].rotation_angle;
        assert_relative_eq!(turned, TAU, epsilon = 1e-9);
    }

    #[test]
    fn config_from_json() {
        let cfg: FollowConfig = serde_json::from_str(
            r#"{"start": "auto", "end": {"fraction": 0.75}, "rotate": false,
                "profile": {"law": "constant_decel"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.start, PathEndpoint::Auto);
        assert_eq!(cfg.end, PathEndpoint::Fraction(0.75));
        assert!(!cfg.rotate);
        assert_eq!(cfg.profile, ProfileConfig::ConstantDecel(AccelConfig::default()));
    }
}
