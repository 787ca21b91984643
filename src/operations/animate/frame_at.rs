use tracing::debug;

use crate::error::{OutOfRangeWarning, ProfileConfigError};
use crate::math::{heading, Point2, Vector2};
use crate::profile::MotionProfile;
use crate::track::{Track, TrackSample};

/// Per-call evaluation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameContext {
    /// Attach [`FrameDebug`] details to each frame and log them.
    pub debug: bool,
}

/// Where a body is and how it is oriented at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub position: Point2,
    pub tangent: Vector2,
    pub normal: Vector2,
    /// Heading of the body in radians.
    pub rotation_angle: f64,
    /// Arc length the frame was sampled at.
    pub arc_length: f64,
    pub debug: Option<FrameDebug>,
}

/// Evaluation details, present only when [`FrameContext::debug`] is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDebug {
    pub alpha: f64,
    pub segment: usize,
    pub parameter: f64,
    pub out_of_range: Option<OutOfRangeWarning>,
}

impl Frame {
    pub(crate) fn from_sample(sample: &TrackSample, rotation_angle: f64, alpha: f64, ctx: FrameContext) -> Self {
        let details = ctx.debug.then(|| {
            debug!(
                alpha,
                s = sample.arc_length,
                segment = sample.segment,
                u = sample.parameter,
                "frame"
            );
            FrameDebug {
                alpha,
                segment: sample.segment,
                parameter: sample.parameter,
                out_of_range: sample.warning,
            }
        });
        Self {
            position: sample.position,
            tangent: sample.tangent,
            normal: sample.normal,
            rotation_angle,
            arc_length: sample.arc_length,
            debug: details,
        }
    }
}

/// Evaluates a body's frame at normalized time `alpha`.
pub struct FrameAt {
    alpha: f64,
    context: FrameContext,
}

impl FrameAt {
    /// Creates a new `FrameAt` query.
    #[must_use]
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            context: FrameContext::default(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: FrameContext) -> Self {
        self.context = context;
        self
    }

    /// Executes the query.
    ///
    /// The profile gives the arc length at `alpha`; the track turns it into
    /// position and orientation. Out-of-range values are clamped and, in
    /// debug mode, reported on the frame.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileConfigError::LengthMismatch`] if `profile` was not
    /// bound to the length of `track`.
    pub fn execute(&self, track: &Track, profile: &MotionProfile) -> Result<Frame, ProfileConfigError> {
        profile.check_length(track.total_length())?;
        let sample = track.sample_at(profile.evaluate(self.alpha));
        Ok(Frame::from_sample(&sample, heading(&sample.tangent), self.alpha, self.context))
    }
}

/// `count` evenly spaced values covering `[0, 1]`; a single value is 0.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn uniform_alphas(count: usize) -> impl Iterator<Item = f64> {
    let last = count.saturating_sub(1).max(1) as f64;
    (0..count).map(move |i| i as f64 / last)
}
