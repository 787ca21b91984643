mod arc;
mod circle;
mod parametric;
mod polyline;
mod projectile;
mod sampled;

pub use arc::Arc;
pub use circle::Circle;
pub use parametric::{DerivativeFn, Parametric, PointFn};
pub use polyline::Polyline;
pub use projectile::Projectile;

use crate::error::GeometryError;
use crate::math::{left_normal, Point2, Vector2};

/// Position and unit tangent at a local parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Point on the segment.
    pub position: Point2,
    /// Unit tangent in the direction of increasing parameter.
    pub tangent: Vector2,
}

/// Shared behaviour of every segment kind.
///
/// All methods take a local parameter `u` that callers have already
/// clamped to `[0, 1]`.
pub trait Curve {
    /// Evaluates the curve at `u`.
    fn point_at(&self, u: f64) -> Point2;

    /// Unit tangent at `u`.
    fn tangent_at(&self, u: f64) -> Vector2;

    /// Total arc length of the curve.
    fn length(&self) -> f64;

    /// Parameter at which the arc length from the start equals `distance`.
    ///
    /// The default assumes the curve is parameterized proportionally to arc length.
    fn parameter_at_length(&self, distance: f64) -> f64 {
        let length = self.length();
        if length <= 0.0 {
            return 0.0;
        }
        (distance / length).clamp(0.0, 1.0)
    }

    /// Arc length from the start to parameter `u`.
    fn length_at_parameter(&self, u: f64) -> f64 {
        u.clamp(0.0, 1.0) * self.length()
    }

    /// Parameter of the point on the curve nearest to `point`.
    fn closest_parameter(&self, point: &Point2) -> f64;
}

/// One piece of a track.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Straight pieces through a list of vertices.
    Polyline(Polyline),
    /// A circular arc of at most one turn.
    Arc(Arc),
    /// A full circle, possibly several turns.
    Circle(Circle),
    /// A user-supplied curve `t -> point`.
    Parametric(Parametric),
    /// A ballistic trajectory under constant gravity.
    Projectile(Projectile),
}

impl Segment {
    /// Samples position and unit tangent at `u`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if `u` is outside `[0, 1]` or NaN.
    pub fn sample(&self, u: f64) -> Result<Sample, GeometryError> {
        check_parameter(u)?;
        let curve = self.curve();
        Ok(Sample {
            position: curve.point_at(u),
            tangent: curve.tangent_at(u),
        })
    }

    /// Left-hand unit normal at `u`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if `u` is outside `[0, 1]` or NaN.
    pub fn normal(&self, u: f64) -> Result<Vector2, GeometryError> {
        check_parameter(u)?;
        Ok(left_normal(&self.curve().tangent_at(u)))
    }

    /// Arc length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.curve().length()
    }

    /// First point of the segment.
    #[must_use]
    pub fn start_point(&self) -> Point2 {
        self.curve().point_at(0.0)
    }

    /// Last point of the segment.
    #[must_use]
    pub fn end_point(&self) -> Point2 {
        self.curve().point_at(1.0)
    }

    /// Short name of the segment kind, for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Polyline(_) => "polyline",
            Self::Arc(_) => "arc",
            Self::Circle(_) => "circle",
            Self::Parametric(_) => "parametric",
            Self::Projectile(_) => "projectile",
        }
    }

    pub(crate) fn curve(&self) -> &dyn Curve {
        match self {
            Self::Polyline(c) => c,
            Self::Arc(c) => c,
            Self::Circle(c) => c,
            Self::Parametric(c) => c,
            Self::Projectile(c) => c,
        }
    }
}

impl From<Polyline> for Segment {
    fn from(value: Polyline) -> Self {
        Self::Polyline(value)
    }
}

impl From<Arc> for Segment {
    fn from(value: Arc) -> Self {
        Self::Arc(value)
    }
}

impl From<Circle> for Segment {
    fn from(value: Circle) -> Self {
        Self::Circle(value)
    }
}

impl From<Parametric> for Segment {
    fn from(value: Parametric) -> Self {
        Self::Parametric(value)
    }
}

impl From<Projectile> for Segment {
    fn from(value: Projectile) -> Self {
        Self::Projectile(value)
    }
}

fn check_parameter(u: f64) -> Result<(), GeometryError> {
    if (0.0..=1.0).contains(&u) {
        Ok(())
    } else {
        Err(GeometryError::ParameterOutOfRange {
            parameter: "u",
            value: u,
            min: 0.0,
            max: 1.0,
        })
    }
}

/// Unit vector along `v`, or `None` when `v` is too short to carry a direction.
pub(crate) fn unit_or_none(v: &Vector2) -> Option<Vector2> {
    let len = v.norm();
    (len > crate::math::TOLERANCE).then(|| v / len)
}
