use std::f64::consts::{FRAC_PI_2, TAU};

use crate::geometry::curve::Projectile;
use crate::geometry::{Aabb, Segment};
use crate::math::numeric::DEFAULT_SUBDIVISIONS;
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::track::Track;

/// Computes the axis-aligned bounding box of a track.
///
/// Straight pieces and circular arcs are bounded exactly; numeric curves
/// are sampled.
pub struct BoundingBox {
    samples: u32,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: DEFAULT_SUBDIVISIONS,
        }
    }

    /// Sets how many intervals numeric curves are sampled at.
    #[must_use]
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples.max(1);
        self
    }

    /// Executes the query, returning the AABB.
    #[must_use]
    pub fn execute(&self, track: &Track) -> Aabb {
        let mut aabb = Aabb::from_point(track.position_at(0.0));
        for segment in track.segments() {
            self.include_segment(&mut aabb, segment);
        }
        aabb
    }

    fn include_segment(&self, aabb: &mut Aabb, segment: &Segment) {
        match segment {
            Segment::Polyline(p) => p.points().iter().for_each(|v| aabb.include(v)),
            Segment::Arc(a) => include_arc(aabb, a.center(), a.radius(), a.start_angle(), a.sweep()),
            Segment::Circle(c) => include_arc(aabb, c.center(), c.radius(), c.start_angle(), c.sweep()),
            Segment::Projectile(p) => {
                if let Some(apex) = projectile_apex(p) {
                    aabb.include(&apex);
                }
                self.include_sampled(aabb, segment);
            }
            Segment::Parametric(_) => self.include_sampled(aabb, segment),
        }
    }

    fn include_sampled(&self, aabb: &mut Aabb, segment: &Segment) {
        let curve = segment.curve();
        for i in 0..=self.samples {
            aabb.include(&curve.point_at(f64::from(i) / f64::from(self.samples)));
        }
    }
}

/// Adds the arc's endpoints and every axis extreme inside its sweep.
fn include_arc(aabb: &mut Aabb, center: &Point2, radius: f64, start: f64, sweep: f64) {
    let point = |angle: f64| center + radius * Vector2::new(angle.cos(), angle.sin());
    aabb.include(&point(start));
    aabb.include(&point(start + sweep));
    for k in 0..4 {
        let angle = f64::from(k) * FRAC_PI_2;
        let offset = ((angle - start) * sweep.signum()).rem_euclid(TAU);
        if offset <= sweep.abs() + TOLERANCE {
            aabb.include(&point(angle));
        }
    }
}

/// Highest point of the flight, if it falls inside the flown time range.
fn projectile_apex(p: &Projectile) -> Option<Point2> {
    if p.gravity().abs() < TOLERANCE {
        return None;
    }
    let t = p.velocity().y / p.gravity();
    let (t0, t1) = p.time_range();
    (t > t0 && t < t1).then(|| p.position_at_time(t))
}
