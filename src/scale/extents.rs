use crate::geometry::Aabb;
use crate::math::{Point2, Vector2};
use crate::track::Track;

use super::CanvasSize;

/// The physical size of everything a scene has to show.
///
/// Spatial content widens the bounding box; key lengths are sizes that must
/// fit on screen regardless of where they sit (a spring's rest length, a
/// ramp's height).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extents {
    bounds: Option<Aabb>,
    key_lengths: Vec<f64>,
}

impl Extents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_point(&mut self, p: &Point2) -> &mut Self {
        self.bounds = Some(self.bounds.map_or_else(
            || Aabb::from_point(*p),
            |mut b| {
                b.include(p);
                b
            },
        ));
        self
    }

    pub fn include_aabb(&mut self, aabb: &Aabb) -> &mut Self {
        self.bounds = Some(match self.bounds {
            Some(mut b) => {
                b.union(aabb);
                b
            }
            None => *aabb,
        });
        self
    }

    /// Adds the square enclosing a circle.
    pub fn include_circle(&mut self, center: &Point2, radius: f64) -> &mut Self {
        let r = Vector2::new(radius.abs(), radius.abs());
        self.include_point(&(center - r)).include_point(&(center + r))
    }

    pub fn include_track(&mut self, track: &Track) -> &mut Self {
        self.include_aabb(&track.bounding_box())
    }

    /// Adds a length that must fit within the shorter canvas side.
    ///
    /// Non-finite and non-positive lengths are ignored.
    pub fn include_length(&mut self, length: f64) -> &mut Self {
        if length.is_finite() && length > 0.0 {
            self.key_lengths.push(length);
        }
        self
    }

    #[must_use]
    pub fn bounds(&self) -> Option<&Aabb> {
        self.bounds.as_ref()
    }

    #[must_use]
    pub fn key_lengths(&self) -> &[f64] {
        &self.key_lengths
    }

    /// Largest ratio of physical extent to canvas size.
    ///
    /// Zero when there is nothing to show.
    #[must_use]
    pub fn raw_scale(&self, canvas: &CanvasSize) -> f64 {
        let box_ratio = self.bounds.map_or(0.0, |b| {
            (b.width() / canvas.width).max(b.height() / canvas.height)
        });
        let short_side = canvas.width.min(canvas.height);
        self.key_lengths
            .iter()
            .map(|l| l / short_side)
            .fold(box_ratio, f64::max)
    }
}
