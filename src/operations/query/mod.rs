mod bounding_box;
mod project;

pub use bounding_box::BoundingBox;
pub use project::{ProjectPoint, Projection};
