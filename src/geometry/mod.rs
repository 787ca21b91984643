pub mod aabb;
pub mod config;
pub mod curve;

pub use aabb::Aabb;
pub use config::{ProjectileConfig, SegmentConfig, TrackConfig};
pub use curve::{Arc, Circle, Curve, Parametric, Polyline, Projectile, Sample, Segment};
