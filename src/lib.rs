pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod profile;
pub mod scale;
pub mod track;

pub use error::{Result, TracklineError};
