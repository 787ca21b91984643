mod build_track;
mod loop_track;

pub use build_track::BuildTrack;
pub use loop_track::LoopTrack;
