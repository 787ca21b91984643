pub mod animate;
pub mod creation;
pub mod query;
pub mod scale;
