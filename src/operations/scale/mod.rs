mod compute_scale;

pub use compute_scale::ComputeScale;
