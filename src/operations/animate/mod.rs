mod follow;
mod frame_at;

pub use follow::{FollowConfig, FollowPath, Follower, PathEndpoint};
pub use frame_at::{Frame, FrameAt, FrameContext, FrameDebug};
