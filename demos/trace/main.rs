//! Prints the frames of a body running a loop-the-loop.
//!
//! Usage:
//! ```text
//! cargo run --example trace                      # 24 frames, constant speed
//! cargo run --example trace -- 60 constant_decel # frame count and law
//! RUST_LOG=trackline=debug cargo run --example trace
//! ```

use trackline::math::Point2;
use trackline::operations::animate::{FollowConfig, FollowPath, FrameContext};
use trackline::operations::creation::LoopTrack;
use trackline::operations::scale::ComputeScale;
use trackline::profile::{AccelConfig, ProfileConfig};
use trackline::scale::{CanvasSize, Extents};

fn main() -> trackline::Result<()> {
    // Default: WARN for everything, INFO for trackline.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("trackline=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let count = args.next().and_then(|a| a.parse().ok()).unwrap_or(24);
    let profile = match args.next().as_deref() {
        Some("constant_accel") => ProfileConfig::ConstantAccel(AccelConfig::default()),
        Some("constant_decel") => ProfileConfig::ConstantDecel(AccelConfig::default()),
        _ => ProfileConfig::Constant,
    };

    let track = LoopTrack::new(Point2::new(0.0, 1.6), 1.6).execute()?;
    let mut extents = Extents::new();
    extents.include_track(&track);
    let scale = ComputeScale::new(&extents, CanvasSize::new(16.0, 9.0)).execute();
    println!("track length {:.3}, unit {}", track.total_length(), scale.unit);

    let follower = FollowPath::new(FollowConfig {
        profile,
        ..FollowConfig::default()
    })
    .execute(&track)?;
    for (i, frame) in follower.frames(count, FrameContext::default()).iter().enumerate() {
        let p = scale.scale_point(&frame.position, &Point2::origin());
        println!(
            "{i:>4}  s={:>7.3}  pos=({:>7.3}, {:>7.3})  angle={:>8.2}deg",
            frame.arc_length,
            p.x,
            p.y,
            frame.rotation_angle.to_degrees()
        );
    }
    Ok(())
}
