//! Headless propeller walker.
//!
//! Runs the Update → Solve → Draw loop at a fixed 60 Hz step and logs the
//! world position of every node once per simulated second.
//!
//! ```text
//! RUST_LOG=info cargo run -p walker -- 300
//! RUST_LOG=info cargo run -p walker -- --realtime
//! ```

use std::time::Duration;

use anyhow::Context;
use glam::Mat4;
use keyrig::FrameTimer;
use keyrig::scene::presets::propeller_walker;

const FIXED_STEP: Duration = Duration::from_nanos(16_666_667);
const DEFAULT_FRAMES: u64 = 600;

/// Stand-in for a GPU mesh handle.
struct Mesh {
    name: &'static str,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut frames = DEFAULT_FRAMES;
    let mut realtime = false;
    for arg in std::env::args().skip(1) {
        if arg == "--realtime" {
            realtime = true;
        } else {
            frames = arg
                .parse()
                .with_context(|| format!("invalid frame count '{arg}'"))?;
        }
    }

    let mut walker = propeller_walker().context("building the propeller walker")?;
    let mesh = Mesh { name: "monkey" };
    let mut timer = FrameTimer::new();

    log::info!(
        "Running {frames} frames over {} nodes ({})",
        walker.rig.len(),
        if realtime { "wall clock" } else { "fixed step" }
    );

    while timer.frame_count < frames {
        let dt = if realtime {
            std::thread::sleep(FIXED_STEP);
            timer.tick()
        } else {
            timer.advance(FIXED_STEP)
        };

        walker.rig.update(dt);
        walker.rig.solve()?;

        let report = timer.frame_count % 60 == 0;
        let mut drawn = 0_usize;
        walker.rig.draw(
            &mut |mesh: &Mesh, model: &Mat4| {
                drawn += 1;
                if report {
                    log::debug!("  {} #{drawn} at {}", mesh.name, model.w_axis.truncate());
                }
            },
            &mesh,
        )?;

        if report {
            let torso = walker
                .rig
                .global_transform(walker.torso)
                .context("torso handle is stale")?;
            log::info!(
                "t={:.2}s drew {drawn} nodes, torso at {}",
                timer.elapsed.as_secs_f32(),
                torso.w_axis.truncate()
            );
        }
    }

    let released = walker.rig.clear();
    log::info!("Released {released} nodes");
    Ok(())
}
