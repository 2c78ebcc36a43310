//! Keyframe-driven transform hierarchies.
//!
//! A [`Rig`] owns a tree of [`TransformNode`]s. Each node may own an
//! [`AnimationClip`] that rewrites its local transform every frame; the
//! solve pass then composes world matrices root to leaf.
//!
//! ```rust,ignore
//! let mut walker = keyrig::scene::presets::propeller_walker()?;
//! loop {
//!     walker.rig.update(timer.tick());
//!     walker.rig.solve()?;
//!     walker.rig.draw(&mut |mesh: &Mesh, model: &Mat4| renderer.draw(mesh, model), &mesh)?;
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod errors;
pub mod scene;
pub mod utils;

pub use animation::{AnimationClip, Keyframe, LoopMode, OutOfRange, PlaybackSettings, Pose, RotationPath};
pub use errors::{Result, RigError};
pub use scene::{DrawTarget, FramePhase, NodeHandle, Rig, RigSettings, TransformNode};
pub use utils::FrameTimer;
