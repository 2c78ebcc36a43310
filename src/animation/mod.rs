//! Keyframe Animation
//!
//! - [`values`]: interpolation primitives (`inv_lerp`, `slerp`, [`Interpolatable`])
//! - [`Pose`] / [`Keyframe`]: a TRS triple, and one stamped with a time
//! - [`KeyframeTrack`]: strictly increasing keys with a lookup cursor
//! - [`AnimationClip`]: a track with its own playback clock
//! - [`AnimationSystem`]: the per-frame Update pass over a node arena

pub mod clip;
pub mod keyframe;
pub mod playback;
pub mod system;
pub mod tracks;
pub mod values;

pub use clip::AnimationClip;
pub use keyframe::{Keyframe, Pose};
pub use playback::{LoopMode, OutOfRange, PlaybackSettings, RotationPath};
pub use system::AnimationSystem;
pub use tracks::{KeyframeCursor, KeyframeTrack, Segment};
pub use values::{Interpolatable, inv_lerp, slerp, slerp_shortest};
