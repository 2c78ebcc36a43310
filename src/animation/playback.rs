//! Playback Settings
//!
//! Controls how an [`AnimationClip`](super::AnimationClip) handles the loop
//! boundary, how rotations travel between keys, and what it yields outside
//! the keyed time range.
//!
//! ```rust,ignore
//! use keyrig::animation::{LoopMode, PlaybackSettings};
//!
//! // Default: hard reset at the loop boundary, authored rotation arcs,
//! // hold the nearest keyed pose outside the keyed range.
//! let settings = PlaybackSettings::default();
//!
//! // Seamless looping
//! let settings = PlaybackSettings {
//!     loop_mode: LoopMode::Wrap,
//!     ..Default::default()
//! };
//! ```

/// What happens when local time passes the clip duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Local time jumps back to exactly zero once it exceeds the duration.
    ///
    /// The overshoot is discarded, so the pose shows a one-frame
    /// discontinuity at the boundary, and a single large step lands at zero
    /// no matter how many boundaries it crossed.
    #[default]
    Reset,
    /// Local time wraps modulo the duration, keeping the overshoot.
    Wrap,
    /// Local time clamps at the duration and stays there.
    Once,
}

impl LoopMode {
    /// Applies the loop rule to an already advanced `time`.
    #[must_use]
    pub fn apply(self, time: f32, duration: f32) -> f32 {
        match self {
            LoopMode::Reset => {
                if time > duration {
                    0.0
                } else {
                    time
                }
            }
            LoopMode::Wrap => {
                if duration <= 0.0 {
                    0.0
                } else if time > duration {
                    time % duration
                } else {
                    time
                }
            }
            LoopMode::Once => time.min(duration),
        }
    }
}

/// Which arc a rotation takes between two keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPath {
    /// Interpolate between the quaternions exactly as keyed. Keys on opposite
    /// hemispheres take the long way round, which lets a rig spin a full turn
    /// with three keys.
    #[default]
    Authored,
    /// Flip the end key onto the start key's hemisphere first.
    Shortest,
}

/// What a clip yields before its first key, after its last key, and when it
/// holds a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfRange {
    /// Hold the nearest keyed pose.
    #[default]
    Hold,
    /// Snap to the identity pose.
    Identity,
}

/// Per-clip playback configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackSettings {
    pub loop_mode: LoopMode,
    pub rotation_path: RotationPath,
    pub out_of_range: OutOfRange,
}

impl PlaybackSettings {
    /// Hard reset, authored arcs and identity outside the keyed range: the
    /// strict playback the hand-authored presets were tuned against.
    #[must_use]
    pub const fn snap_outside_keys() -> Self {
        Self {
            loop_mode: LoopMode::Reset,
            rotation_path: RotationPath::Authored,
            out_of_range: OutOfRange::Identity,
        }
    }
}
