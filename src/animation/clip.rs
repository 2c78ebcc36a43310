use glam::{Mat4, Quat, Vec3};

use crate::animation::keyframe::{Keyframe, Pose};
use crate::animation::playback::PlaybackSettings;
use crate::animation::tracks::{KeyframeCursor, KeyframeTrack};
use crate::errors::Result;

/// A single keyframe track plus its own playback clock.
///
/// Each animated node owns one clip by value. Advancing the clip moves its
/// local time, applies the loop rule and samples the track:
///
/// ```rust,ignore
/// let mut clip = AnimationClip::new("torso");
/// clip.add_keyframe(0.0, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)?;
/// clip.add_keyframe(1.0, Vec3::new(0.0, 2.0, 0.0), Quat::IDENTITY, Vec3::ONE)?;
///
/// let local = clip.evaluate(0.5); // translation (0, 1, 0)
/// ```
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub settings: PlaybackSettings,

    track: KeyframeTrack,
    local_time: f32,
    cursor: KeyframeCursor,
    /// Last successfully sampled pose, reused if a sample ever fails.
    last_pose: Pose,
}

impl AnimationClip {
    /// An empty clip with an unbounded track and default playback settings.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_track(name, KeyframeTrack::new())
    }

    /// An empty clip that accepts at most `capacity` keyframes.
    #[must_use]
    pub fn with_keyframe_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self::from_track(name, KeyframeTrack::bounded(capacity))
    }

    #[must_use]
    pub fn from_track(name: impl Into<String>, track: KeyframeTrack) -> Self {
        let last_pose = track.first().map_or(Pose::IDENTITY, |k| k.pose);
        Self {
            name: name.into(),
            settings: PlaybackSettings::default(),
            track,
            local_time: 0.0,
            cursor: KeyframeCursor::default(),
            last_pose,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: PlaybackSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Appends a keyframe. Times must be strictly increasing across calls;
    /// the duration grows to the new time.
    pub fn add_keyframe(
        &mut self,
        time: f32,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
    ) -> Result<()> {
        self.push_keyframe(Keyframe::new(time, position, rotation, scale))
    }

    pub fn push_keyframe(&mut self, keyframe: Keyframe) -> Result<()> {
        let was_empty = self.track.is_empty();
        self.track.push(keyframe)?;
        if was_empty {
            self.last_pose = keyframe.pose;
        }
        Ok(())
    }

    /// Advances local time by `dt` and applies the loop rule.
    /// Returns the new local time.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let advanced = self.local_time + dt;
        self.local_time = self.settings.loop_mode.apply(advanced, self.track.duration());
        self.local_time
    }

    /// Samples the pose at the current local time.
    ///
    /// Never fails: a degenerate segment keeps the previous pose and logs a
    /// warning.
    pub fn current_pose(&mut self) -> Pose {
        match self.track.sample_with_cursor(
            self.local_time,
            &mut self.cursor,
            self.settings.rotation_path,
            self.settings.out_of_range,
        ) {
            Ok(pose) => {
                self.last_pose = pose;
                pose
            }
            Err(err) => {
                log::warn!(
                    "Clip '{}' at t={}: {err}; holding previous pose",
                    self.name,
                    self.local_time
                );
                self.last_pose
            }
        }
    }

    /// Advances by `dt` and returns the local transform for the new time.
    pub fn evaluate(&mut self, dt: f32) -> Mat4 {
        self.advance(dt);
        self.current_pose().to_matrix()
    }

    /// Samples an arbitrary time without touching playback state.
    pub fn sample(&self, time: f32) -> Result<Pose> {
        self.track
            .sample(time, self.settings.rotation_path, self.settings.out_of_range)
    }

    /// Pose of the first keyframe, `None` for an empty clip.
    #[must_use]
    pub fn first_pose(&self) -> Option<Pose> {
        self.track.first().map(|k| k.pose)
    }

    /// Rewinds to time zero.
    pub fn reset(&mut self) {
        self.local_time = 0.0;
        self.cursor = KeyframeCursor::default();
        self.last_pose = self.first_pose().unwrap_or(Pose::IDENTITY);
    }

    #[inline]
    #[must_use]
    pub fn local_time(&self) -> f32 {
        self.local_time
    }

    /// Largest keyframe time.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.track.duration()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.track.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.track.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn track(&self) -> &KeyframeTrack {
        &self.track
    }
}
