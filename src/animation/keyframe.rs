use glam::{Mat4, Quat, Vec3};

use crate::animation::playback::RotationPath;
use crate::animation::values::{Interpolatable, slerp_shortest};

/// Position, rotation and scale of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Pose {
    /// Zero translation, identity rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// `translate(position) * rotate(rotation) * scale(scale)`, no shear.
    #[inline]
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Blends towards `other`: component-wise lerp for position and scale,
    /// slerp for rotation.
    #[must_use]
    pub fn interpolate(&self, other: &Pose, t: f32, path: RotationPath) -> Pose {
        let rotation = match path {
            RotationPath::Authored => Quat::interpolate_linear(self.rotation, other.rotation, t),
            RotationPath::Shortest => slerp_shortest(self.rotation, other.rotation, t),
        };
        Pose {
            position: Vec3::interpolate_linear(self.position, other.position, t),
            rotation,
            scale: Vec3::interpolate_linear(self.scale, other.scale, t),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A timestamped pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub time: f32,
    pub pose: Pose,
}

impl Keyframe {
    #[must_use]
    pub const fn new(time: f32, position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            time,
            pose: Pose::new(position, rotation, scale),
        }
    }
}
