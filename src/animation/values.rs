use glam::{Quat, Vec3, Vec4};

use crate::errors::{Result, RigError};

/// Below this magnitude `sin(angle)` is treated as zero and [`slerp`]
/// returns its first argument. `acos` amplifies rounding near a dot of 1.0,
/// so this is well above `f32::EPSILON`.
const SLERP_EPSILON: f32 = 1e-3;

/// Values that can be blended between two keyframes.
pub trait Interpolatable: Copy + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Quat {
    /// Follows the authored arc, see [`slerp`].
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        slerp(start, end, t)
    }
}

/// Linear parameter of `current_time` inside `[prev_time, next_time]`.
///
/// Coincident times have no defined parameter and yield
/// [`RigError::DegenerateInterpolation`] instead of a division by zero.
pub fn inv_lerp(prev_time: f32, next_time: f32, current_time: f32) -> Result<f32> {
    let span = next_time - prev_time;
    if span.abs() <= f32::EPSILON {
        return Err(RigError::DegenerateInterpolation { time: prev_time });
    }
    Ok((current_time - prev_time) / span)
}

/// Spherical interpolation between two unit quaternions.
///
/// The arc is taken exactly as authored: a negative dot product is NOT
/// flipped, so `q1 -> -q1` style keys spin the long way round. Use
/// [`slerp_shortest`] to always take the short arc.
///
/// When `sin(angle)` is numerically zero the result is `q1`. That covers
/// parallel pairs and also antipodal ones (`q2 ≈ -q1`, a full turn), whose
/// great arc is undefined. Key such turns through an intermediate
/// orientation.
#[must_use]
pub fn slerp(q1: Quat, q2: Quat, t: f32) -> Quat {
    let angle = q1.dot(q2).clamp(-1.0, 1.0).acos();
    let denom = angle.sin();
    if denom.abs() <= SLERP_EPSILON {
        return q1;
    }

    let w1 = ((1.0 - t) * angle).sin() / denom;
    let w2 = (t * angle).sin() / denom;
    Quat::from_vec4(Vec4::from(q1) * w1 + Vec4::from(q2) * w2)
}

/// [`slerp`] along the shorter of the two arcs.
#[must_use]
pub fn slerp_shortest(q1: Quat, q2: Quat, t: f32) -> Quat {
    let q2 = if q1.dot(q2) < 0.0 { -q2 } else { q2 };
    slerp(q1, q2, t)
}
