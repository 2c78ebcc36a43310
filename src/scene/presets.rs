//! Hand-authored rigs.
//!
//! [`propeller_walker`] builds a small articulated model: a bobbing torso
//! with a spinning propeller on top and two swinging legs underneath.
//!
//! ```text
//! torso
//! ├── propeller_base (spins)
//! │   ├── arm_l1, arm_l2, arm_l3
//! │   └── arm_r1, arm_r2, arm_r3
//! ├── hip_l (swings) ── knee_l ── ankle_l (spins)
//! └── hip_r (swings) ── knee_r ── ankle_r (spins)
//! ```

use glam::{Quat, Vec3};

use crate::animation::{AnimationClip, Pose};
use crate::errors::Result;
use crate::scene::{NodeHandle, Rig, TransformNode};

/// Handles into a rig built by [`propeller_walker`].
#[derive(Debug)]
pub struct PropellerWalker {
    pub rig: Rig,
    pub torso: NodeHandle,
    pub propeller_base: NodeHandle,
    /// Left arms first, nearest to farthest, then the right ones.
    pub propeller_arms: [NodeHandle; 6],
    /// `[left, right]`
    pub hips: [NodeHandle; 2],
    /// `[left, right]`
    pub knees: [NodeHandle; 2],
    /// `[left, right]`
    pub ankles: [NodeHandle; 2],
}

impl PropellerWalker {
    pub const NODE_COUNT: usize = 14;
}

/// `(w, x, y, z)` component order, normalized.
fn quat(w: f32, x: f32, y: f32, z: f32) -> Quat {
    Quat::from_xyzw(x, y, z, w).normalize()
}

fn clip(name: &str, keys: &[(f32, Vec3, Quat, Vec3)]) -> Result<AnimationClip> {
    let mut clip = AnimationClip::new(name);
    for &(time, position, rotation, scale) in keys {
        clip.add_keyframe(time, position, rotation, scale)?;
    }
    Ok(clip)
}

fn static_node(name: &str, position: Vec3, rotation: Quat, scale: f32) -> TransformNode {
    TransformNode::from_pose(Pose::new(position, rotation, Vec3::splat(scale))).with_name(name)
}

/// Builds the propeller walker.
///
/// The propeller and ankle clips key a half turn, then `-identity`: the
/// authored slerp path carries them through a full revolution per loop.
pub fn propeller_walker() -> Result<PropellerWalker> {
    let mut rig = Rig::new();

    let torso = rig.add_root(TransformNode::from_clip(clip(
        "torso",
        &[
            (0.0, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE),
            (1.0, Vec3::new(0.0, 2.0, 0.0), Quat::IDENTITY, Vec3::ONE),
            (5.0, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE),
        ],
    )?));

    let base_position = Vec3::new(0.0, 1.3, 0.0);
    let propeller_base = rig.add_child(
        torso,
        TransformNode::from_clip(clip(
            "propeller_base",
            &[
                (0.0, base_position, Quat::IDENTITY, Vec3::splat(0.5)),
                (0.3, base_position, quat(0.0, 0.0, 1.0, 0.0), Vec3::splat(0.5)),
                (0.6, base_position, quat(-1.0, 0.0, 0.0, 0.0), Vec3::splat(0.5)),
            ],
        )?),
    )?;

    let flipped = quat(0.0, 0.0, 1.0, 0.0);
    let arm_specs = [
        ("arm_l1", 2.0, flipped),
        ("arm_l2", 4.0, flipped),
        ("arm_l3", 6.0, flipped),
        ("arm_r1", -2.0, Quat::IDENTITY),
        ("arm_r2", -4.0, Quat::IDENTITY),
        ("arm_r3", -6.0, Quat::IDENTITY),
    ];
    let mut propeller_arms = [NodeHandle::default(); 6];
    for (slot, (name, x, rotation)) in propeller_arms.iter_mut().zip(arm_specs) {
        *slot = rig.add_child(
            propeller_base,
            static_node(name, Vec3::new(x, 0.0, 0.0), rotation, 0.7),
        )?;
    }

    let swing_back = quat(0.924, -0.383, 0.0, 0.0);
    let swing_forward = quat(0.924, 0.383, 0.0, 0.0);
    let mut hips = [NodeHandle::default(); 2];
    let mut knees = [NodeHandle::default(); 2];
    let mut ankles = [NodeHandle::default(); 2];

    for (side, (suffix, x, first, second)) in [
        ("l", 0.8, swing_back, swing_forward),
        ("r", -0.8, swing_forward, swing_back),
    ]
    .into_iter()
    .enumerate()
    {
        let hip_position = Vec3::new(x, -0.8, 0.5);
        hips[side] = rig.add_child(
            torso,
            TransformNode::from_clip(clip(
                &format!("hip_{suffix}"),
                &[
                    (0.0, hip_position, first, Vec3::splat(0.5)),
                    (0.4, hip_position, second, Vec3::splat(0.5)),
                    (0.8, hip_position, first, Vec3::splat(0.5)),
                ],
            )?),
        )?;

        knees[side] = rig.add_child(
            hips[side],
            static_node(
                &format!("knee_{suffix}"),
                Vec3::new(0.0, -0.8, 0.5),
                Quat::IDENTITY,
                0.5,
            ),
        )?;

        let ankle_position = Vec3::new(0.0, -1.3, 0.5);
        ankles[side] = rig.add_child(
            knees[side],
            TransformNode::from_clip(clip(
                &format!("ankle_{suffix}"),
                &[
                    (0.0, ankle_position, Quat::IDENTITY, Vec3::ONE),
                    (0.3, ankle_position, quat(0.0, 0.0, 1.0, 0.0), Vec3::ONE),
                    (0.6, ankle_position, quat(-1.0, 0.0, 0.0, 0.0), Vec3::ONE),
                ],
            )?),
        )?;
    }

    log::debug!("Built propeller walker with {} nodes", rig.len());

    Ok(PropellerWalker {
        rig,
        torso,
        propeller_base,
        propeller_arms,
        hips,
        knees,
        ankles,
    })
}
