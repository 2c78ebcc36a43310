use glam::Mat4;
use smallvec::SmallVec;

use crate::animation::{AnimationClip, Pose};
use crate::scene::NodeHandle;

/// A node of a transform hierarchy.
///
/// # Hierarchy
///
/// Nodes live in a [`Rig`](crate::scene::Rig) arena and refer to each other
/// by [`NodeHandle`]:
/// - `parent`: non-owning back-reference (`None` for roots)
/// - `children`: ordered, owned by this node; removing the node from the rig
///   removes the whole subtree
///
/// # Transforms
///
/// - `local`: relative to the parent. Authored directly, or rewritten by the
///   owned clip on every Update pass.
/// - `global`: world space, derived by the Solve pass. Only meaningful right
///   after a solve.
#[derive(Debug, Clone)]
pub struct TransformNode {
    pub name: String,

    // === Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: SmallVec<[NodeHandle; 4]>,
    pub(crate) child_capacity: Option<usize>,

    // === Spatial Data ===
    pub(crate) local: Mat4,
    pub(crate) global: Mat4,

    /// Keyframe clip driving `local`, if this node animates.
    pub clip: Option<AnimationClip>,
}

impl TransformNode {
    /// An unnamed static node at the identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self::from_matrix(Mat4::IDENTITY)
    }

    /// A static node with an authored local matrix.
    #[must_use]
    pub fn from_matrix(local: Mat4) -> Self {
        Self {
            name: String::new(),
            parent: None,
            children: SmallVec::new(),
            child_capacity: None,
            local,
            global: Mat4::IDENTITY,
            clip: None,
        }
    }

    /// A static node with an authored local pose.
    #[must_use]
    pub fn from_pose(pose: Pose) -> Self {
        Self::from_matrix(pose.to_matrix())
    }

    /// A clip-driven node. The local transform starts at the clip's first
    /// keyframe pose.
    #[must_use]
    pub fn from_clip(clip: AnimationClip) -> Self {
        let pose = clip.first_pose().unwrap_or_else(|| {
            log::warn!("Clip '{}' has no keyframes; node starts at identity", clip.name);
            Pose::IDENTITY
        });
        let mut node = Self::from_pose(pose);
        node.name.clone_from(&clip.name);
        node.clip = Some(clip);
        node
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Caps the number of children this node accepts.
    #[must_use]
    pub fn with_child_capacity(mut self, capacity: usize) -> Self {
        self.child_capacity = Some(capacity);
        self
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns a read-only slice of child node handles, in attachment order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn child_capacity(&self) -> Option<usize> {
        self.child_capacity
    }

    #[inline]
    #[must_use]
    pub fn local_transform(&self) -> &Mat4 {
        &self.local
    }

    /// World matrix from the latest solve.
    #[inline]
    #[must_use]
    pub fn global_transform(&self) -> &Mat4 {
        &self.global
    }

    #[inline]
    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.clip.is_some()
    }
}

impl Default for TransformNode {
    fn default() -> Self {
        Self::new()
    }
}
