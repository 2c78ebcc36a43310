//! Transform Hierarchy
//!
//! - [`TransformNode`]: a node with local/global transforms and an optional clip
//! - [`Rig`]: the node arena and the per-frame Update → Solve → Draw pipeline
//! - [`transform_system`]: the Solve pass (forward kinematics)
//! - [`DrawTarget`]: the external draw collaborator
//! - [`presets`]: hand-authored rigs

pub mod draw;
pub mod node;
pub mod presets;
pub mod rig;
pub mod transform_system;

pub use draw::DrawTarget;
pub use node::TransformNode;
pub use rig::{FramePhase, Rig, RigSettings};

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to a node inside a [`Rig`].
    pub struct NodeHandle;
}
