use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::node::TransformNode;

/// Animation system.
///
/// Runs the Update pass: every node that owns a keyed clip re-evaluates it
/// and overwrites its local transform. A clip without keyframes leaves the
/// node's authored transform alone. Nodes never read each other here, so the
/// arena is walked in storage order rather than tree order.
pub struct AnimationSystem;

impl AnimationSystem {
    /// Advances every clip in `nodes` by `dt` seconds.
    ///
    /// Returns the number of nodes whose local transform was rewritten.
    pub fn update(nodes: &mut SlotMap<NodeHandle, TransformNode>, dt: f32) -> usize {
        let mut animated = 0;
        for node in nodes.values_mut() {
            if let Some(clip) = node.clip.as_mut().filter(|clip| !clip.is_empty()) {
                node.local = clip.evaluate(dt);
                animated += 1;
            }
        }
        animated
    }
}
