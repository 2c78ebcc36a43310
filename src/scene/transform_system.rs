//! Transform System
//!
//! The Solve pass: forward kinematics over the node arena. Borrows only the
//! node `SlotMap` and the root list, never the whole [`Rig`](super::Rig).
//!
//! Every traversal here is strict pre-order: a node's global matrix is
//! written before any of its children is visited, so
//! `child.global = parent.global * child.local` always reads a parent that
//! was already solved this pass.

use glam::Mat4;
use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::node::TransformNode;

/// Solves every tree hanging off `roots`. Returns the number of nodes
/// solved.
///
/// Uses an explicit stack, so depth is bounded by memory rather than the
/// call stack.
pub fn solve_hierarchy(nodes: &mut SlotMap<NodeHandle, TransformNode>, roots: &[NodeHandle]) -> usize {
    let stack = roots.iter().rev().map(|&root| (root, None)).collect();
    drain_solve_stack(nodes, stack)
}

/// Pops `(node, parent world matrix or None for a root)` pairs until empty.
fn drain_solve_stack(
    nodes: &mut SlotMap<NodeHandle, TransformNode>,
    mut stack: Vec<(NodeHandle, Option<Mat4>)>,
) -> usize {
    let mut solved = 0;
    while let Some((handle, parent_world)) = stack.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };

        node.global = match parent_world {
            Some(parent_world) => parent_world * node.local,
            None => node.local,
        };
        solved += 1;

        // Reverse push keeps siblings in attachment order
        let world = node.global;
        for &child in node.children.iter().rev() {
            stack.push((child, Some(world)));
        }
    }
    solved
}

/// Recursive equivalent of [`solve_hierarchy`].
pub fn solve_hierarchy_recursive(
    nodes: &mut SlotMap<NodeHandle, TransformNode>,
    roots: &[NodeHandle],
) -> usize {
    roots
        .iter()
        .map(|&root| solve_recursive(nodes, root, None))
        .sum()
}

fn solve_recursive(
    nodes: &mut SlotMap<NodeHandle, TransformNode>,
    handle: NodeHandle,
    parent_world: Option<Mat4>,
) -> usize {
    let (world, children) = {
        let Some(node) = nodes.get_mut(handle) else {
            return 0;
        };
        node.global = match parent_world {
            Some(parent_world) => parent_world * node.local,
            None => node.local,
        };
        (node.global, node.children.clone())
    };

    1 + children
        .into_iter()
        .map(|child| solve_recursive(nodes, child, Some(world)))
        .sum::<usize>()
}

/// Re-solves the subtree under `root` against its parent's current global
/// matrix. Useful after editing a single branch.
pub fn solve_subtree(nodes: &mut SlotMap<NodeHandle, TransformNode>, root: NodeHandle) -> usize {
    let Some(node) = nodes.get(root) else {
        return 0;
    };
    let parent_world = node
        .parent
        .and_then(|parent| nodes.get(parent))
        .map(|parent| parent.global);

    drain_solve_stack(nodes, vec![(root, parent_world)])
}

/// Pre-order walk of the trees under `roots`.
pub struct PreorderIter<'a> {
    nodes: &'a SlotMap<NodeHandle, TransformNode>,
    stack: Vec<NodeHandle>,
}

impl<'a> PreorderIter<'a> {
    #[must_use]
    pub fn new(nodes: &'a SlotMap<NodeHandle, TransformNode>, roots: &[NodeHandle]) -> Self {
        Self {
            nodes,
            stack: roots.iter().rev().copied().collect(),
        }
    }
}

impl<'a> Iterator for PreorderIter<'a> {
    type Item = (NodeHandle, &'a TransformNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.stack.pop() {
            if let Some(node) = self.nodes.get(handle) {
                self.stack.extend(node.children.iter().rev().copied());
                return Some((handle, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn translated(x: f32, y: f32, z: f32) -> TransformNode {
        TransformNode::from_matrix(Mat4::from_translation(Vec3::new(x, y, z)))
    }

    #[test]
    fn test_hierarchy_solve() {
        let mut nodes: SlotMap<NodeHandle, TransformNode> = SlotMap::with_key();

        let parent_handle = nodes.insert(translated(1.0, 0.0, 0.0));
        let mut child = translated(0.0, 1.0, 0.0);
        child.parent = Some(parent_handle);
        let child_handle = nodes.insert(child);
        nodes[parent_handle].children.push(child_handle);

        let solved = solve_hierarchy(&mut nodes, &[parent_handle]);
        assert_eq!(solved, 2);

        let child_world_pos = nodes[child_handle].global.w_axis.truncate();
        assert!((child_world_pos - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn preorder_visits_parents_first_in_attachment_order() {
        let mut nodes: SlotMap<NodeHandle, TransformNode> = SlotMap::with_key();
        let root = nodes.insert(TransformNode::new());
        let a = nodes.insert(TransformNode::new());
        let b = nodes.insert(TransformNode::new());
        let a1 = nodes.insert(TransformNode::new());
        nodes[root].children.extend([a, b]);
        nodes[a].children.push(a1);
        nodes[a].parent = Some(root);
        nodes[b].parent = Some(root);
        nodes[a1].parent = Some(a);

        let order: Vec<NodeHandle> = PreorderIter::new(&nodes, &[root]).map(|(h, _)| h).collect();
        assert_eq!(order, vec![root, a, a1, b]);
    }
}
