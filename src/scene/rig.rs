use glam::Mat4;
use slotmap::SlotMap;

use crate::animation::AnimationSystem;
use crate::errors::{CapacityKind, OrderingViolation, Result, RigError};
use crate::scene::NodeHandle;
use crate::scene::draw::DrawTarget;
use crate::scene::node::TransformNode;
use crate::scene::transform_system::{self, PreorderIter};

/// Build-time defaults for a [`Rig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RigSettings {
    /// Child capacity for nodes that do not declare their own.
    /// `None` means unbounded.
    pub default_child_capacity: Option<usize>,
}

/// Where the rig stands in the Update → Solve → Draw pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    /// Built or cleared, never solved.
    ///
    /// Locals are already valid here (clip-driven nodes start at their first
    /// keyframe), so the first solve may skip the update without being
    /// reported.
    Built,
    /// Local transforms changed since the last solve.
    Updated,
    /// Global transforms match the local ones.
    Solved,
}

/// An arena-backed transform hierarchy.
///
/// Nodes are addressed by [`NodeHandle`]. A parent lists its children; a
/// child keeps a plain handle back to its parent. Removing a node removes
/// its subtree, and dropping the rig releases everything.
///
/// # Frame
///
/// ```rust,ignore
/// rig.update(dt);          // clips rewrite local transforms
/// rig.solve()?;            // global = parent.global * local, root to leaf
/// rig.draw(&mut target, &mesh)?;
/// ```
///
/// `solve` and `draw` always do their work. Their `Err` only reports that
/// the pipeline ran out of order (see [`OrderingViolation`]).
#[derive(Debug)]
pub struct Rig {
    nodes: SlotMap<NodeHandle, TransformNode>,
    roots: Vec<NodeHandle>,
    phase: FramePhase,
    settings: RigSettings,
}

impl Default for Rig {
    fn default() -> Self {
        Self::new()
    }
}

impl Rig {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(RigSettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: RigSettings) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
            phase: FramePhase::Built,
            settings,
        }
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Adds a node with no parent.
    pub fn add_root(&mut self, mut node: TransformNode) -> NodeHandle {
        node.parent = None;
        node.children.clear();
        let handle = self.nodes.insert(node);
        self.roots.push(handle);
        self.mark_stale();
        log::trace!("Added root node {handle:?}");
        handle
    }

    /// Adds `node` as the last child of `parent`.
    ///
    /// Fails if `parent` does not exist or already holds as many children as
    /// its capacity allows; the rig is unchanged on failure.
    pub fn add_child(&mut self, parent: NodeHandle, mut node: TransformNode) -> Result<NodeHandle> {
        let parent_node = self
            .nodes
            .get(parent)
            .ok_or(RigError::NodeNotFound(parent))?;

        if let Some(capacity) = parent_node
            .child_capacity
            .or(self.settings.default_child_capacity)
            && parent_node.children.len() >= capacity
        {
            return Err(RigError::CapacityExceeded {
                kind: CapacityKind::Children,
                capacity,
            });
        }

        node.parent = Some(parent);
        node.children.clear();
        let handle = self.nodes.insert(node);
        self.nodes[parent].children.push(handle);
        self.mark_stale();
        log::trace!("Attached node {handle:?} to {parent:?}");
        Ok(handle)
    }

    // ========================================================================
    // Per-frame pipeline
    // ========================================================================

    /// Update pass: advances every clip by `dt` seconds.
    ///
    /// A negative or non-finite `dt` is ignored.
    pub fn update(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Ignoring invalid delta time {dt}");
            return;
        }
        AnimationSystem::update(&mut self.nodes, dt);
        self.phase = FramePhase::Updated;
    }

    /// Solve pass: recomputes every global transform, root to leaf.
    ///
    /// Reports [`OrderingViolation::SolveWithoutUpdate`] when nothing changed
    /// since the previous solve.
    pub fn solve(&mut self) -> Result<()> {
        let repeated = self.phase == FramePhase::Solved;
        transform_system::solve_hierarchy(&mut self.nodes, &self.roots);
        self.phase = FramePhase::Solved;

        if repeated {
            log::warn!("Rig solved twice without an update in between");
            return Err(OrderingViolation::SolveWithoutUpdate.into());
        }
        Ok(())
    }

    /// Calls `target` once per node, in pre-order, with the node's global
    /// matrix and `mesh`.
    ///
    /// Reports [`OrderingViolation::ReadBeforeSolve`] when the globals are
    /// stale.
    pub fn draw<M, T>(&self, target: &mut T, mesh: &M) -> Result<()>
    where
        M: ?Sized,
        T: DrawTarget<M> + ?Sized,
    {
        for (_, node) in self.iter_preorder() {
            target.draw(mesh, &node.global);
        }
        self.check_solved()
    }

    /// Calls `visitor` once per node, in pre-order.
    ///
    /// Same staleness reporting as [`draw`](Self::draw).
    pub fn visit<F>(&self, mut visitor: F) -> Result<()>
    where
        F: FnMut(NodeHandle, &TransformNode),
    {
        for (handle, node) in self.iter_preorder() {
            visitor(handle, node);
        }
        self.check_solved()
    }

    /// Pre-order iterator over every node.
    #[must_use]
    pub fn iter_preorder(&self) -> PreorderIter<'_> {
        PreorderIter::new(&self.nodes, &self.roots)
    }

    fn check_solved(&self) -> Result<()> {
        if self.phase == FramePhase::Solved {
            Ok(())
        } else {
            log::warn!("Reading global transforms in phase {:?}", self.phase);
            Err(OrderingViolation::ReadBeforeSolve.into())
        }
    }

    fn mark_stale(&mut self) {
        if self.phase == FramePhase::Solved {
            self.phase = FramePhase::Updated;
        }
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Removes `handle` and its whole subtree, children before parents.
    /// Returns the number of nodes released.
    pub fn remove_subtree(&mut self, handle: NodeHandle) -> Result<usize> {
        let parent = self
            .nodes
            .get(handle)
            .ok_or(RigError::NodeNotFound(handle))?
            .parent;

        match parent {
            Some(parent) => {
                if let Some(parent_node) = self.nodes.get_mut(parent)
                    && let Some(pos) = parent_node.children.iter().position(|&c| c == handle)
                {
                    parent_node.children.remove(pos);
                }
            }
            None => self.roots.retain(|&root| root != handle),
        }

        // (node, children already pushed)
        let mut stack = vec![(handle, false)];
        let mut released = 0;
        while let Some((current, expanded)) = stack.pop() {
            if expanded {
                if self.nodes.remove(current).is_some() {
                    released += 1;
                }
                continue;
            }
            stack.push((current, true));
            if let Some(node) = self.nodes.get(current) {
                stack.extend(node.children.iter().map(|&child| (child, false)));
            }
        }

        log::debug!("Released subtree {handle:?} ({released} nodes)");
        Ok(released)
    }

    /// Removes every node. Returns the number released; zero on an empty rig.
    pub fn clear(&mut self) -> usize {
        let roots = std::mem::take(&mut self.roots);
        let released = roots
            .into_iter()
            .filter_map(|root| self.remove_subtree(root).ok())
            .sum();
        self.phase = FramePhase::Built;
        released
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn node(&self, handle: NodeHandle) -> Option<&TransformNode> {
        self.nodes.get(handle)
    }

    /// Mutable access for names and clips. Hierarchy and transforms stay
    /// behind the rig's own methods.
    #[inline]
    pub fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut TransformNode> {
        self.nodes.get_mut(handle)
    }

    /// The underlying arena, for the free functions in
    /// [`transform_system`](crate::scene::transform_system).
    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &SlotMap<NodeHandle, TransformNode> {
        &self.nodes
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn roots(&self) -> &[NodeHandle] {
        &self.roots
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &RigSettings {
        &self.settings
    }

    #[must_use]
    pub fn parent(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.nodes.get(handle).and_then(TransformNode::parent)
    }

    #[must_use]
    pub fn children(&self, handle: NodeHandle) -> &[NodeHandle] {
        self.nodes
            .get(handle)
            .map(TransformNode::children)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn local_transform(&self, handle: NodeHandle) -> Option<Mat4> {
        self.nodes.get(handle).map(|n| n.local)
    }

    /// World matrix from the latest solve.
    #[must_use]
    pub fn global_transform(&self, handle: NodeHandle) -> Option<Mat4> {
        self.nodes.get(handle).map(|n| n.global)
    }

    /// Overwrites a node's local matrix. On an animated node the next update
    /// overwrites it again.
    pub fn set_local_transform(&mut self, handle: NodeHandle, local: Mat4) -> Result<()> {
        let node = self
            .nodes
            .get_mut(handle)
            .ok_or(RigError::NodeNotFound(handle))?;
        node.local = local;
        self.mark_stale();
        Ok(())
    }

    /// First node in pre-order with the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.iter_preorder()
            .find(|(_, node)| node.name == name)
            .map(|(handle, _)| handle)
    }
}
