use glam::Mat4;

/// The external draw collaborator.
///
/// Invoked once per node with the node's world matrix and the mesh reference
/// handed to [`Rig::draw`](super::Rig::draw). Owns all graphics-API state;
/// this crate only supplies matrices.
pub trait DrawTarget<M: ?Sized> {
    fn draw(&mut self, mesh: &M, model: &Mat4);
}

impl<M: ?Sized, F> DrawTarget<M> for F
where
    F: FnMut(&M, &Mat4),
{
    fn draw(&mut self, mesh: &M, model: &Mat4) {
        self(mesh, model);
    }
}
