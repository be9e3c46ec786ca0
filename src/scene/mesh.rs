use glam::Mat4;

use crate::scene::NodeHandle;

/// One bone of a skinned mesh.
///
/// Its position in [`Mesh::bones`] is the joint index the vertex shader
/// addresses.
#[derive(Debug, Clone)]
pub struct BoneEntry {
    pub name: String,
    /// Inverse of the bone's rest-pose world transform.
    pub offset_matrix: Mat4,
    /// Node this bone follows; filled in by [`Scene::add_mesh`](crate::scene::Scene::add_mesh).
    pub(crate) node: Option<NodeHandle>,
}

impl BoneEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, offset_matrix: Mat4) -> Self {
        Self {
            name: name.into(),
            offset_matrix,
            node: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn node(&self) -> Option<NodeHandle> {
        self.node
    }
}

/// The skinning-relevant part of an imported mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub name: String,
    pub bones: Vec<BoneEntry>,
}

impl Mesh {
    #[must_use]
    pub fn new(name: impl Into<String>, bones: Vec<BoneEntry>) -> Self {
        Self {
            name: name.into(),
            bones,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_skinned(&self) -> bool {
        !self.bones.is_empty()
    }
}
