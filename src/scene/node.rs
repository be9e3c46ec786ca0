use glam::Mat4;
use smallvec::SmallVec;

use crate::scene::NodeHandle;
use crate::scene::transform::Transform;

/// A named node of the imported hierarchy.
///
/// # Hierarchy
///
/// - `parent`: Optional handle to parent node (None for root nodes)
/// - `children`: Child handles, in import order
///
/// The bind transform is the node's local rest pose as imported. It is only
/// read by [`BoneResolutionMode::HierarchicalCompose`](crate::settings::BoneResolutionMode).
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: SmallVec<[NodeHandle; 4]>,
    pub bind_transform: Transform,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: SmallVec::new(),
            bind_transform: Transform::IDENTITY,
        }
    }

    #[must_use]
    pub fn with_bind_transform(mut self, transform: Transform) -> Self {
        self.bind_transform = transform;
        self
    }

    /// Renamed only through [`Scene::rename_node`](crate::scene::Scene::rename_node).
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn bind_matrix(&self) -> Mat4 {
        self.bind_transform.to_matrix()
    }
}
