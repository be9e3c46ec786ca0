use glam::Mat4;
use slotmap::SecondaryMap;

use crate::scene::NodeHandle;

/// Animated local transform per node for the current frame.
///
/// Storage is indexed by the node handle's slot, so lookups are array
/// accesses. Nodes without an animation channel have no entry; callers
/// collapse that to identity at the boundary.
#[derive(Debug, Clone, Default)]
pub struct NodeTransformMap {
    transforms: SecondaryMap<NodeHandle, Mat4>,
}

impl NodeTransformMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn insert(&mut self, node: NodeHandle, transform: Mat4) {
        self.transforms.insert(node, transform);
    }

    #[inline]
    #[must_use]
    pub fn get(&self, node: NodeHandle) -> Option<Mat4> {
        self.transforms.get(node).copied()
    }

    /// The node's animated transform, or identity (bind pose) when it has none.
    #[inline]
    #[must_use]
    pub fn transform_or_identity(&self, node: NodeHandle) -> Mat4 {
        self.get(node).unwrap_or(Mat4::IDENTITY)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, node: NodeHandle) -> bool {
        self.transforms.contains_key(node)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn clear(&mut self) {
        self.transforms.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &Mat4)> {
        self.transforms.iter()
    }
}
