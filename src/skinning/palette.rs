use glam::Mat4;
use slotmap::SecondaryMap;

use crate::scene::MeshKey;

/// Final bone matrices for every skinned mesh of a scene.
///
/// Each mesh gets one matrix per bone, indexed by the bone's position in
/// the mesh's bone list. Rebuilt on demand; never cached across frames.
#[derive(Debug, Clone, Default)]
pub struct BoneMatrices {
    skins: SecondaryMap<MeshKey, Vec<Mat4>>,
}

impl BoneMatrices {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, mesh: MeshKey, matrices: Vec<Mat4>) {
        self.skins.insert(mesh, matrices);
    }

    /// Matrix for bone `index` of `mesh`.
    #[inline]
    #[must_use]
    pub fn get(&self, mesh: MeshKey, index: usize) -> Option<Mat4> {
        self.skins.get(mesh).and_then(|m| m.get(index)).copied()
    }

    /// All matrices of `mesh`, in bone-index order.
    #[inline]
    #[must_use]
    pub fn matrices(&self, mesh: MeshKey) -> Option<&[Mat4]> {
        self.skins.get(mesh).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeshKey, &[Mat4])> {
        self.skins.iter().map(|(key, m)| (key, m.as_slice()))
    }

    /// Number of skinned meshes.
    #[inline]
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.skins.len()
    }

    /// Total number of bone matrices across all meshes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.skins.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fixed-size, column-major palette for uploading `mesh`'s bones.
    ///
    /// Always `max_bones` entries long. Slots past the mesh's bone count are
    /// identity so the shader never reads uninitialized data; bones past
    /// `max_bones` do not fit and are dropped.
    #[must_use]
    pub fn to_gpu_palette(&self, mesh: MeshKey, max_bones: usize) -> Vec<[f32; 16]> {
        let mut palette = vec![Mat4::IDENTITY.to_cols_array(); max_bones];
        let Some(matrices) = self.skins.get(mesh) else {
            return palette;
        };

        if matrices.len() > max_bones {
            log::warn!(
                "Mesh {mesh:?} has {} bones, palette holds {max_bones}; extra bones dropped",
                matrices.len()
            );
        }

        for (slot, matrix) in palette.iter_mut().zip(matrices) {
            *slot = matrix.to_cols_array();
        }
        palette
    }
}
