use glam::{Mat4, Quat, Vec3};

/// Translation, rotation and scale of a single node.
///
/// Used both for a node's bind-pose local transform and for the pose a
/// channel produces at a given time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn new() -> Self {
        Self::IDENTITY
    }

    #[inline]
    #[must_use]
    pub fn from_components(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    #[must_use]
    pub fn from_translation(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Decomposes an affine matrix. Shear is lost.
    #[must_use]
    pub fn from_matrix(mat: Mat4) -> Self {
        let (scale, rotation, position) = mat.to_scale_rotation_translation();
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// `T · R · S` as a column-major matrix.
    #[inline]
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        compose_local_transform(self.position, self.rotation, self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds `Translation(position) · Rotation(rotation) · Scale(scale)`.
///
/// Applied to a column vector, scale acts first and translation last. The
/// order is fixed; imported assets depend on it.
#[inline]
#[must_use]
pub fn compose_local_transform(position: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
    Mat4::from_translation(position) * Mat4::from_quat(rotation) * Mat4::from_scale(scale)
}
