//! Skinning Module
//!
//! Maps each mesh's bone list through the animated pose to the flat
//! bone-matrix arrays the renderer uploads for GPU skinning.

pub mod palette;
pub mod resolver;

pub use palette::BoneMatrices;
pub use resolver::{calculate_bone_transforms, compose_hierarchy};
