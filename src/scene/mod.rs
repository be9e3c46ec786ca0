//! Scene Graph Module
//!
//! The in-memory shape an importer hands over:
//! - Node: named hierarchy node with a bind-pose local transform
//! - Transform: TRS triple and the `T · R · S` composer
//! - Mesh: bone list (name + offset matrix) in joint-index order
//! - Scene: node and mesh storage plus the name table

pub mod mesh;
pub mod node;
pub mod scene;
pub mod transform;

pub use mesh::{BoneEntry, Mesh};
pub use node::Node;
pub use scene::Scene;
pub use transform::{Transform, compose_local_transform};

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
}
