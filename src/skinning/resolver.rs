//! Bone Resolution
//!
//! Turns a frame's [`NodeTransformMap`] into final bone matrices:
//!
//! ```text
//! FlatLookup:          bone = pose[node] · offset
//! HierarchicalCompose: bone = global[node] · offset
//!                      global[node] = global[parent] · bindLocal[node] · pose[node]
//! ```
//!
//! Which formula applies is a property of the scene, chosen at import
//! time. Nodes without a pose entry contribute identity, i.e. their bind pose.

use glam::Mat4;
use slotmap::SecondaryMap;

use crate::animation::pose::NodeTransformMap;
use crate::scene::{Mesh, NodeHandle, Scene};
use crate::settings::BoneResolutionMode;
use crate::skinning::palette::BoneMatrices;

/// Computes one matrix per bone of every skinned mesh in `scene`.
///
/// Pure: calling it twice with the same pose yields identical output.
#[must_use]
pub fn calculate_bone_transforms(scene: &Scene, pose: &NodeTransformMap) -> BoneMatrices {
    match scene.bone_resolution() {
        BoneResolutionMode::FlatLookup => resolve_meshes(scene, |node| pose.get(node)),
        BoneResolutionMode::HierarchicalCompose => {
            let globals = compose_hierarchy(scene, pose);
            resolve_meshes(scene, |node| globals.get(node).copied())
        }
    }
}

fn resolve_meshes(scene: &Scene, lookup: impl Fn(NodeHandle) -> Option<Mat4>) -> BoneMatrices {
    let mut output = BoneMatrices::new();
    for (key, mesh) in scene.meshes().filter(|(_, mesh)| mesh.is_skinned()) {
        output.insert(key, resolve_mesh(mesh, &lookup));
    }
    output
}

fn resolve_mesh(mesh: &Mesh, lookup: &impl Fn(NodeHandle) -> Option<Mat4>) -> Vec<Mat4> {
    mesh.bones
        .iter()
        .map(|bone| {
            let node_transform = bone.node().and_then(lookup).unwrap_or(Mat4::IDENTITY);
            node_transform * bone.offset_matrix
        })
        .collect()
}

/// Global transform of every node reachable from the scene roots.
///
/// Walks top-down with an explicit stack, so deep skeletons cannot overflow
/// the call stack.
#[must_use]
pub fn compose_hierarchy(scene: &Scene, pose: &NodeTransformMap) -> SecondaryMap<NodeHandle, Mat4> {
    let mut globals = SecondaryMap::with_capacity(scene.node_count());
    let mut stack: Vec<(NodeHandle, Mat4)> = Vec::with_capacity(64);

    for &root in scene.root_nodes().iter().rev() {
        stack.push((root, Mat4::IDENTITY));
    }

    while let Some((handle, parent_global)) = stack.pop() {
        let Some(node) = scene.get_node(handle) else {
            continue;
        };

        let global = parent_global * node.bind_matrix() * pose.transform_or_identity(handle);
        globals.insert(handle, global);

        for &child in node.children().iter().rev() {
            stack.push((child, global));
        }
    }

    globals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{BoneEntry, Node, Transform};
    use glam::Vec3;

    #[test]
    fn hierarchy_composes_parent_bind_and_pose() {
        let mut scene = Scene::with_bone_resolution(BoneResolutionMode::HierarchicalCompose);
        let root = scene.add_node(Node::new("Root").with_bind_transform(Transform::from_translation(Vec3::X)));
        let child = scene.add_to_parent(
            Node::new("Child").with_bind_transform(Transform::from_translation(Vec3::Y)),
            root,
        );

        let mut pose = NodeTransformMap::new();
        pose.insert(child, Mat4::from_translation(Vec3::Z));

        let globals = compose_hierarchy(&scene, &pose);
        let p = globals[child].transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(1.0, 1.0, 1.0), 1e-6));
    }

    #[test]
    fn flat_lookup_ignores_parents() {
        let mut scene = Scene::new();
        let root = scene.add_node(Node::new("Root").with_bind_transform(Transform::from_translation(Vec3::X)));
        let child = scene.add_to_parent(Node::new("Child"), root);
        let mesh = scene.add_mesh(Mesh::new("m", vec![BoneEntry::new("Child", Mat4::IDENTITY)]));

        let mut pose = NodeTransformMap::new();
        pose.insert(child, Mat4::from_translation(Vec3::Z));

        let bones = calculate_bone_transforms(&scene, &pose);
        assert_eq!(bones.get(mesh, 0), Some(Mat4::from_translation(Vec3::Z)));
    }
}
