use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::scene::mesh::Mesh;
use crate::scene::node::Node;
use crate::scene::{MeshKey, NodeHandle};
use crate::settings::{AnimationSettings, BoneResolutionMode};

/// The imported scene graph as seen by animation and skinning.
///
/// Node names are resolved to [`NodeHandle`]s once, when clips are bound and
/// meshes are added, so per-frame work indexes arrays instead of hashing
/// strings.
#[derive(Debug, Default)]
pub struct Scene {
    pub(crate) nodes: SlotMap<NodeHandle, Node>,
    pub(crate) root_nodes: Vec<NodeHandle>,
    pub(crate) meshes: SlotMap<MeshKey, Mesh>,

    names: FxHashMap<String, NodeHandle>,
    bone_resolution: BoneResolutionMode,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scene whose bone matrices use `mode`. The mode cannot change afterwards.
    #[must_use]
    pub fn with_bone_resolution(mode: BoneResolutionMode) -> Self {
        Self {
            bone_resolution: mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_settings(settings: &AnimationSettings) -> Self {
        Self::with_bone_resolution(settings.bone_resolution)
    }

    #[inline]
    #[must_use]
    pub fn bone_resolution(&self) -> BoneResolutionMode {
        self.bone_resolution
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Adds a root node.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.insert_named(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds `child` under `parent`. An unknown parent makes the child a root.
    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        if !self.nodes.contains_key(parent) {
            log::warn!("Parent {parent:?} of node '{}' not found, adding as root", child.name);
            return self.add_node(child);
        }

        let handle = self.insert_named(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        if let Some(c) = self.nodes.get_mut(handle) {
            c.parent = Some(parent);
        }
        handle
    }

    fn insert_named(&mut self, node: Node) -> NodeHandle {
        let name = node.name.clone();
        let handle = self.nodes.insert(node);
        // First registration wins so existing bindings stay valid.
        if self.names.contains_key(&name) {
            log::warn!("Duplicate node name '{name}', lookups keep the first node");
        } else {
            self.resolve_pending_bones(&name, handle);
            self.names.insert(name, handle);
        }
        handle
    }

    /// Binds bones of already-added meshes that were waiting on `name`.
    fn resolve_pending_bones(&mut self, name: &str, handle: NodeHandle) {
        for (_, mesh) in &mut self.meshes {
            for bone in mesh.bones.iter_mut().filter(|b| b.node.is_none() && b.name == name) {
                bone.node = Some(handle);
            }
        }
    }

    /// Renames a node and keeps name lookups in sync.
    ///
    /// Returns `false` if the handle is unknown or `name` belongs to another node.
    pub fn rename_node(&mut self, handle: NodeHandle, name: impl Into<String>) -> bool {
        let name = name.into();
        match self.names.get(name.as_str()) {
            Some(&owner) if owner != handle => return false,
            Some(_) => return true,
            None => {}
        }
        let Some(node) = self.nodes.get_mut(handle) else {
            return false;
        };

        let old = std::mem::replace(&mut node.name, name.clone());
        if self.names.get(old.as_str()) == Some(&handle) {
            self.names.remove(old.as_str());
        }
        self.resolve_pending_bones(&name, handle);
        self.names.insert(name, handle);
        true
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    #[must_use]
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.names.get(name).copied()
    }

    #[inline]
    #[must_use]
    pub fn root_nodes(&self) -> &[NodeHandle] {
        &self.root_nodes
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ========================================================================
    // Meshes
    // ========================================================================

    /// Adds a mesh and resolves each bone's name to its node.
    ///
    /// Bones naming no node resolve to their bind pose until a node with that
    /// name is added.
    pub fn add_mesh(&mut self, mut mesh: Mesh) -> MeshKey {
        for bone in &mut mesh.bones {
            bone.node = self.names.get(bone.name.as_str()).copied();
            if bone.node.is_none() {
                log::debug!("Bone '{}' of mesh '{}' has no matching node", bone.name, mesh.name);
            }
        }
        self.meshes.insert(mesh)
    }

    #[inline]
    #[must_use]
    pub fn get_mesh(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    pub fn meshes(&self) -> impl Iterator<Item = (MeshKey, &Mesh)> {
        self.meshes.iter()
    }
}
