//! Scene Descriptor
//!
//! A JSON description of an already-imported scene: node hierarchy, skinned
//! meshes and keyframe clips. Tools and tests use it to hand data to the
//! animation core without a full glTF/FBX importer.
//!
//! ```json
//! {
//!   "bone_resolution": "FlatLookup",
//!   "nodes": [
//!     { "name": "Root" },
//!     { "name": "Arm", "parent": "Root", "translation": [0.0, 1.0, 0.0] }
//!   ],
//!   "meshes": [
//!     { "name": "Body", "bones": [ { "name": "Arm" } ] }
//!   ],
//!   "clips": [
//!     {
//!       "name": "wave",
//!       "ticks_per_second": 30.0,
//!       "channels": [
//!         { "node": "Arm", "rotation_keys": [[0.0, [0.0, 0.0, 0.0, 1.0]]] }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Matrices are 16 floats, column-major. Quaternions are `[x, y, z, w]`.

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3, Vec4};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::animation::clip::{AnimationClip, ChannelTrack};
use crate::animation::tracks::KeyframeTrack;
use crate::animation::values::normalize_or_identity;
use crate::errors::{Result, SkeletalError};
use crate::scene::{BoneEntry, Mesh, Node, NodeHandle, Scene, Transform};
use crate::settings::BoneResolutionMode;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDescriptor {
    #[serde(default)]
    pub bone_resolution: BoneResolutionMode,
    pub nodes: Vec<NodeDescriptor>,
    #[serde(default)]
    pub meshes: Vec<MeshDescriptor>,
    #[serde(default)]
    pub clips: Vec<ClipDescriptor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub translation: Option<[f32; 3]>,
    #[serde(default)]
    pub rotation: Option<[f32; 4]>,
    #[serde(default)]
    pub scale: Option<[f32; 3]>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshDescriptor {
    pub name: String,
    #[serde(default)]
    pub bones: Vec<BoneDescriptor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoneDescriptor {
    pub name: String,
    /// Column-major inverse bind matrix; identity when absent.
    #[serde(default)]
    pub offset: Option<Vec<f32>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClipDescriptor {
    pub name: String,
    /// Defaults to the latest key time.
    #[serde(default)]
    pub duration_ticks: Option<f64>,
    #[serde(default)]
    pub ticks_per_second: f64,
    #[serde(default)]
    pub channels: Vec<ChannelDescriptor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    pub node: String,
    #[serde(default)]
    pub position_keys: Vec<(f64, [f32; 3])>,
    #[serde(default)]
    pub rotation_keys: Vec<(f64, [f32; 4])>,
    #[serde(default)]
    pub scaling_keys: Vec<(f64, [f32; 3])>,
}

/// Parses and builds a scene plus its clips from JSON.
pub fn load_scene_json(json: &str) -> Result<(Scene, Vec<Arc<AnimationClip>>)> {
    let descriptor: SceneDescriptor = serde_json::from_str(json)?;
    descriptor.build()
}

impl SceneDescriptor {
    /// Validates the descriptor and converts it into runtime structures.
    pub fn build(&self) -> Result<(Scene, Vec<Arc<AnimationClip>>)> {
        let mut scene = Scene::with_bone_resolution(self.bone_resolution);
        self.build_nodes(&mut scene)?;

        for mesh in &self.meshes {
            scene.add_mesh(mesh.build()?);
        }

        let clips = self
            .clips
            .iter()
            .map(|clip| clip.build().map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "Scene descriptor loaded: {} nodes, {} meshes, {} clips",
            scene.node_count(),
            self.meshes.len(),
            clips.len()
        );

        Ok((scene, clips))
    }

    fn build_nodes(&self, scene: &mut Scene) -> Result<()> {
        let mut names = FxHashSet::default();
        for node in &self.nodes {
            if !names.insert(node.name.as_str()) {
                return Err(SkeletalError::DuplicateNodeName(node.name.clone()));
            }
        }
        for node in &self.nodes {
            if let Some(parent) = &node.parent
                && !names.contains(parent.as_str())
            {
                return Err(unknown_parent(node, parent));
            }
        }

        // Parents may be listed after their children; insert in passes.
        let mut handles: FxHashMap<&str, NodeHandle> = FxHashMap::default();
        let mut pending: Vec<&NodeDescriptor> = self.nodes.iter().collect();

        while !pending.is_empty() {
            let before = pending.len();
            pending.retain(|&desc| {
                let node = Node::new(desc.name.as_str()).with_bind_transform(desc.bind_transform());
                let handle = match &desc.parent {
                    None => scene.add_node(node),
                    Some(parent) => match handles.get(parent.as_str()) {
                        Some(&parent_handle) => scene.add_to_parent(node, parent_handle),
                        None => return true,
                    },
                };
                handles.insert(desc.name.as_str(), handle);
                false
            });

            // No progress means the remaining nodes form a parent cycle.
            if pending.len() == before {
                let desc = pending[0];
                let parent = desc.parent.as_deref().unwrap_or_default();
                return Err(unknown_parent(desc, parent));
            }
        }

        Ok(())
    }
}

fn unknown_parent(node: &NodeDescriptor, parent: &str) -> SkeletalError {
    SkeletalError::UnknownParent {
        node: node.name.clone(),
        parent: parent.to_string(),
    }
}

impl NodeDescriptor {
    fn bind_transform(&self) -> Transform {
        Transform::from_components(
            self.translation.map_or(Vec3::ZERO, Vec3::from_array),
            self.rotation
                .map_or(Quat::IDENTITY, |r| normalize_or_identity(Vec4::from_array(r))),
            self.scale.map_or(Vec3::ONE, Vec3::from_array),
        )
    }
}

impl MeshDescriptor {
    fn build(&self) -> Result<Mesh> {
        let bones = self
            .bones
            .iter()
            .map(|bone| -> Result<BoneEntry> {
                let offset = match &bone.offset {
                    None => Mat4::IDENTITY,
                    Some(values) => {
                        let cols: &[f32; 16] =
                            values
                                .as_slice()
                                .try_into()
                                .map_err(|_| SkeletalError::InvalidMatrix {
                                    bone: bone.name.clone(),
                                    len: values.len(),
                                })?;
                        Mat4::from_cols_array(cols)
                    }
                };
                Ok(BoneEntry::new(bone.name.as_str(), offset))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Mesh::new(self.name.as_str(), bones))
    }
}

impl ClipDescriptor {
    fn build(&self) -> Result<AnimationClip> {
        let channels: Vec<ChannelTrack> = self.channels.iter().map(ChannelDescriptor::build).collect();

        let clip = match self.duration_ticks {
            Some(duration) => AnimationClip::new(self.name.as_str(), duration, self.ticks_per_second, channels),
            None => AnimationClip::from_channels(self.name.as_str(), self.ticks_per_second, channels),
        };
        clip.validate()?;
        Ok(clip)
    }
}

impl ChannelDescriptor {
    fn build(&self) -> ChannelTrack {
        let positions: Vec<(f64, Vec3)> = self
            .position_keys
            .iter()
            .map(|&(t, v)| (t, Vec3::from_array(v)))
            .collect();
        let rotations: Vec<(f64, Quat)> = self
            .rotation_keys
            .iter()
            .map(|&(t, v)| (t, normalize_or_identity(Vec4::from_array(v))))
            .collect();
        let scales: Vec<(f64, Vec3)> = self
            .scaling_keys
            .iter()
            .map(|&(t, v)| (t, Vec3::from_array(v)))
            .collect();

        ChannelTrack::new(self.node.as_str())
            .with_position_keys(KeyframeTrack::from_keys(&positions))
            .with_rotation_keys(KeyframeTrack::from_keys(&rotations))
            .with_scaling_keys(KeyframeTrack::from_keys(&scales))
    }
}
