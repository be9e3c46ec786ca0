//! Asset Module
//!
//! Import-boundary helpers. Everything here may fail; everything downstream
//! of it is infallible.

pub mod descriptor;

pub use descriptor::{
    BoneDescriptor, ChannelDescriptor, ClipDescriptor, MeshDescriptor, NodeDescriptor, SceneDescriptor,
    load_scene_json,
};
