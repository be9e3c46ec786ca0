//! # Myth Skeletal
//!
//! Skeletal animation evaluation and bone-matrix resolution.
//!
//! ```text
//! AnimationClip + dt ──► AnimationPlayer ──► NodeTransformMap
//!                                                  │
//!                 Scene (meshes, bones) ──► calculate_bone_transforms ──► BoneMatrices ──► GPU palette
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use myth_skeletal::prelude::*;
//!
//! let (scene, clips) = load_scene_json(json)?;
//! let walk = Arc::new(Binder::bind(&scene, clips[0].clone()));
//!
//! let mut player = AnimationPlayer::new();
//! player.play(walk);
//!
//! // every frame
//! player.update(dt);
//! let bones = calculate_bone_transforms(&scene, player.pose());
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod assets;
pub mod errors;
pub mod scene;
pub mod settings;
pub mod skinning;

pub use animation::{AnimationClip, AnimationPlayer, Binder, BoundClip, ChannelTrack, KeyframeTrack, LoopMode};
pub use errors::{Result, SkeletalError};
pub use scene::{BoneEntry, Mesh, Node, NodeHandle, Scene};
pub use settings::{AnimationSettings, BoneResolutionMode};
pub use skinning::{BoneMatrices, calculate_bone_transforms};

pub mod prelude {
    pub use crate::animation::{
        AnimationClip, AnimationPlayer, Binder, BoundClip, ChannelTrack, InterpolationMode, KeyframeTrack,
        LoopMode, NodeTransformMap,
    };
    pub use crate::assets::load_scene_json;
    pub use crate::scene::{BoneEntry, Mesh, MeshKey, Node, NodeHandle, Scene, Transform};
    pub use crate::settings::{AnimationSettings, BoneResolutionMode};
    pub use crate::skinning::{BoneMatrices, calculate_bone_transforms};
}
