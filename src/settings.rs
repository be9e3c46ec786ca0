//! Animation Settings
//!
//! Runtime configuration shared by [`AnimationPlayer`](crate::animation::AnimationPlayer)
//! and [`Scene`](crate::scene::Scene).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use myth_skeletal::settings::{AnimationSettings, BoneResolutionMode};
//!
//! let settings = AnimationSettings {
//!     max_bones: 64,
//!     bone_resolution: BoneResolutionMode::HierarchicalCompose,
//!     ..Default::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

use crate::animation::LoopMode;

/// Tick rate used when a clip reports `ticks_per_second <= 0`.
pub const DEFAULT_TICKS_PER_SECOND: f64 = 25.0;

/// Number of bone matrices the skinning palette holds by default.
pub const DEFAULT_MAX_BONES: usize = 128;

// ---------------------------------------------------------------------------
// BoneResolutionMode
// ---------------------------------------------------------------------------

/// How animated node transforms become bone matrices.
///
/// The choice belongs to the asset pipeline and is made once per scene at
/// import time. Mixing the two for the same skeleton produces incorrect
/// skinning.
///
/// | Mode                  | Bone matrix                                          |
/// |-----------------------|------------------------------------------------------|
/// | `FlatLookup`          | `pose[bone] · offset`                                |
/// | `HierarchicalCompose` | `parentGlobal · bindLocal · pose[bone] · offset`     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoneResolutionMode {
    /// Each channel already encodes a bone-space-ready transform; the node
    /// hierarchy is ignored.
    #[default]
    FlatLookup,
    /// Walk the node tree from the roots and compose parent, bind and
    /// animated transforms.
    HierarchicalCompose,
}

// ---------------------------------------------------------------------------
// AnimationSettings
// ---------------------------------------------------------------------------

/// Configuration for playback and bone resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Tick rate substituted for clips without a usable `ticks_per_second`.
    pub fallback_ticks_per_second: f64,
    /// Loop mode new players start with.
    pub default_loop_mode: LoopMode,
    /// Size of the fixed GPU bone palette.
    pub max_bones: usize,
    /// Bone resolution semantics for scenes built with these settings.
    pub bone_resolution: BoneResolutionMode,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            fallback_ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            default_loop_mode: LoopMode::Loop,
            max_bones: DEFAULT_MAX_BONES,
            bone_resolution: BoneResolutionMode::FlatLookup,
        }
    }
}
