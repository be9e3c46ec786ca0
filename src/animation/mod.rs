//! Keyframe Animation
//!
//! Evaluates clips into per-node transforms:
//! - `tracks`: keyframe search and interpolation for one component
//! - `clip`: channels (position/rotation/scale per node) and clips
//! - `binder`: resolves channel names to scene nodes once at load time
//! - `player`: per-entity playback state and pose evaluation
//! - `pose`: the per-frame node → transform map

pub mod binder;
pub mod clip;
pub mod player;
pub mod pose;
pub mod tracks;
pub mod values;

pub use binder::{Binder, BoundClip, ChannelBinding};
pub use clip::{AnimationClip, ChannelCursor, ChannelTrack};
pub use player::{AnimationPlayer, LoopMode, PlaybackState};
pub use pose::NodeTransformMap;
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::{Interpolatable, slerp_shortest};
