//! Error Types
//!
//! Per-frame evaluation never fails: missing nodes, empty tracks and
//! degenerate clips all collapse to identity. The only fallible surface is
//! the import boundary, where descriptor data is validated before it is
//! turned into immutable clips and scenes.
//!
//! # Usage
//!
//! ```rust,ignore
//! use myth_skeletal::errors::{SkeletalError, Result};
//!
//! fn load(json: &str) -> Result<()> {
//!     let (_scene, _clips) = myth_skeletal::assets::load_scene_json(json)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The error type for importing skeletal animation data.
#[derive(Error, Debug)]
pub enum SkeletalError {
    // ========================================================================
    // Keyframe Data Errors
    // ========================================================================
    /// Key times of a track are not sorted ascending.
    #[error("Keyframes of channel '{channel}' ({track}) are not sorted by time")]
    UnsortedKeyframes {
        /// Node name of the offending channel
        channel: String,
        /// Which component track (position, rotation, scale)
        track: &'static str,
    },

    /// A track has a different number of times and values.
    #[error(
        "Channel '{channel}' ({track}) has {times} key times but {values} values"
    )]
    KeyCountMismatch {
        channel: String,
        track: &'static str,
        times: usize,
        values: usize,
    },

    // ========================================================================
    // Scene Graph Errors
    // ========================================================================
    /// Two nodes share the same name, making name lookup ambiguous.
    #[error("Duplicate node name: {0}")]
    DuplicateNodeName(String),

    /// A node refers to a parent that does not exist.
    #[error("Node '{node}' refers to unknown parent '{parent}'")]
    UnknownParent { node: String, parent: String },

    /// A bone offset matrix does not have 16 elements.
    #[error("Offset matrix of bone '{bone}' has {len} elements, expected 16")]
    InvalidMatrix { bone: String, len: usize },

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias for `Result<T, SkeletalError>`.
pub type Result<T> = std::result::Result<T, SkeletalError>;
