use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::animation::clip::AnimationClip;
use crate::scene::{NodeHandle, Scene};

/// A channel of a clip resolved to the node it drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelBinding {
    pub channel_index: usize,
    pub node: NodeHandle,
}

/// A clip whose channel names have been resolved against one scene.
///
/// Built once at load time; players only index `bindings` afterwards.
#[derive(Debug, Clone)]
pub struct BoundClip {
    clip: Arc<AnimationClip>,
    bindings: Vec<ChannelBinding>,
    // Kept for name-based queries from tooling and bone attachments.
    node_lookup: FxHashMap<String, NodeHandle>,
}

impl BoundClip {
    #[inline]
    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[inline]
    #[must_use]
    pub fn bindings(&self) -> &[ChannelBinding] {
        &self.bindings
    }

    /// Node driven by the channel named `name`, if that channel was bound.
    #[inline]
    #[must_use]
    pub fn node_for(&self, name: &str) -> Option<NodeHandle> {
        self.node_lookup.get(name).copied()
    }
}

pub struct Binder;

impl Binder {
    /// Resolves every channel's node name through the scene's name table.
    ///
    /// Channels naming a node absent from the scene are dropped.
    #[must_use]
    pub fn bind(scene: &Scene, clip: Arc<AnimationClip>) -> BoundClip {
        let mut bindings = Vec::with_capacity(clip.channels.len());
        let mut node_lookup = FxHashMap::default();

        for (channel_index, channel) in clip.channels.iter().enumerate() {
            let Some(node) = scene.find_node_by_name(&channel.node_name) else {
                log::debug!(
                    "Clip '{}': channel '{}' targets no node, skipped",
                    clip.name,
                    channel.node_name
                );
                continue;
            };

            bindings.push(ChannelBinding { channel_index, node });
            node_lookup.insert(channel.node_name.clone(), node);
        }

        BoundClip {
            clip,
            bindings,
            node_lookup,
        }
    }
}
