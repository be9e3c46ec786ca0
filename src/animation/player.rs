use std::sync::Arc;

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::animation::binder::BoundClip;
use crate::animation::clip::ChannelCursor;
use crate::animation::pose::NodeTransformMap;
use crate::scene::NodeHandle;
use crate::settings::AnimationSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoopMode {
    /// Wrap to the start when the end is reached.
    #[default]
    Loop,
    /// Hold the last frame and stop playing.
    Once,
}

/// Time and play flag of one player.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackState {
    pub current_time_ticks: f64,
    pub is_playing: bool,
}

/// Plays one clip for one animated entity.
///
/// Each entity owns its player; players share only the immutable clip.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    active: Option<Arc<BoundClip>>,
    state: PlaybackState,

    pub time_scale: f64,
    pub loop_mode: LoopMode,
    fallback_ticks_per_second: f64,

    cursors: Vec<ChannelCursor>,
    pose: NodeTransformMap,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(&AnimationSettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: &AnimationSettings) -> Self {
        Self {
            active: None,
            state: PlaybackState::default(),
            time_scale: 1.0,
            loop_mode: settings.default_loop_mode,
            fallback_ticks_per_second: settings.fallback_ticks_per_second,
            cursors: Vec::new(),
            pose: NodeTransformMap::new(),
        }
    }

    // ========================================================================
    // Playback control
    // ========================================================================

    /// Starts `clip` from tick 0.
    ///
    /// The pose of any previous clip is discarded; the new pose is available
    /// after the next [`update`](Self::update).
    pub fn play(&mut self, clip: Arc<BoundClip>) {
        self.cursors.clear();
        self.cursors.resize(clip.bindings().len(), ChannelCursor::default());
        self.pose.clear();

        self.active = Some(clip);
        self.state = PlaybackState {
            current_time_ticks: 0.0,
            is_playing: true,
        };
    }

    pub fn pause(&mut self) {
        self.state.is_playing = false;
    }

    pub fn resume(&mut self) {
        self.state.is_playing = true;
    }

    /// Stops advancing. The current time is kept; `seek(0.0)` rewinds.
    pub fn stop(&mut self) {
        self.state.is_playing = false;
    }

    /// Jumps to `ticks` and re-evaluates the pose there.
    pub fn seek(&mut self, ticks: f64) {
        self.state.current_time_ticks = ticks;
        if let Some(bound) = self.active.as_ref() {
            evaluate(bound, ticks, &mut self.cursors, &mut self.pose);
        }
    }

    /// Advances time by `dt_seconds` and recomputes the node transforms.
    ///
    /// Does nothing while paused or without a clip. Clips with a
    /// non-positive duration never wrap.
    pub fn update(&mut self, dt_seconds: f64) {
        if !self.state.is_playing {
            return;
        }
        let Some(bound) = self.active.as_ref() else {
            return;
        };

        let clip = bound.clip();
        let ticks_per_second = clip.effective_ticks_per_second(self.fallback_ticks_per_second);
        let duration = clip.duration_ticks;

        let mut time = self.state.current_time_ticks + dt_seconds * ticks_per_second * self.time_scale;

        if duration > 0.0 {
            match self.loop_mode {
                LoopMode::Loop => {
                    if time >= duration || time < 0.0 {
                        time = time.rem_euclid(duration);
                        // A tiny negative time rounds up to exactly `duration`.
                        if time >= duration {
                            time = 0.0;
                        }
                    }
                }
                LoopMode::Once => {
                    if time >= duration || time < 0.0 {
                        time = time.clamp(0.0, duration);
                        self.state.is_playing = false;
                    }
                }
            }
        }

        self.state.current_time_ticks = time;
        evaluate(bound, time, &mut self.cursors, &mut self.pose);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn current_time_ticks(&self) -> f64 {
        self.state.current_time_ticks
    }

    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    #[inline]
    #[must_use]
    pub fn active_clip(&self) -> Option<&Arc<BoundClip>> {
        self.active.as_ref()
    }

    /// Node transforms of the last evaluation.
    #[inline]
    #[must_use]
    pub fn pose(&self) -> &NodeTransformMap {
        &self.pose
    }

    #[inline]
    #[must_use]
    pub fn node_transform(&self, node: NodeHandle) -> Mat4 {
        self.pose.transform_or_identity(node)
    }

    /// Animated transform of the node named `name`; identity when the
    /// active clip does not drive it.
    #[must_use]
    pub fn get_node_transform(&self, name: &str) -> Mat4 {
        self.active
            .as_ref()
            .and_then(|bound| bound.node_for(name))
            .map_or(Mat4::IDENTITY, |node| self.pose.transform_or_identity(node))
    }
}

fn evaluate(bound: &BoundClip, time: f64, cursors: &mut [ChannelCursor], pose: &mut NodeTransformMap) {
    let clip = bound.clip();
    pose.clear();

    for (binding, cursor) in bound.bindings().iter().zip(cursors.iter_mut()) {
        let channel = &clip.channels[binding.channel_index];
        let local = channel.sample_local_with_cursor(time, cursor);
        pose.insert(binding.node, local.to_matrix());
    }

    log::trace!("Clip '{}' evaluated {} channels at tick {time}", clip.name, bound.bindings().len());
}
