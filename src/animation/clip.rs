use glam::{Quat, Vec3, Vec4};

use crate::animation::tracks::{KeyframeCursor, KeyframeTrack};
use crate::animation::values::normalize_or_identity;
use crate::errors::{Result, SkeletalError};
use crate::scene::transform::Transform;

/// Per-channel cursors, one for each component track.
#[derive(Debug, Clone, Default)]
pub struct ChannelCursor {
    pub position: KeyframeCursor,
    pub rotation: KeyframeCursor,
    pub scale: KeyframeCursor,
}

impl ChannelCursor {
    pub fn reset(&mut self) {
        self.position.reset();
        self.rotation.reset();
        self.scale.reset();
    }
}

/// Keyframes driving one node's translation, rotation and scale.
///
/// The three tracks are independent: their key counts and key times need
/// not match.
#[derive(Debug, Clone)]
pub struct ChannelTrack {
    pub node_name: String,
    pub position_keys: KeyframeTrack<Vec3>,
    pub rotation_keys: KeyframeTrack<Quat>,
    pub scaling_keys: KeyframeTrack<Vec3>,
}

impl ChannelTrack {
    #[must_use]
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            position_keys: KeyframeTrack::empty(),
            rotation_keys: KeyframeTrack::empty(),
            scaling_keys: KeyframeTrack::empty(),
        }
    }

    #[must_use]
    pub fn with_position_keys(mut self, track: KeyframeTrack<Vec3>) -> Self {
        self.position_keys = track;
        self
    }

    #[must_use]
    pub fn with_rotation_keys(mut self, track: KeyframeTrack<Quat>) -> Self {
        self.rotation_keys = track;
        self
    }

    #[must_use]
    pub fn with_scaling_keys(mut self, track: KeyframeTrack<Vec3>) -> Self {
        self.scaling_keys = track;
        self
    }

    /// Evaluates all three tracks at `time` (ticks).
    ///
    /// Empty tracks contribute their identity component.
    #[must_use]
    pub fn sample_local(&self, time: f64) -> Transform {
        Transform::from_components(
            self.position_keys.sample(time).unwrap_or(Vec3::ZERO),
            renormalize(self.rotation_keys.sample(time)),
            self.scaling_keys.sample(time).unwrap_or(Vec3::ONE),
        )
    }

    /// Same as [`sample_local`](Self::sample_local), reusing per-track cursors.
    pub fn sample_local_with_cursor(&self, time: f64, cursor: &mut ChannelCursor) -> Transform {
        Transform::from_components(
            self.position_keys
                .sample_with_cursor(time, &mut cursor.position)
                .unwrap_or(Vec3::ZERO),
            renormalize(self.rotation_keys.sample_with_cursor(time, &mut cursor.rotation)),
            self.scaling_keys
                .sample_with_cursor(time, &mut cursor.scale)
                .unwrap_or(Vec3::ONE),
        )
    }

    /// Latest key time across the three tracks.
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.position_keys
            .end_time()
            .max(self.rotation_keys.end_time())
            .max(self.scaling_keys.end_time())
    }

    fn validate(&self) -> Result<()> {
        check_track(&self.node_name, "position", &self.position_keys)?;
        check_track(&self.node_name, "rotation", &self.rotation_keys)?;
        check_track(&self.node_name, "scale", &self.scaling_keys)
    }
}

fn renormalize(rotation: Option<Quat>) -> Quat {
    rotation.map_or(Quat::IDENTITY, |q| normalize_or_identity(Vec4::from(q)))
}

fn check_track<T: crate::animation::values::Interpolatable>(
    channel: &str,
    track_name: &'static str,
    track: &KeyframeTrack<T>,
) -> Result<()> {
    if track.values.len() != track.expected_value_count() {
        return Err(SkeletalError::KeyCountMismatch {
            channel: channel.to_string(),
            track: track_name,
            times: track.times.len(),
            values: track.values.len(),
        });
    }
    if !track.is_sorted() {
        return Err(SkeletalError::UnsortedKeyframes {
            channel: channel.to_string(),
            track: track_name,
        });
    }
    Ok(())
}

/// An immutable keyframe animation, shared between players via `Arc`.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration_ticks: f64,
    pub ticks_per_second: f64,
    pub channels: Vec<ChannelTrack>,
}

impl AnimationClip {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        duration_ticks: f64,
        ticks_per_second: f64,
        channels: Vec<ChannelTrack>,
    ) -> Self {
        Self {
            name: name.into(),
            duration_ticks,
            ticks_per_second,
            channels,
        }
    }

    /// Builds a clip whose duration is the latest key time of any channel.
    #[must_use]
    pub fn from_channels(name: impl Into<String>, ticks_per_second: f64, channels: Vec<ChannelTrack>) -> Self {
        let duration_ticks = channels
            .iter()
            .map(ChannelTrack::end_time)
            .fold(0.0_f64, f64::max);
        Self::new(name, duration_ticks, ticks_per_second, channels)
    }

    /// Tick rate to advance with; non-positive rates use `fallback`.
    #[inline]
    #[must_use]
    pub fn effective_ticks_per_second(&self, fallback: f64) -> f64 {
        if self.ticks_per_second > 0.0 {
            self.ticks_per_second
        } else {
            fallback
        }
    }

    /// Clip length in seconds at the effective tick rate.
    #[must_use]
    pub fn duration_seconds(&self, fallback_ticks_per_second: f64) -> f64 {
        self.duration_ticks / self.effective_ticks_per_second(fallback_ticks_per_second)
    }

    /// Checks that every track is sorted and has a matching value count.
    pub fn validate(&self) -> Result<()> {
        self.channels.iter().try_for_each(ChannelTrack::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::tracks::InterpolationMode;

    #[test]
    fn empty_channel_samples_identity() {
        let channel = ChannelTrack::new("Hips");
        let local = channel.sample_local(3.0);
        assert_eq!(local.position, Vec3::ZERO);
        assert_eq!(local.rotation, Quat::IDENTITY);
        assert_eq!(local.scale, Vec3::ONE);
    }

    #[test]
    fn unnormalized_rotation_key_is_renormalized() {
        let channel = ChannelTrack::new("Hips").with_rotation_keys(KeyframeTrack::from_keys(&[(
            0.0,
            Quat::from_xyzw(0.0, 0.0, 0.0, 2.0),
        )]));
        let local = channel.sample_local(0.0);
        assert!((local.rotation.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn duration_from_channels_uses_latest_key() {
        let clip = AnimationClip::from_channels(
            "walk",
            30.0,
            vec![
                ChannelTrack::new("a").with_position_keys(KeyframeTrack::from_keys(&[(0.0, Vec3::ZERO), (12.0, Vec3::X)])),
                ChannelTrack::new("b").with_scaling_keys(KeyframeTrack::from_keys(&[(20.0, Vec3::ONE)])),
            ],
        );
        assert_eq!(clip.duration_ticks, 20.0);
    }

    #[test]
    fn fallback_tick_rate_applies_to_non_positive_rates() {
        let clip = AnimationClip::new("c", 10.0, 0.0, Vec::new());
        assert_eq!(clip.effective_ticks_per_second(25.0), 25.0);
        let clip = AnimationClip::new("c", 10.0, -4.0, Vec::new());
        assert_eq!(clip.effective_ticks_per_second(25.0), 25.0);
    }

    #[test]
    fn validate_rejects_unsorted_and_mismatched_tracks() {
        let unsorted = AnimationClip::new(
            "bad",
            2.0,
            1.0,
            vec![ChannelTrack::new("n").with_position_keys(KeyframeTrack::from_keys(&[(2.0, Vec3::ZERO), (1.0, Vec3::X)]))],
        );
        assert!(matches!(unsorted.validate(), Err(SkeletalError::UnsortedKeyframes { .. })));

        let mismatched = AnimationClip::new(
            "bad",
            2.0,
            1.0,
            vec![ChannelTrack::new("n").with_scaling_keys(KeyframeTrack::new(
                vec![0.0, 1.0],
                vec![Vec3::ONE, Vec3::ONE],
                InterpolationMode::CubicSpline,
            ))],
        );
        assert!(matches!(
            mismatched.validate(),
            Err(SkeletalError::KeyCountMismatch { times: 2, values: 2, .. })
        ));
    }
}
