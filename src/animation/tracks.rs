use serde::{Deserialize, Serialize};

use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationMode {
    #[default]
    Linear,
    Step,
    CubicSpline,
}

const MAX_SCAN_OFFSET: usize = 3;

/// Last bracket index found for a track, so steady playback finds the next
/// bracket in O(1).
#[derive(Debug, Clone, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

impl KeyframeCursor {
    #[inline]
    pub fn reset(&mut self) {
        self.last_index = 0;
    }
}

/// An ordered list of `(time, value)` keys for one transform component.
///
/// Times are in clip ticks and sorted ascending. For `CubicSpline` the values
/// are stored as `[in_tangent, value, out_tangent]` triples, so
/// `values.len() == times.len() * 3`.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f64>,
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> Default for KeyframeTrack<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f64>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Linear track from `(time, value)` pairs.
    #[must_use]
    pub fn from_keys(keys: &[(f64, T)]) -> Self {
        let (times, values) = keys.iter().copied().unzip();
        Self::new(times, values, InterpolationMode::Linear)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), InterpolationMode::Linear)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last key, or `0.0` for an empty track.
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Number of values the interpolation mode requires for the key count.
    #[must_use]
    pub fn expected_value_count(&self) -> usize {
        match self.interpolation {
            InterpolationMode::CubicSpline => self.times.len() * 3,
            _ => self.times.len(),
        }
    }

    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.times.windows(2).all(|w| w[0] <= w[1])
    }

    /// Stateless sampling via binary search.
    ///
    /// Returns `None` only for an empty track.
    #[must_use]
    pub fn sample(&self, time: f64) -> Option<T> {
        match self.times.len() {
            0 => None,
            1 => Some(*self.get_value_at(0)),
            _ => {
                let idx = self.bracket_by_search(time);
                Some(self.sample_at_frame(idx, time))
            }
        }
    }

    /// Sampling with a cached cursor.
    ///
    /// Scans a few keys forward or backward from the cursor before falling
    /// back to binary search. Produces exactly the same value as [`sample`](Self::sample).
    pub fn sample_with_cursor(&self, time: f64, cursor: &mut KeyframeCursor) -> Option<T> {
        let len = self.times.len();
        match len {
            0 => return None,
            1 => return Some(*self.get_value_at(0)),
            _ => {}
        }

        // Cursor may be stale after the track or clip changed.
        let i = cursor.last_index.min(len - 1);
        let t_curr = self.times[i];

        let found_index = if time >= t_curr {
            // Forward: check [i, i+1), [i+1, i+2), ...
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                let idx = i + offset;
                if idx >= len - 1 {
                    if time >= self.times[len - 1] {
                        res = Some(len - 1);
                    }
                    break;
                }
                if time < self.times[idx + 1] {
                    res = Some(idx);
                    break;
                }
            }
            res
        } else {
            // Backward: time < times[i], so the bracket starts left of i.
            let mut res = None;
            for offset in 1..=MAX_SCAN_OFFSET {
                if i < offset {
                    break;
                }
                let idx = i - offset;
                if time >= self.times[idx] {
                    res = Some(idx);
                    break;
                }
            }
            res
        };

        let index = found_index.unwrap_or_else(|| self.bracket_by_search(time));
        cursor.last_index = index;

        Some(self.sample_at_frame(index, time))
    }

    /// Index of the last key with `times[idx] <= time`, clamped to 0.
    fn bracket_by_search(&self, time: f64) -> usize {
        let next_idx = self.times.partition_point(|&t| t <= time);
        next_idx.saturating_sub(1)
    }

    /// For CubicSpline the keyed value sits at `index * 3 + 1`.
    fn get_value_at(&self, index: usize) -> &T {
        match self.interpolation {
            InterpolationMode::CubicSpline => &self.values[index * 3 + 1],
            _ => &self.values[index],
        }
    }

    fn sample_at_frame(&self, index: usize, time: f64) -> T {
        let len = self.times.len();

        // Past the last key: hold, no wrap back to the first key.
        if index >= len - 1 {
            return *self.get_value_at(len - 1);
        }

        let next_idx = index + 1;
        let t0 = self.times[index];
        let t1 = self.times[next_idx];
        let dt = t1 - t0;

        // Zero-length interval (duplicate timestamps) samples the left key.
        let factor = if dt > 0.0 { (time - t0) / dt } else { 0.0 };
        let factor = factor.clamp(0.0, 1.0) as f32;

        match self.interpolation {
            InterpolationMode::Step => *self.get_value_at(index),
            InterpolationMode::Linear => {
                T::interpolate_linear(*self.get_value_at(index), *self.get_value_at(next_idx), factor)
            }
            InterpolationMode::CubicSpline => {
                let i_prev = index * 3;
                let i_next = next_idx * 3;

                let v0 = self.values[i_prev + 1];
                let out_tangent0 = self.values[i_prev + 2];
                let in_tangent1 = self.values[i_next];
                let v1 = self.values[i_next + 1];

                T::interpolate_cubic(v0, out_tangent0, in_tangent1, v1, factor, dt as f32)
            }
        }
    }
}
