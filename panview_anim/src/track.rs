// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::easing::Easing;

/// Values that can be linearly interpolated.
pub trait Lerp: Copy {
    /// Value at fraction `t` between `self` (`t == 0`) and `other` (`t == 1`).
    #[must_use]
    fn lerp(self, other: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Point {
    fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

/// A value reached at normalized time `t`.
///
/// `easing` shapes the segment that *ends* at this key; `None` defers to the
/// animation's global easing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe<V> {
    /// Normalized time in `[0, 1]`.
    pub t: f64,
    /// Value at `t`.
    pub value: V,
    /// Easing of the segment ending here.
    pub easing: Option<Easing>,
}

impl<V> Keyframe<V> {
    /// Keyframe using the global easing.
    #[must_use]
    pub fn new(t: f64, value: V) -> Self {
        Self {
            t,
            value,
            easing: None,
        }
    }

    /// Keyframe with its own segment easing.
    #[must_use]
    pub fn eased(t: f64, value: V, easing: Easing) -> Self {
        Self {
            t,
            value,
            easing: Some(easing),
        }
    }
}

/// Ordered keyframes of one animation channel.
#[derive(Clone, Debug, PartialEq)]
pub struct Track<V> {
    keys: SmallVec<[Keyframe<V>; 4]>,
}

impl<V: Lerp> Track<V> {
    /// Creates an empty track.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: SmallVec::new(),
        }
    }

    /// Two-key track from `from` at `t = 0` to `to` at `t = 1`.
    #[must_use]
    pub fn from_to(from: V, to: V) -> Self {
        let mut track = Self::new();
        track.push(Keyframe::new(0.0, from));
        track.push(Keyframe::new(1.0, to));
        track
    }

    /// Builder form of [`Track::push`].
    #[must_use]
    pub fn with(mut self, key: Keyframe<V>) -> Self {
        self.push(key);
        self
    }

    /// Inserts a keyframe, keeping keys sorted by time.
    ///
    /// `t` is clamped to `[0, 1]`; NaN times are treated as `0`. Keys with
    /// equal times keep their insertion order.
    pub fn push(&mut self, mut key: Keyframe<V>) {
        key.t = if key.t.is_nan() {
            0.0
        } else {
            key.t.clamp(0.0, 1.0)
        };
        let at = self.keys.partition_point(|k| k.t <= key.t);
        self.keys.insert(at, key);
    }

    /// Keyframes in time order.
    #[must_use]
    pub fn keys(&self) -> &[Keyframe<V>] {
        &self.keys
    }

    /// `true` when the track has no keyframes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Value of the first keyframe.
    #[must_use]
    pub fn first(&self) -> Option<V> {
        self.keys.first().map(|k| k.value)
    }

    /// Value of the last keyframe: where the track ends up.
    #[must_use]
    pub fn last(&self) -> Option<V> {
        self.keys.last().map(|k| k.value)
    }

    /// Replaces the value of the last keyframe, leaving timing untouched.
    pub fn retarget(&mut self, value: V) {
        if let Some(last) = self.keys.last_mut() {
            last.value = value;
        }
    }

    /// Samples the track at normalized time `u`.
    ///
    /// Finds the keys bracketing `u`, applies the segment easing (or `global`)
    /// to the local time, and interpolates linearly. Before the first key and
    /// after the last one the end values are held.
    #[must_use]
    pub fn sample(&self, u: f64, global: Easing) -> Option<V> {
        let keys = &self.keys[..];
        let (first, last) = (keys.first()?, keys.last()?);
        if keys.len() == 1 || u <= first.t {
            return Some(first.value);
        }
        if u >= last.t {
            return Some(last.value);
        }
        let i = keys.partition_point(|k| k.t <= u).max(1);
        let (a, b) = (&keys[i - 1], &keys[i]);
        let span = (b.t - a.t).max(f64::EPSILON);
        let local = ((u - a.t) / span).clamp(0.0, 1.0);
        let eased = b.easing.unwrap_or(global).apply(local);
        Some(a.value.lerp(b.value, eased))
    }
}

impl<V: Lerp> Default for Track<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{Keyframe, Track};
    use crate::Easing;

    #[test]
    fn empty_track_samples_nothing() {
        let track = Track::<f64>::new();
        assert_eq!(track.sample(0.5, Easing::Linear), None);
    }

    #[test]
    fn linear_two_key_track() {
        let track = Track::from_to(0.0, 10.0);
        assert_eq!(track.sample(0.0, Easing::Linear), Some(0.0));
        assert_eq!(track.sample(0.25, Easing::Linear), Some(2.5));
        assert_eq!(track.sample(1.0, Easing::Linear), Some(10.0));
        assert_eq!(track.sample(2.0, Easing::Linear), Some(10.0));
    }

    #[test]
    fn keys_are_sorted_on_insert() {
        let track = Track::new()
            .with(Keyframe::new(1.0, 3.0))
            .with(Keyframe::new(0.0, 1.0))
            .with(Keyframe::new(0.5, 2.0));
        let keys = track.keys();
        assert_eq!(keys.len(), 3);
        assert_eq!((keys[0].t, keys[1].t, keys[2].t), (0.0, 0.5, 1.0));
        assert_eq!((keys[0].value, keys[1].value, keys[2].value), (1.0, 2.0, 3.0));
    }

    #[test]
    fn segment_easing_overrides_global() {
        let track = Track::new()
            .with(Keyframe::new(0.0, 0.0))
            .with(Keyframe::eased(0.5, 1.0, Easing::Linear))
            .with(Keyframe::new(1.0, 2.0));
        // First segment is linear regardless of the global easing.
        assert_eq!(track.sample(0.25, Easing::EaseIn), Some(0.5));
        // Second segment uses the global ease-in, lagging behind linear.
        let v = track.sample(0.75, Easing::EaseIn).unwrap();
        assert!(v < 1.5, "ease-in should lag, got {v}");
    }

    #[test]
    fn retarget_moves_only_the_end() {
        let mut track = Track::from_to(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        track.retarget(Point::new(20.0, 0.0));
        assert_eq!(track.first(), Some(Point::new(0.0, 0.0)));
        assert_eq!(track.sample(0.5, Easing::Linear), Some(Point::new(10.0, 0.0)));
    }

    #[test]
    fn out_of_range_times_are_clamped() {
        let track = Track::new()
            .with(Keyframe::new(-1.0, 5.0))
            .with(Keyframe::new(f64::NAN, 4.0))
            .with(Keyframe::new(3.0, 6.0));
        assert_eq!(track.keys()[0].t, 0.0);
        assert_eq!(track.keys().last().unwrap().t, 1.0);
    }
}
