// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::easing::Easing;

/// A set of animation channels sampled together.
///
/// Each channel typically owns a [`Track`](crate::Track); the implementor
/// combines the sampled channel values into one frame.
pub trait Channels {
    /// Combined value produced for one frame.
    type Frame;

    /// Samples every channel at normalized time `u` in `[0, 1]`.
    ///
    /// `easing` is the run's global easing, used by segments that do not
    /// carry their own.
    fn sample(&self, u: f64, easing: Easing) -> Self::Frame;
}

/// Timing of one [`Animation::run`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunOptions {
    /// Playback length in milliseconds.
    pub duration_ms: f64,
    /// Wait before playback starts, in milliseconds.
    pub delay_ms: f64,
    /// Easing for segments without their own.
    pub easing: Easing,
    /// Whether a later request may interrupt this run.
    ///
    /// The engine only records the flag; callers decide what to do with it.
    pub cancelable: bool,
}

impl RunOptions {
    /// Cancelable run of `duration_ms` with the default easing and no delay.
    #[must_use]
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            delay_ms: 0.0,
            easing: Easing::default(),
            cancelable: true,
        }
    }

    /// Sets the delay.
    #[must_use]
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Sets the global easing.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sets whether the run may be interrupted.
    #[must_use]
    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::new(500.0)
    }
}

/// One sampled frame returned by [`Animation::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame<F> {
    /// Channel values at this instant.
    pub value: F,
    /// Linear progress in `[0, 1]`.
    pub progress: f64,
    /// `true` on the last frame of the run; the engine is idle afterwards.
    pub finished: bool,
}

#[derive(Clone, Debug)]
struct Run<C> {
    channels: C,
    options: RunOptions,
    /// Set on the first tick after `run`.
    started_at: Option<f64>,
    /// Progress of the last sampled frame.
    progress: f64,
}

/// Host-driven animation engine.
///
/// The engine owns no timer. The host calls [`Animation::tick`] once per
/// frame with the current time in milliseconds; the first tick after
/// [`Animation::run`] anchors the start time. All state is plain data, so an
/// animation can be stepped deterministically in tests.
///
/// ```rust
/// use panview_anim::{Animation, Channels, Easing, RunOptions, Track};
///
/// struct Opacity(Track<f64>);
///
/// impl Channels for Opacity {
///     type Frame = f64;
///     fn sample(&self, u: f64, easing: Easing) -> f64 {
///         self.0.sample(u, easing).unwrap_or(0.0)
///     }
/// }
///
/// let mut anim = Animation::new();
/// anim.run(Opacity(Track::from_to(0.0, 1.0)), RunOptions::new(100.0).with_easing(Easing::Linear));
/// assert_eq!(anim.tick(1000.0).unwrap().value, 0.0);
/// assert_eq!(anim.tick(1050.0).unwrap().value, 0.5);
/// let last = anim.tick(1100.0).unwrap();
/// assert!(last.finished);
/// assert!(!anim.is_running());
/// ```
#[derive(Clone, Debug)]
pub struct Animation<C> {
    run: Option<Run<C>>,
}

impl<C: Channels> Animation<C> {
    /// Creates an idle engine.
    #[must_use]
    pub fn new() -> Self {
        Self { run: None }
    }

    /// Starts playing `channels`, stopping any run in progress first.
    pub fn run(&mut self, channels: C, options: RunOptions) {
        self.stop();
        log::debug!(
            "animation started: {} ms after {} ms delay",
            options.duration_ms,
            options.delay_ms
        );
        self.run = Some(Run {
            channels,
            options,
            started_at: None,
            progress: 0.0,
        });
    }

    /// Halts the current run and hands back its channels.
    ///
    /// Safe to call on an idle engine, which returns `None`.
    pub fn stop(&mut self) -> Option<C> {
        let run = self.run.take()?;
        log::debug!("animation stopped");
        Some(run.channels)
    }

    /// `true` between [`Animation::run`] and the finishing frame or a stop.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Whether the current run may be interrupted; `true` when idle.
    #[must_use]
    pub fn is_cancelable(&self) -> bool {
        self.run.as_ref().is_none_or(|run| run.options.cancelable)
    }

    /// Channels of the current run.
    #[must_use]
    pub fn channels(&self) -> Option<&C> {
        self.run.as_ref().map(|run| &run.channels)
    }

    /// Mutable channels of the current run, for retargeting in place.
    pub fn channels_mut(&mut self) -> Option<&mut C> {
        self.run.as_mut().map(|run| &mut run.channels)
    }

    /// Timing of the current run.
    #[must_use]
    pub fn options(&self) -> Option<RunOptions> {
        self.run.as_ref().map(|run| run.options)
    }

    /// Linear progress of the last sampled frame; `0.0` before the first.
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        self.run.as_ref().map(|run| run.progress)
    }

    /// Advances to `now` (milliseconds) and samples a frame.
    ///
    /// Returns `None` when idle or while the start delay has not elapsed.
    /// The frame reaching full progress is flagged `finished` and leaves the
    /// engine idle.
    pub fn tick(&mut self, now: f64) -> Option<Frame<C::Frame>> {
        let run = self.run.as_mut()?;
        let started_at = *run.started_at.get_or_insert(now);
        let elapsed = now - started_at - run.options.delay_ms.max(0.0);
        if elapsed < 0.0 {
            return None;
        }
        let duration = run.options.duration_ms;
        let progress = if duration > 0.0 {
            (elapsed / duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        run.progress = progress;
        let value = run.channels.sample(progress, run.options.easing);
        let finished = progress >= 1.0;
        if finished {
            self.run = None;
            log::debug!("animation finished");
        }
        Some(Frame {
            value,
            progress,
            finished,
        })
    }
}

impl<C: Channels> Default for Animation<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Animation, Channels, RunOptions};
    use crate::{Easing, Keyframe, Track};

    #[derive(Debug)]
    struct Pair {
        a: Track<f64>,
        b: Track<f64>,
    }

    impl Channels for Pair {
        type Frame = (f64, f64);

        fn sample(&self, u: f64, easing: Easing) -> (f64, f64) {
            (
                self.a.sample(u, easing).unwrap_or(0.0),
                self.b.sample(u, easing).unwrap_or(0.0),
            )
        }
    }

    fn pair() -> Pair {
        Pair {
            a: Track::from_to(0.0, 10.0),
            b: Track::new()
                .with(Keyframe::new(0.0, 0.0))
                .with(Keyframe::eased(1.0, 100.0, Easing::Linear)),
        }
    }

    #[test]
    fn idle_engine_yields_nothing() {
        let mut anim = Animation::<Pair>::new();
        assert!(anim.tick(0.0).is_none());
        assert!(anim.stop().is_none());
        assert!(anim.is_cancelable());
    }

    #[test]
    fn channels_share_timing_but_not_easing() {
        let mut anim = Animation::new();
        anim.run(pair(), RunOptions::new(200.0).with_easing(Easing::EaseIn));
        anim.tick(0.0);
        let frame = anim.tick(100.0).unwrap();
        assert_eq!(frame.progress, 0.5);
        assert!(frame.value.0 < 5.0);
        assert_eq!(frame.value.1, 50.0);
        assert!(!frame.finished);
    }

    #[test]
    fn delay_postpones_playback() {
        let mut anim = Animation::new();
        anim.run(pair(), RunOptions::new(100.0).with_delay(50.0));
        assert!(anim.tick(10.0).is_none());
        assert!(anim.tick(59.0).is_none());
        let frame = anim.tick(60.0).unwrap();
        assert_eq!(frame.progress, 0.0);
        assert!(anim.is_running());
    }

    #[test]
    fn finishing_frame_stops_engine() {
        let mut anim = Animation::new();
        anim.run(pair(), RunOptions::new(100.0));
        anim.tick(0.0);
        let frame = anim.tick(250.0).unwrap();
        assert!(frame.finished);
        assert_eq!(frame.value, (10.0, 100.0));
        assert!(!anim.is_running());
        assert!(anim.tick(300.0).is_none());
    }

    #[test]
    fn zero_duration_finishes_on_first_tick() {
        let mut anim = Animation::new();
        anim.run(pair(), RunOptions::new(0.0));
        let frame = anim.tick(5.0).unwrap();
        assert!(frame.finished);
        assert_eq!(frame.value, (10.0, 100.0));
    }

    #[test]
    fn run_replaces_previous_and_stop_is_idempotent() {
        let mut anim = Animation::new();
        anim.run(pair(), RunOptions::new(100.0).with_cancelable(false));
        assert!(!anim.is_cancelable());
        anim.run(pair(), RunOptions::new(100.0));
        assert!(anim.is_cancelable());
        assert!(anim.stop().is_some());
        assert!(anim.stop().is_none());
    }

    #[test]
    fn retargeting_keeps_elapsed_time() {
        let mut anim = Animation::new();
        anim.run(pair(), RunOptions::new(100.0).with_easing(Easing::Linear));
        anim.tick(0.0);
        anim.tick(50.0);
        anim.channels_mut().unwrap().a.retarget(20.0);
        let frame = anim.tick(75.0).unwrap();
        assert_eq!(frame.value.0, 15.0);
    }

    #[test]
    fn progress_reports_the_last_frame() {
        let mut anim = Animation::new();
        assert_eq!(anim.progress(), None);
        anim.run(pair(), RunOptions::new(200.0));
        assert_eq!(anim.progress(), Some(0.0));
        anim.tick(0.0);
        anim.tick(50.0);
        assert_eq!(anim.progress(), Some(0.25));
        anim.tick(200.0);
        assert_eq!(anim.progress(), None);
    }
}
