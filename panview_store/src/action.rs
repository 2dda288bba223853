// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};
use panview_anim::{Easing, RunOptions, Track};
use panview_geometry::{CoordFrame, PersistedTransform, Transform};
use panview_gesture::ViewIntent;

/// How an action animates toward its result.
///
/// Without explicit tracks the store picks a transition shape from the
/// start and end transforms. Explicit tracks replace that choice for their
/// channel; center keyframes are in scene coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationOptions {
    /// Duration, delay, global easing and cancelability.
    pub run: RunOptions,
    /// Explicit center keyframes, in scene coordinates.
    pub center: Option<Track<Point>>,
    /// Explicit zoom keyframes.
    pub zoom: Option<Track<f64>>,
}

impl AnimationOptions {
    /// Cancelable animation of `duration_ms` with the default easing.
    #[must_use]
    pub fn new(duration_ms: f64) -> Self {
        RunOptions::new(duration_ms).into()
    }

    /// Sets the delay.
    #[must_use]
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.run.delay_ms = delay_ms;
        self
    }

    /// Sets the global easing.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.run.easing = easing;
        self
    }

    /// Sets whether a later action may interrupt the animation.
    ///
    /// A non-cancelable animation is redirected by later animated actions
    /// instead of restarted: it continues from the frame on screen and keeps
    /// its timing.
    #[must_use]
    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.run.cancelable = cancelable;
        self
    }

    /// Uses explicit center keyframes.
    #[must_use]
    pub fn with_center_track(mut self, track: Track<Point>) -> Self {
        self.center = Some(track);
        self
    }

    /// Uses explicit zoom keyframes.
    #[must_use]
    pub fn with_zoom_track(mut self, track: Track<f64>) -> Self {
        self.zoom = Some(track);
        self
    }
}

impl Default for AnimationOptions {
    fn default() -> Self {
        RunOptions::default().into()
    }
}

impl From<RunOptions> for AnimationOptions {
    fn from(run: RunOptions) -> Self {
        Self {
            run,
            center: None,
            zoom: None,
        }
    }
}

/// Length of an [`Action::Bump`] without explicit animation options.
pub const BUMP_DURATION_MS: f64 = 200.0;

/// One request submitted to a [`TransformStore`](crate::TransformStore).
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Move to `transform`, constrained.
    SetTransform {
        /// Requested transform.
        transform: Transform,
        /// Animation, or `None` to apply immediately.
        animation: Option<AnimationOptions>,
    },
    /// Recenter on `center`, keeping the zoom level.
    SetCenter {
        /// Requested center.
        center: Point,
        /// Frame `center` is expressed in.
        frame: CoordFrame,
        /// Animation, or `None` to apply immediately.
        animation: Option<AnimationOptions>,
    },
    /// Zoom by `delta` levels, optionally around a pivot.
    Zoom {
        /// Zoom level change; `+1` doubles the scale.
        delta: f64,
        /// Point kept fixed on screen, with the frame it is expressed in.
        pivot: Option<(Point, CoordFrame)>,
        /// Animation, or `None` to apply immediately.
        animation: Option<AnimationOptions>,
    },
    /// Move the center by `delta`.
    Pan {
        /// Center displacement.
        delta: Vec2,
        /// Frame `delta` is expressed in: view pixels, scene units, or
        /// fractions of the default domain.
        frame: CoordFrame,
        /// Animation, or `None` to apply immediately.
        animation: Option<AnimationOptions>,
    },
    /// Push the center by `delta` and spring back to where it was.
    ///
    /// The push ignores the scene bounds, revealing the space around the
    /// scene. Always animated; `None` uses a [`BUMP_DURATION_MS`] run.
    Bump {
        /// Largest center displacement.
        delta: Vec2,
        /// Frame `delta` is expressed in.
        frame: CoordFrame,
        /// Animation, or `None` for the default bump timing.
        animation: Option<AnimationOptions>,
    },
    /// Show `rect` as large as the viewport allows.
    EnsureVisible {
        /// Rectangle to fit.
        rect: Rect,
        /// Frame `rect` is expressed in.
        frame: CoordFrame,
        /// Animation, or `None` to apply immediately.
        animation: Option<AnimationOptions>,
    },
    /// Jump to a persisted `(center_x, center_y, zoom)` scene triple.
    Goto {
        /// Persisted target.
        target: PersistedTransform,
        /// Animation, or `None` to apply immediately.
        animation: Option<AnimationOptions>,
    },
    /// New union of the visible layer domains.
    SceneRect(Rect),
    /// New default domain, or `None` to use the scene rectangle.
    SceneDefaultRect(Option<Rect>),
    /// New viewport size in pixels.
    ViewSize(Size),
    /// Transform received from a linked view.
    SyncTransform(Transform),
    /// One animation frame.
    AnimStep(Transform),
}

impl Action {
    /// Immediate [`Action::SetTransform`].
    #[must_use]
    pub fn set_transform(transform: Transform) -> Self {
        Self::SetTransform {
            transform,
            animation: None,
        }
    }

    /// Immediate [`Action::SetCenter`].
    #[must_use]
    pub fn set_center(center: Point, frame: CoordFrame) -> Self {
        Self::SetCenter {
            center,
            frame,
            animation: None,
        }
    }

    /// Immediate [`Action::Zoom`] around the view center.
    #[must_use]
    pub fn zoom(delta: f64) -> Self {
        Self::Zoom {
            delta,
            pivot: None,
            animation: None,
        }
    }

    /// Immediate [`Action::Zoom`] around `pivot`.
    #[must_use]
    pub fn zoom_at(delta: f64, pivot: Point, frame: CoordFrame) -> Self {
        Self::Zoom {
            delta,
            pivot: Some((pivot, frame)),
            animation: None,
        }
    }

    /// Immediate [`Action::Pan`].
    #[must_use]
    pub fn pan(delta: Vec2, frame: CoordFrame) -> Self {
        Self::Pan {
            delta,
            frame,
            animation: None,
        }
    }

    /// Immediate [`Action::EnsureVisible`].
    #[must_use]
    pub fn ensure_visible(rect: Rect, frame: CoordFrame) -> Self {
        Self::EnsureVisible {
            rect,
            frame,
            animation: None,
        }
    }

    /// Immediate [`Action::Goto`].
    #[must_use]
    pub fn goto(target: PersistedTransform) -> Self {
        Self::Goto {
            target,
            animation: None,
        }
    }

    /// Attaches `options` to an animatable action.
    ///
    /// Geometry updates, sync and animation frames are always immediate and
    /// are returned unchanged.
    #[must_use]
    pub fn animated(mut self, options: AnimationOptions) -> Self {
        if let Some(slot) = self.animation_mut() {
            *slot = Some(options);
        }
        self
    }

    /// Animation requested by this action.
    #[must_use]
    pub fn animation(&self) -> Option<&AnimationOptions> {
        match self {
            Self::SetTransform { animation, .. }
            | Self::SetCenter { animation, .. }
            | Self::Zoom { animation, .. }
            | Self::Pan { animation, .. }
            | Self::Bump { animation, .. }
            | Self::EnsureVisible { animation, .. }
            | Self::Goto { animation, .. } => animation.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` for actions that express a user or host intent, as
    /// opposed to geometry updates, sync and animation frames.
    #[must_use]
    pub fn is_direct(&self) -> bool {
        matches!(
            self,
            Self::SetTransform { .. }
                | Self::SetCenter { .. }
                | Self::Zoom { .. }
                | Self::Pan { .. }
                | Self::Bump { .. }
                | Self::EnsureVisible { .. }
                | Self::Goto { .. }
        )
    }

    fn animation_mut(&mut self) -> Option<&mut Option<AnimationOptions>> {
        match self {
            Self::SetTransform { animation, .. }
            | Self::SetCenter { animation, .. }
            | Self::Zoom { animation, .. }
            | Self::Pan { animation, .. }
            | Self::Bump { animation, .. }
            | Self::EnsureVisible { animation, .. }
            | Self::Goto { animation, .. } => Some(animation),
            _ => None,
        }
    }
}

impl From<ViewIntent> for Action {
    /// Gesture intents are in view pixels; their animations never yield to
    /// the next input.
    fn from(intent: ViewIntent) -> Self {
        let animation = |ms: Option<f64>| {
            ms.map(|ms| AnimationOptions::new(ms).with_cancelable(false))
        };
        match intent {
            ViewIntent::Zoom {
                delta,
                pivot,
                animation_ms,
            } => Self::Zoom {
                delta,
                pivot: Some((pivot, CoordFrame::View)),
                animation: animation(animation_ms),
            },
            ViewIntent::Pan {
                delta,
                animation_ms,
            } => Self::Pan {
                delta,
                frame: CoordFrame::View,
                animation: animation(animation_ms),
            },
            ViewIntent::Bump { delta, duration_ms } => Self::Bump {
                delta,
                frame: CoordFrame::View,
                animation: animation(Some(duration_ms)),
            },
        }
    }
}
