// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transitions between two transforms, played by [`panview_anim::Animation`].

use kurbo::Point;
use panview_anim::{Channels, Easing, Keyframe, Lerp, Track};
use panview_geometry::{CoordFrame, GeometryModel, Transform, rect};

use crate::action::AnimationOptions;

/// Zoom changes below this many levels never take the zoom-out detour.
const SMALL_ZOOM_CHANGE: f64 = 1.0;
/// How far the detour zooms out, in levels.
const DETOUR_ZOOM_OUT: f64 = 0.5;
/// Normalized time of the detour's middle key.
const DETOUR_KEY: f64 = 0.3;
/// Below this the zoom change of a redirect is too small to pivot around.
const REDIRECT_MIN_SHRINK: f64 = 1e-6;

/// Channel layout of one transition.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Path {
    /// Center and zoom interpolated independently. Center in scene coordinates.
    Tracks {
        center: Track<Point>,
        zoom: Track<f64>,
    },
    /// Only zoom is interpolated; every frame zooms the initial transform
    /// around `pivot` (scene coordinates), so the pivot stays fixed on screen.
    Pivot { pivot: Point, zoom: Track<f64> },
}

/// Value of one transition frame, before it is resolved against a geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Sample {
    /// Scene-space center and zoom.
    Scene(Point, f64),
    /// Zoom level for the pivot path.
    PivotZoom(f64),
}

/// The animation channels of a transform transition.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Transition {
    /// Start of the transition, scene frame.
    initial: Transform,
    /// Final transform, in the frame it will be committed in.
    target: Transform,
    path: Path,
}

impl Channels for Transition {
    type Frame = Sample;

    fn sample(&self, u: f64, easing: Easing) -> Sample {
        match &self.path {
            Path::Tracks { center, zoom } => Sample::Scene(
                center.sample(u, easing).unwrap_or(self.initial.center),
                zoom.sample(u, easing).unwrap_or(self.initial.zoom),
            ),
            Path::Pivot { zoom, .. } => {
                Sample::PivotZoom(zoom.sample(u, easing).unwrap_or(self.initial.zoom))
            }
        }
    }
}

impl Transition {
    /// Transition from `from` to `to`.
    ///
    /// Explicit tracks in `options` win. Otherwise a `pivot` (scene
    /// coordinates) selects the pivot path, and without one the shape is
    /// picked by [`transition_tracks`].
    pub(crate) fn new(
        geometry: &GeometryModel,
        from: &Transform,
        to: Transform,
        pivot: Option<Point>,
        options: &AnimationOptions,
    ) -> Self {
        let initial = geometry.to_scene_transform(from);
        let end = geometry.to_scene_transform(&to);
        let (auto_center, auto_zoom) = transition_tracks(geometry, &initial, &end);
        let path = match (&options.center, &options.zoom, pivot) {
            (None, None, Some(pivot)) => Path::Pivot {
                pivot,
                zoom: auto_zoom,
            },
            (center, zoom, _) => Path::Tracks {
                center: center.clone().unwrap_or(auto_center),
                zoom: zoom.clone().unwrap_or(auto_zoom),
            },
        };
        Self {
            initial,
            target: to,
            path,
        }
    }

    /// Where the transition ends.
    pub(crate) fn target(&self) -> Transform {
        self.target
    }

    /// Sends the rest of the transition to `to`, starting from `shown`.
    ///
    /// `at` is the progress `shown` was sampled at; keys before it are
    /// dropped so the next frame continues from what is on screen. When the
    /// zoom changes, frames zoom around the one scene point that maps
    /// `shown` onto `to`, so the last frame lands exactly on `to`.
    pub(crate) fn redirect(
        &mut self,
        geometry: &GeometryModel,
        shown: &Transform,
        at: f64,
        to: Transform,
    ) {
        let from = geometry.to_scene_transform(shown);
        let end = geometry.to_scene_transform(&to);
        let at = if at.is_finite() { at.clamp(0.0, 1.0) } else { 0.0 };
        let zoom = Track::new()
            .with(Keyframe::new(at, from.zoom))
            .with(Keyframe::new(1.0, end.zoom));
        let shrink = 1.0 - libm::exp2(from.zoom - end.zoom);
        self.path = if shrink.abs() > REDIRECT_MIN_SHRINK {
            Path::Pivot {
                pivot: from.center + (end.center - from.center) / shrink,
                zoom,
            }
        } else {
            Path::Tracks {
                center: Track::new()
                    .with(Keyframe::new(at, from.center))
                    .with(Keyframe::new(1.0, end.center)),
                zoom,
            }
        };
        self.initial = from;
        self.target = to;
    }

    /// Transform shown for `sample`, in the target's frame.
    pub(crate) fn resolve(&self, geometry: &GeometryModel, sample: Sample) -> Transform {
        let scene = match (sample, &self.path) {
            (Sample::Scene(center, zoom), _) => Transform::scene(center, zoom),
            (Sample::PivotZoom(zoom), Path::Pivot { pivot, .. }) => geometry.apply_zoom(
                &self.initial,
                zoom - self.initial.zoom,
                Some((*pivot, CoordFrame::Scene)),
            ),
            (Sample::PivotZoom(zoom), Path::Tracks { .. }) => self.initial.with_zoom(zoom),
        };
        Transform {
            center: geometry.center_in_frame(scene.center, self.target.coord),
            zoom: scene.zoom,
            coord: self.target.coord,
        }
    }
}

/// Picks center and zoom tracks for a transition between two scene-frame
/// transforms.
///
/// - Zooming out eases out on both channels.
/// - A small zoom change, or a destination already close on screen, eases
///   in and out.
/// - A large zoom-in to a distant point first backs out a little, then
///   eases into the target, with the center lagging behind early on.
pub(crate) fn transition_tracks(
    geometry: &GeometryModel,
    from: &Transform,
    to: &Transform,
) -> (Track<Point>, Track<f64>) {
    let dzoom = to.zoom - from.zoom;
    if dzoom < 0.0 {
        return (
            eased_pair(from.center, to.center, Easing::EaseOut),
            eased_pair(from.zoom, to.zoom, Easing::EaseOut),
        );
    }

    let view = geometry.view_size();
    let screen_distance = rect::norm(to.center - from.center) * geometry.zoom2scale(from.zoom);
    let close = screen_distance <= view.width.max(view.height);
    if dzoom < SMALL_ZOOM_CHANGE || close {
        return (
            eased_pair(from.center, to.center, Easing::EaseInOut),
            eased_pair(from.zoom, to.zoom, Easing::EaseInOut),
        );
    }

    let backed_out = (from.zoom - DETOUR_ZOOM_OUT).max(geometry.min_zoom().min(from.zoom));
    let zoom = Track::new()
        .with(Keyframe::new(0.0, from.zoom))
        .with(Keyframe::eased(DETOUR_KEY, backed_out, Easing::EaseOut))
        .with(Keyframe::eased(1.0, to.zoom, Easing::EaseInOut));
    let center = Track::new()
        .with(Keyframe::new(0.0, from.center))
        .with(Keyframe::eased(
            DETOUR_KEY,
            from.center.lerp(to.center, 0.2),
            Easing::EaseIn,
        ))
        .with(Keyframe::eased(1.0, to.center, Easing::EaseInOut));
    (center, zoom)
}

fn eased_pair<V: Lerp>(from: V, to: V, easing: Easing) -> Track<V> {
    Track::new()
        .with(Keyframe::new(0.0, from))
        .with(Keyframe::eased(1.0, to, easing))
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};
    use panview_anim::{Channels, Easing};
    use panview_geometry::{CenterFrame, CoordFrame, GeometryModel, Transform};

    use super::{Path, Sample, Transition, transition_tracks};
    use crate::AnimationOptions;

    fn geometry() -> GeometryModel {
        let mut g = GeometryModel::new(Size::new(400.0, 300.0), 50.0);
        g.set_scene_rect(Rect::new(0.0, 0.0, 1000.0, 750.0));
        g
    }

    fn last_easing<V: panview_anim::Lerp>(track: &panview_anim::Track<V>) -> Option<Easing> {
        track.keys().last().and_then(|k| k.easing)
    }

    #[test]
    fn zooming_out_eases_out() {
        let g = geometry();
        let from = Transform::scene(Point::new(500.0, 375.0), 2.0);
        let to = Transform::scene(Point::new(500.0, 375.0), 0.0);
        let (center, zoom) = transition_tracks(&g, &from, &to);
        assert_eq!(last_easing(&zoom), Some(Easing::EaseOut));
        assert_eq!(last_easing(&center), Some(Easing::EaseOut));
    }

    #[test]
    fn small_zoom_in_eases_in_out() {
        let g = geometry();
        let from = Transform::scene(Point::new(500.0, 375.0), 0.0);
        let to = Transform::scene(Point::new(100.0, 100.0), 0.5);
        let (_, zoom) = transition_tracks(&g, &from, &to);
        assert_eq!(zoom.keys().len(), 2);
        assert_eq!(last_easing(&zoom), Some(Easing::EaseInOut));
    }

    #[test]
    fn large_distant_zoom_in_backs_out_first() {
        let g = geometry();
        let from = Transform::scene(Point::new(100.0, 100.0), 3.0);
        let to = Transform::scene(Point::new(900.0, 700.0), 5.0);
        let (center, zoom) = transition_tracks(&g, &from, &to);
        assert_eq!(zoom.keys().len(), 3);
        assert_eq!(zoom.keys()[1].value, 2.5);
        assert_eq!(center.keys().len(), 3);
        assert_eq!(center.first(), Some(from.center));
        assert_eq!(center.last(), Some(to.center));
    }

    #[test]
    fn pivot_path_keeps_pivot_fixed() {
        let g = geometry();
        let from = Transform::scene(Point::new(500.0, 375.0), 1.0);
        let pivot = Point::new(300.0, 200.0);
        let to = g.apply_zoom(&from, 1.0, Some((pivot, CoordFrame::Scene)));
        let transition = Transition::new(&g, &from, to, Some(pivot), &AnimationOptions::new(100.0));
        assert!(matches!(transition.path, Path::Pivot { .. }));

        let view_pivot = |t: &Transform| {
            g.to_view_point(pivot, CoordFrame::Scene, t)
        };
        let before = view_pivot(&from);
        let mid = transition.resolve(&g, Sample::PivotZoom(1.4));
        let after = view_pivot(&mid);
        assert!((before - after).hypot() < 1e-9);
    }

    #[test]
    fn frames_use_the_target_frame() {
        let g = geometry();
        let from = Transform::scene(Point::new(500.0, 375.0), 1.0);
        let to = Transform::relative(Point::new(0.25, 0.25), 1.0);
        let transition = Transition::new(&g, &from, to, None, &AnimationOptions::new(100.0));
        let frame = transition.resolve(&g, Sample::Scene(Point::new(500.0, 375.0), 1.0));
        assert_eq!(frame.coord, CenterFrame::Relative);
        assert!((frame.center - Point::new(0.5, 0.5)).hypot() < 1e-12);
    }

    #[test]
    fn redirect_continues_from_the_shown_frame() {
        let g = geometry();
        let from = Transform::scene(Point::new(500.0, 375.0), 1.0);
        let mut transition = Transition::new(
            &g,
            &from,
            Transform::scene(Point::new(400.0, 375.0), 1.0),
            None,
            &AnimationOptions::new(100.0),
        );
        let shown = Transform::scene(Point::new(450.0, 375.0), 1.0);
        let to = Transform::scene(Point::new(300.0, 375.0), 1.0);
        transition.redirect(&g, &shown, 0.5, to);
        assert_eq!(transition.target(), to);
        let Path::Tracks { center, zoom } = &transition.path else {
            panic!("expected tracks");
        };
        assert_eq!(center.sample(0.5, Easing::Linear), Some(shown.center));
        assert_eq!(center.last(), Some(to.center));
        assert_eq!(zoom.last(), Some(1.0));
    }

    #[test]
    fn redirected_zoom_lands_on_the_target() {
        let g = geometry();
        let start = Transform::scene(Point::new(500.0, 375.0), 1.0);
        let pivot = Point::new(300.0, 200.0);
        let first = g.apply_zoom(&start, 1.0, Some((pivot, CoordFrame::Scene)));
        let mut transition =
            Transition::new(&g, &start, first, Some(pivot), &AnimationOptions::new(100.0));
        let shown = transition.resolve(&g, Sample::PivotZoom(1.3));

        let other = Point::new(700.0, 500.0);
        let to = g.apply_zoom(&first, 1.0, Some((other, CoordFrame::Scene)));
        transition.redirect(&g, &shown, 0.4, to);

        let at_start = transition.resolve(&g, transition.sample(0.4, Easing::EaseInOut));
        assert!((at_start.center - shown.center).hypot() < 1e-9);
        assert!((at_start.zoom - shown.zoom).abs() < 1e-12);
        let at_end = transition.resolve(&g, transition.sample(1.0, Easing::EaseInOut));
        assert!((at_end.center - to.center).hypot() < 1e-6);
        assert!((at_end.zoom - to.zoom).abs() < 1e-12);
    }
}
