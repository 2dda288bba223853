// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};
use panview_anim::{Animation, Easing, Keyframe, Track};
use panview_geometry::{CoordFrame, GeometryModel, PersistedTransform, Transform, rect};

use crate::action::{Action, AnimationOptions, BUMP_DURATION_MS};
use crate::animate::Transition;
use crate::sync::{LinkGroup, Subscription, SyncBus};

/// Pan/zoom state of one viewer, driven by [`Action`]s.
///
/// The store owns a [`GeometryModel`] and the current [`Transform`]. Every
/// change goes through [`TransformStore::dispatch`], which reduces the action
/// to a new constrained transform synchronously, or starts an animation
/// toward it. Animations and linked views advance in
/// [`TransformStore::tick`], which the host calls once per frame.
///
/// Nothing here fails: malformed requests are clamped or defaulted.
///
/// ## Ordering
///
/// - A direct action (set, center, zoom, pan, bump, ensure-visible, goto) starts
///   from where a running animation was heading, not from the frame on
///   screen, so no intent is lost.
/// - An immediate direct action stops a running animation. An animated one
///   replaces a cancelable animation and redirects a non-cancelable one
///   from the frame on screen.
/// - A transform from a linked view always wins over a local animation.
/// - Geometry updates with unchanged values are no-ops.
///
/// ## Minimal example
///
/// ```rust
/// use kurbo::{Rect, Size};
/// use panview_store::{Action, TransformStore};
///
/// let mut store = TransformStore::new(Size::new(400.0, 300.0), 50.0);
/// store.dispatch(Action::SceneRect(Rect::new(0.0, 0.0, 1000.0, 750.0)));
/// assert!((store.scale() - 0.4).abs() < 1e-5);
///
/// store.dispatch(Action::zoom(1.0));
/// assert!((store.scale() - 0.8).abs() < 1e-5);
/// ```
#[derive(Debug)]
pub struct TransformStore {
    geometry: GeometryModel,
    transform: Transform,
    animation: Animation<Transition>,
    link: Option<Link>,
    revision: u64,
    /// `false` until the scene rectangle is first non-empty.
    scene_known: bool,
}

#[derive(Debug)]
struct Link {
    bus: SyncBus,
    subscription: Subscription,
}

impl TransformStore {
    /// Creates a store for a viewport of `view_size` pixels with an empty
    /// scene, centered on the default domain at zoom level 0.
    #[must_use]
    pub fn new(view_size: Size, max_scale: f64) -> Self {
        Self::with_geometry(GeometryModel::new(view_size, max_scale))
    }

    /// Creates a store over an existing geometry, centered on its default
    /// domain at zoom level 0.
    #[must_use]
    pub fn with_geometry(geometry: GeometryModel) -> Self {
        let initial = Transform::relative(Point::new(0.5, 0.5), 0.0);
        let scene_known = !rect::is_empty(geometry.scene_rect());
        let transform = if !scene_known {
            initial.with_zoom(geometry.constraint_zoom(initial.zoom))
        } else {
            geometry.constrain(initial, None)
        };
        Self {
            geometry,
            transform,
            animation: Animation::new(),
            link: None,
            revision: 0,
            scene_known,
        }
    }

    /// Geometry model.
    #[must_use]
    pub fn geometry(&self) -> &GeometryModel {
        &self.geometry
    }

    /// Current transform, in whichever frame it was last set in.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Current scale, in pixels per scene unit.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.geometry.scale(&self.transform)
    }

    /// Current zoom level.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.transform.zoom
    }

    /// Current center, in scene coordinates.
    #[must_use]
    pub fn center(&self) -> Point {
        self.geometry.scene_center(&self.transform)
    }

    /// Scene rectangle visible through the viewport.
    #[must_use]
    pub fn visible_area(&self) -> Rect {
        self.geometry.visible_area(&self.transform)
    }

    /// Default domain, or the scene rectangle when none is set.
    #[must_use]
    pub fn scene_domain(&self) -> Rect {
        self.geometry.scene_domain()
    }

    /// Union of the layer domains.
    #[must_use]
    pub fn scene_rect(&self) -> Rect {
        self.geometry.scene_rect()
    }

    /// Current transform as a flat scene-coordinate triple.
    #[must_use]
    pub fn persisted(&self) -> PersistedTransform {
        let center = self.center();
        PersistedTransform(center.x, center.y, self.transform.zoom)
    }

    /// Counter bumped on every change of the transform.
    ///
    /// Consumers that persist or redraw lazily compare it with the value
    /// they saw last.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` while an animation is playing.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    /// Where the running animation is heading.
    #[must_use]
    pub fn animation_target(&self) -> Option<Transform> {
        self.animation.channels().map(Transition::target)
    }

    /// Converts `p` from `from` into scene coordinates.
    #[must_use]
    pub fn to_scene_point(&self, p: Point, from: CoordFrame) -> Point {
        self.geometry.to_scene_point(p, from, &self.transform)
    }

    /// Converts `p` from `from` into view coordinates.
    #[must_use]
    pub fn to_view_point(&self, p: Point, from: CoordFrame) -> Point {
        self.geometry.to_view_point(p, from, &self.transform)
    }

    /// Converts `p` from `from` into relative coordinates.
    #[must_use]
    pub fn to_relative_point(&self, p: Point, from: CoordFrame) -> Point {
        self.geometry.to_relative_point(p, from, &self.transform)
    }

    /// Converts `r` from `from` into scene coordinates.
    #[must_use]
    pub fn to_scene_rect(&self, r: Rect, from: CoordFrame) -> Rect {
        self.geometry.to_scene_rect(r, from, &self.transform)
    }

    /// Converts `r` from `from` into view coordinates.
    #[must_use]
    pub fn to_view_rect(&self, r: Rect, from: CoordFrame) -> Rect {
        self.geometry.to_view_rect(r, from, &self.transform)
    }

    /// Converts `r` from `from` into relative coordinates.
    #[must_use]
    pub fn to_relative_rect(&self, r: Rect, from: CoordFrame) -> Rect {
        self.geometry.to_relative_rect(r, from, &self.transform)
    }

    /// Applies one action. Returns `true` when the transform changed.
    ///
    /// An animated action normally returns `false`: the transform only
    /// changes as frames arrive through [`TransformStore::tick`]. One whose
    /// target is already on screen is applied at once.
    pub fn dispatch(&mut self, action: Action) -> bool {
        log::trace!("dispatch {action:?}");
        match action {
            Action::SceneRect(r) => {
                let was_known = self.scene_known;
                if !self.geometry.set_scene_rect(r) {
                    return false;
                }
                self.scene_known |= !rect::is_empty(r);
                self.reconstrain(self.transform, was_known)
            }
            Action::SceneDefaultRect(r) => {
                // Re-expressed as relative first, so the displayed region
                // follows the domain instead of jumping.
                let relative = self.geometry.to_relative_transform(&self.transform);
                self.geometry.set_scene_default_rect(r) && self.reconstrain(relative, true)
            }
            Action::ViewSize(size) => {
                self.geometry.set_view_size(size) && self.reconstrain(self.transform, true)
            }
            Action::SyncTransform(t) => {
                self.stop_animation();
                let mut t = t.with_zoom(self.geometry.constraint_zoom(t.zoom));
                if !t.center.is_finite() {
                    t = self.geometry.constraint_center(t, None);
                }
                self.commit(t, false)
            }
            Action::AnimStep(t) => self.commit(t, true),
            direct => self.direct(direct),
        }
    }

    /// Advances the animation and pulls linked-view updates.
    ///
    /// Returns `true` when the transform changed.
    pub fn tick(&mut self, now: f64) -> bool {
        let mut changed = self.sync();
        let target = self.animation_target();
        if let Some(frame) = self.animation.tick(now) {
            // The finishing frame lands exactly on the target.
            let t = if frame.finished {
                target.unwrap_or(self.transform)
            } else {
                self.animation
                    .channels()
                    .map_or(self.transform, |tr| tr.resolve(&self.geometry, frame.value))
            };
            log::trace!("animation frame {:.3}: {t:?}", frame.progress);
            changed |= self.dispatch(Action::AnimStep(t));
        }
        changed
    }

    /// Applies the newest transform published by linked views, if any.
    ///
    /// Returns `true` when the transform changed.
    pub fn sync(&mut self) -> bool {
        let incoming = match &mut self.link {
            Some(link) => link.bus.poll(&mut link.subscription),
            None => None,
        };
        match incoming {
            Some(t) => self.dispatch(Action::SyncTransform(t)),
            None => false,
        }
    }

    /// Joins `group` on `bus`, leaving any group joined before.
    ///
    /// If the group already carries a transform it is applied on the next
    /// [`TransformStore::sync`]; otherwise this store's transform becomes
    /// the group's.
    pub fn link(&mut self, bus: &SyncBus, group: LinkGroup) {
        if self.link_group() == Some(&group) {
            return;
        }
        self.unlink();
        let mut subscription = bus.subscribe(group);
        if bus.latest(subscription.group()).is_none() {
            bus.publish(&mut subscription, self.transform);
        }
        self.link = Some(Link {
            bus: bus.clone(),
            subscription,
        });
    }

    /// Leaves the current link group, if any.
    pub fn unlink(&mut self) {
        if let Some(Link { bus, subscription }) = self.link.take() {
            bus.unsubscribe(subscription);
        }
    }

    /// Link group joined, if any.
    #[must_use]
    pub fn link_group(&self) -> Option<&LinkGroup> {
        self.link.as_ref().map(|link| link.subscription.group())
    }

    fn direct(&mut self, action: Action) -> bool {
        let base = self.animation_target().unwrap_or(self.transform);
        let g = &self.geometry;
        let (target, pivot, animation) = match action {
            Action::SetTransform {
                transform,
                animation,
            } => (g.constrain(transform, None), None, animation),
            Action::SetCenter {
                center,
                frame,
                animation,
            } => {
                let scene = g.to_scene_point(center, frame, &base);
                let t = base.with_center(g.center_in_frame(scene, base.coord));
                (g.constrain(t, None), None, animation)
            }
            Action::Zoom {
                delta,
                pivot,
                animation,
            } => {
                // View pivots point at what is on screen now.
                let pivot = pivot.map(|(p, frame)| g.to_scene_point(p, frame, &self.transform));
                let target = g.apply_zoom(&base, delta, pivot.map(|p| (p, CoordFrame::Scene)));
                (target, pivot, animation)
            }
            Action::Pan {
                delta,
                frame,
                animation,
            } => {
                let delta = g.to_scene_vec(delta, frame, &base);
                let delta = if delta.is_finite() { delta } else { Vec2::ZERO };
                let center = g.scene_center(&base) + delta;
                let t = base.with_center(g.center_in_frame(center, base.coord));
                (g.constraint_center(t, Some(base.center)), None, animation)
            }
            Action::Bump {
                delta,
                frame,
                animation,
            } => {
                let delta = g.to_scene_vec(delta, frame, &base);
                let delta = if delta.is_finite() { delta } else { Vec2::ZERO };
                let shown = g.scene_center(&self.transform);
                let rest = g.scene_center(&base);
                let bounce = Track::new()
                    .with(Keyframe::new(0.0, shown))
                    .with(Keyframe::eased(0.5, rest + delta, Easing::EaseOut))
                    .with(Keyframe::eased(1.0, rest, Easing::EaseIn));
                let options = animation
                    .unwrap_or_else(|| AnimationOptions::new(BUMP_DURATION_MS))
                    .with_center_track(bounce);
                (base, None, Some(options))
            }
            Action::EnsureVisible {
                rect,
                frame,
                animation,
            } => (g.fit_rect(rect, frame, &base), None, animation),
            Action::Goto { target, animation } => {
                (g.constrain(target.to_transform(), None), None, animation)
            }
            Action::SceneRect(_)
            | Action::SceneDefaultRect(_)
            | Action::ViewSize(_)
            | Action::SyncTransform(_)
            | Action::AnimStep(_) => return false,
        };
        self.reach(target, pivot, animation)
    }

    /// Moves to `target`, immediately or through an animation.
    fn reach(
        &mut self,
        target: Transform,
        pivot: Option<Point>,
        animation: Option<AnimationOptions>,
    ) -> bool {
        let Some(options) = animation else {
            self.stop_animation();
            return self.commit(target, true);
        };

        if !self.animation.is_cancelable() {
            let at = self.animation.progress().unwrap_or(0.0);
            if let Some(transition) = self.animation.channels_mut() {
                log::debug!("animation redirected to {target:?} at {at:.3}");
                transition.redirect(&self.geometry, &self.transform, at, target);
                return false;
            }
        }

        let from = self.geometry.to_scene_transform(&self.transform);
        let to = self.geometry.to_scene_transform(&target);
        let keyed = options.center.is_some() || options.zoom.is_some();
        if from == to && !keyed {
            self.stop_animation();
            return self.dispatch(Action::AnimStep(target));
        }

        let transition = Transition::new(&self.geometry, &self.transform, target, pivot, &options);
        self.animation.run(transition, options.run);
        false
    }

    /// Re-clamps after a geometry change. With `keep_previous`, the old
    /// center is unioned into the boundary so it is never snapped.
    ///
    /// Until a scene has been set, only the zoom is clamped.
    fn reconstrain(&mut self, t: Transform, keep_previous: bool) -> bool {
        let t = if !self.scene_known {
            t.with_zoom(self.geometry.constraint_zoom(t.zoom))
        } else {
            let previous = keep_previous.then_some(t.center);
            self.geometry.constrain(t, previous)
        };
        self.commit(t, true)
    }

    fn stop_animation(&mut self) {
        self.animation.stop();
    }

    fn commit(&mut self, t: Transform, broadcast: bool) -> bool {
        if t == self.transform {
            return false;
        }
        self.transform = t;
        self.revision += 1;
        if broadcast {
            if let Some(link) = &mut self.link {
                link.bus.publish(&mut link.subscription, t);
            }
        }
        true
    }
}

impl Drop for TransformStore {
    fn drop(&mut self) {
        self.unlink();
    }
}

/// Links `stores` into a freshly minted group on `bus`.
///
/// The first store's transform becomes the group's; the others adopt it on
/// their next [`TransformStore::sync`] or [`TransformStore::tick`].
pub fn link_stores(bus: &SyncBus, stores: &mut [&mut TransformStore]) -> LinkGroup {
    let group = bus.new_group();
    for store in stores.iter_mut() {
        store.link(bus, group.clone());
    }
    group
}
