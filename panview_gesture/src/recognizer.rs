// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use panview_geometry::{CoordFrame, GeometryModel, Transform, rect};
use smallvec::SmallVec;

use crate::config::GestureConfig;
use crate::drag::{ButtonPhase, PressState};
use crate::input::{Buttons, Modifiers, PointerButton, PointerInput, PointerState};

/// Zoom levels within this distance of the minimum count as "at minimum".
const MIN_ZOOM_TOLERANCE: f64 = 1e-9;

/// Pointer data carried by every [`GestureEvent`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInfo {
    /// Cursor in scene coordinates.
    pub cursor: Point,
    /// Cursor in view coordinates.
    pub view_cursor: Point,
    /// Movement since the previous event, in scene units.
    pub movement: Vec2,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Button this event is about, if any.
    pub button: Option<PointerButton>,
    /// Buttons held by the viewer after this event.
    pub buttons: Buttons,
}

/// Semantic pointer event in scene coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// Press and release without a drag.
    Click(PointerInfo),
    /// A drag started.
    ///
    /// Reported at the original pointer-down position, even when the drag was
    /// only recognized later.
    MouseDown(PointerInfo),
    /// Drag movement, or hover movement when no button is held.
    MouseMove(PointerInfo),
    /// A drag ended.
    MouseUp(PointerInfo),
    /// The pointer entered the viewport.
    Enter(PointerInfo),
    /// The pointer left the viewport.
    Leave(PointerInfo),
    /// Wheel or trackpad scroll.
    Wheel {
        /// Pointer data.
        info: PointerInfo,
        /// Scroll delta, in scene units.
        delta: Vec2,
    },
}

impl GestureEvent {
    /// Pointer data of this event.
    #[must_use]
    pub fn info(&self) -> &PointerInfo {
        match self {
            Self::Click(info)
            | Self::MouseDown(info)
            | Self::MouseMove(info)
            | Self::MouseUp(info)
            | Self::Enter(info)
            | Self::Leave(info)
            | Self::Wheel { info, .. } => info,
        }
    }
}

/// A view change the recognizer asks its owner to apply.
///
/// Positions and deltas are in view pixels. An `animation_ms` asks for a
/// non-cancelable animation of that length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewIntent {
    /// Zoom by `delta` levels, keeping `pivot` fixed on screen.
    Zoom {
        /// Zoom level change.
        delta: f64,
        /// Fixed point, in view coordinates.
        pivot: Point,
        /// Animation length, or `None` to apply immediately.
        animation_ms: Option<f64>,
    },
    /// Move the view center by `delta`.
    Pan {
        /// Center displacement, in view pixels.
        delta: Vec2,
        /// Animation length, or `None` to apply immediately.
        animation_ms: Option<f64>,
    },
    /// Push the view center by `delta` past the scene bounds and let it
    /// spring back.
    Bump {
        /// Largest center displacement, in view pixels.
        delta: Vec2,
        /// Length of the push and return.
        duration_ms: f64,
    },
}

/// Pointer-lock change requested from the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerLock {
    /// A drag started: lock the pointer.
    Request,
    /// The last drag ended: release the lock.
    Release,
}

/// Everything produced by one call into the recognizer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureOutput {
    /// Semantic events, in emission order.
    pub events: SmallVec<[GestureEvent; 4]>,
    /// View changes to apply, in order.
    pub intents: SmallVec<[ViewIntent; 2]>,
    /// Pointer-lock change, if any.
    pub pointer_lock: Option<PointerLock>,
}

impl GestureOutput {
    /// Returns `true` when nothing was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.intents.is_empty() && self.pointer_lock.is_none()
    }
}

/// Turns raw pointer input into semantic gesture events and view intents.
///
/// Each of the five pointer buttons has its own slot in a small state
/// machine:
///
/// - **Idle** → pointer-down opens a hold window and becomes **Pending**.
/// - **Pending**: moves are recorded silently. Releasing the button emits a
///   [`GestureEvent::Click`]. Moving past the drag threshold, or the hold
///   window running out, emits [`GestureEvent::MouseDown`] at the press
///   position followed by a [`GestureEvent::MouseMove`] carrying the movement
///   accumulated so far, and the slot becomes **Dragging**.
/// - **Dragging**: moves emit [`GestureEvent::MouseMove`] from the relative
///   device movement; a drag with one of the pan buttons also pans the view.
///   Releasing the button emits [`GestureEvent::MouseUp`].
///
/// The recognizer has no timer. The host passes a timestamp with every
/// input and calls [`GestureRecognizer::tick`] so hold windows can expire;
/// an input arriving after an expired deadline resolves that deadline first.
///
/// Conversions use the geometry and transform passed with each call, so the
/// recognizer never holds on to view state.
#[derive(Clone, Debug)]
pub struct GestureRecognizer {
    config: GestureConfig,
    slots: [ButtonPhase; 5],
    pointer_locked: bool,
}

impl GestureRecognizer {
    /// Creates an idle recognizer.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            slots: [ButtonPhase::Idle; 5],
            pointer_locked: false,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replaces the configuration. Presses in flight keep their deadlines.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Phase of one button slot.
    #[must_use]
    pub fn phase(&self, button: PointerButton) -> &ButtonPhase {
        &self.slots[button.index()]
    }

    /// Buttons currently pressed inside the viewer.
    #[must_use]
    pub fn held_buttons(&self) -> Buttons {
        PointerButton::ALL
            .into_iter()
            .filter(|b| !self.slots[b.index()].is_idle())
            .fold(Buttons::empty(), |acc, b| acc | b.as_buttons())
    }

    /// Returns `true` while a pointer lock is requested.
    #[must_use]
    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Earliest pending hold deadline, for hosts scheduling their next tick.
    #[must_use]
    pub fn next_deadline(&self) -> Option<f64> {
        self.slots
            .iter()
            .filter_map(|slot| match slot {
                ButtonPhase::Pending(press) => Some(press.deadline),
                _ => None,
            })
            .reduce(f64::min)
    }

    /// Drops every press in flight without emitting events.
    ///
    /// Releases the pointer lock if one was requested.
    pub fn reset(&mut self) -> GestureOutput {
        let mut out = GestureOutput::default();
        self.slots = [ButtonPhase::Idle; 5];
        if self.pointer_locked {
            self.pointer_locked = false;
            out.pointer_lock = Some(PointerLock::Release);
        }
        out
    }

    /// Expires hold windows that ended at or before `now`.
    pub fn tick(
        &mut self,
        now: f64,
        geometry: &GeometryModel,
        transform: &Transform,
    ) -> GestureOutput {
        let mut out = GestureOutput::default();
        let view = ViewRef {
            geometry,
            transform,
        };
        self.promote_expired(now, view, &mut out);
        out
    }

    /// Processes one raw input.
    pub fn handle(
        &mut self,
        input: PointerInput,
        geometry: &GeometryModel,
        transform: &Transform,
    ) -> GestureOutput {
        let mut out = GestureOutput::default();
        let view = ViewRef {
            geometry,
            transform,
        };
        self.promote_expired(input.state().time, view, &mut out);
        match input {
            PointerInput::Down { button, state } => self.on_down(button, state),
            PointerInput::Move { movement, state } => {
                self.on_move(movement, state, view, &mut out);
            }
            PointerInput::Up { button, state } => self.on_up(button, state, view, &mut out),
            PointerInput::Enter(state) => {
                let info = self.info(view, state.position, Vec2::ZERO, state.modifiers, None);
                out.events.push(GestureEvent::Enter(info));
            }
            PointerInput::Leave(state) => {
                let info = self.info(view, state.position, Vec2::ZERO, state.modifiers, None);
                out.events.push(GestureEvent::Leave(info));
            }
            PointerInput::Wheel { delta, state } => self.on_wheel(delta, state, view, &mut out),
        }
        out
    }

    fn on_down(&mut self, button: PointerButton, state: PointerState) {
        let slot = &mut self.slots[button.index()];
        if !slot.is_idle() {
            log::debug!("{button:?} pressed again before release, restarting press");
        }
        *slot = ButtonPhase::Pending(PressState::start(state, self.config.hold_time_ms));
        log::debug!("{button:?} pending at {:?}", state.position);
    }

    fn on_move(
        &mut self,
        movement: Vec2,
        state: PointerState,
        view: ViewRef<'_>,
        out: &mut GestureOutput,
    ) {
        let mut dragging = None;
        let mut pans = false;
        let mut held = false;
        for button in PointerButton::ALL {
            match &mut self.slots[button.index()] {
                ButtonPhase::Idle => {}
                ButtonPhase::Pending(press) => {
                    held = true;
                    press.update(state.position);
                    if rect::norm(press.total_offset()) >= self.config.drag_threshold {
                        log::debug!("{button:?} moved past the drag threshold");
                        self.begin_drag(button, view, out);
                    }
                }
                ButtonPhase::Dragging(press) => {
                    held = true;
                    press.advance(movement);
                    dragging.get_or_insert(button);
                    pans |= self.config.pan_buttons.contains(button.as_buttons());
                }
            }
        }

        if let Some(button) = dragging {
            let info = self.info(view, state.position, movement, state.modifiers, Some(button));
            out.events.push(GestureEvent::MouseMove(info));
            if pans && movement != Vec2::ZERO {
                out.intents.push(ViewIntent::Pan {
                    delta: -movement,
                    animation_ms: None,
                });
            }
        } else if !held {
            let info = self.info(view, state.position, movement, state.modifiers, None);
            out.events.push(GestureEvent::MouseMove(info));
        }
    }

    fn on_up(
        &mut self,
        button: PointerButton,
        state: PointerState,
        view: ViewRef<'_>,
        out: &mut GestureOutput,
    ) {
        let phase = core::mem::take(&mut self.slots[button.index()]);
        match phase {
            ButtonPhase::Idle => {}
            ButtonPhase::Pending(_) => {
                log::debug!("{button:?} resolved as click");
                let info = self.info(view, state.position, Vec2::ZERO, state.modifiers, Some(button));
                out.events.push(GestureEvent::Click(info));
            }
            ButtonPhase::Dragging(_) => {
                log::debug!("{button:?} drag ended");
                let info = self.info(view, state.position, Vec2::ZERO, state.modifiers, Some(button));
                out.events.push(GestureEvent::MouseUp(info));
                if self.pointer_locked && !self.slots.iter().any(ButtonPhase::is_dragging) {
                    self.pointer_locked = false;
                    out.pointer_lock = Some(PointerLock::Release);
                }
            }
        }
    }

    fn on_wheel(
        &mut self,
        delta: Vec2,
        state: PointerState,
        view: ViewRef<'_>,
        out: &mut GestureOutput,
    ) {
        let info = self.info(view, state.position, Vec2::ZERO, state.modifiers, None);
        let scene_delta = view
            .geometry
            .to_scene_vec(delta, CoordFrame::View, view.transform);
        out.events.push(GestureEvent::Wheel {
            info,
            delta: scene_delta,
        });

        let dy = delta.y;
        if !dy.is_finite() || dy == 0.0 {
            return;
        }
        let animation_ms = (dy.abs() > 1.0).then_some(self.config.wheel_animation_ms);
        let at_min = view.transform.zoom <= view.geometry.min_zoom() + MIN_ZOOM_TOLERANCE;
        if at_min && dy > 0.0 {
            if let Some(delta) = bump(view, info.cursor, dy) {
                log::debug!("wheel at minimum zoom, bumping view by {delta:?}");
                out.intents.push(ViewIntent::Bump {
                    delta,
                    duration_ms: self.config.wheel_animation_ms,
                });
            }
            return;
        }
        out.intents.push(ViewIntent::Zoom {
            delta: -dy * self.config.wheel_zoom_factor,
            pivot: state.position,
            animation_ms,
        });
    }

    fn promote_expired(&mut self, now: f64, view: ViewRef<'_>, out: &mut GestureOutput) {
        for button in PointerButton::ALL {
            if let ButtonPhase::Pending(press) = &self.slots[button.index()] {
                if press.expired(now) {
                    log::debug!("{button:?} held past the hold time");
                    self.begin_drag(button, view, out);
                }
            }
        }
    }

    /// Turns a pending slot into a drag, replaying the press and the movement
    /// accumulated while it was pending.
    fn begin_drag(&mut self, button: PointerButton, view: ViewRef<'_>, out: &mut GestureOutput) {
        let ButtonPhase::Pending(press) = self.slots[button.index()] else {
            return;
        };
        self.slots[button.index()] = ButtonPhase::Dragging(press);

        let modifiers = press.down.modifiers;
        let down = self.info(view, press.start_pos, Vec2::ZERO, modifiers, Some(button));
        out.events.push(GestureEvent::MouseDown(down));
        let offset = press.total_offset();
        let moved = self.info(view, press.last_pos, offset, modifiers, Some(button));
        out.events.push(GestureEvent::MouseMove(moved));
        if self.config.pan_buttons.contains(button.as_buttons()) && offset != Vec2::ZERO {
            out.intents.push(ViewIntent::Pan {
                delta: -offset,
                animation_ms: None,
            });
        }

        if !self.pointer_locked {
            self.pointer_locked = true;
            out.pointer_lock = Some(PointerLock::Request);
        }
    }

    fn info(
        &self,
        view: ViewRef<'_>,
        position: Point,
        movement: Vec2,
        modifiers: Modifiers,
        button: Option<PointerButton>,
    ) -> PointerInfo {
        let ViewRef {
            geometry,
            transform,
        } = view;
        PointerInfo {
            cursor: geometry.to_scene_point(position, CoordFrame::View, transform),
            view_cursor: position,
            movement: geometry.to_scene_vec(movement, CoordFrame::View, transform),
            modifiers,
            button,
            buttons: self.held_buttons(),
        }
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

#[derive(Clone, Copy)]
struct ViewRef<'a> {
    geometry: &'a GeometryModel,
    transform: &'a Transform,
}

/// View-space pan moving the center from the domain center toward `cursor`,
/// at most `limit` pixels long.
fn bump(view: ViewRef<'_>, cursor: Point, limit: f64) -> Option<Vec2> {
    let offset = cursor - view.geometry.scene_domain().center();
    let toward = offset * view.geometry.scale(view.transform);
    let len = rect::norm(toward);
    if !(len > 0.0 && len.is_finite()) {
        return None;
    }
    Some(toward * (limit / len).min(1.0))
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};
    use panview_geometry::{GeometryModel, Transform};

    use super::*;

    fn model() -> (GeometryModel, Transform) {
        let mut geometry = GeometryModel::new(Size::new(400.0, 300.0), 50.0);
        geometry.set_scene_rect(Rect::new(0.0, 0.0, 1000.0, 750.0));
        (geometry, Transform::scene(Point::new(500.0, 375.0), 0.0))
    }

    fn at(x: f64, y: f64, time: f64) -> PointerState {
        PointerState::new(Point::new(x, y), time)
    }

    fn down(x: f64, y: f64, time: f64) -> PointerInput {
        PointerInput::Down {
            button: PointerButton::Primary,
            state: at(x, y, time),
        }
    }

    fn up(x: f64, y: f64, time: f64) -> PointerInput {
        PointerInput::Up {
            button: PointerButton::Primary,
            state: at(x, y, time),
        }
    }

    fn mv(x: f64, y: f64, dx: f64, dy: f64, time: f64) -> PointerInput {
        PointerInput::Move {
            movement: Vec2::new(dx, dy),
            state: at(x, y, time),
        }
    }

    #[test]
    fn press_alone_emits_nothing() {
        let (g, t) = model();
        let mut r = GestureRecognizer::default();
        assert!(r.handle(down(100.0, 100.0, 0.0), &g, &t).is_empty());
        assert!(r.phase(PointerButton::Primary).is_pending());
        assert_eq!(r.held_buttons(), Buttons::PRIMARY);
        assert_eq!(r.next_deadline(), Some(750.0));
    }

    #[test]
    fn small_moves_then_release_is_a_click() {
        let (g, t) = model();
        let mut r = GestureRecognizer::default();
        r.handle(down(100.0, 100.0, 0.0), &g, &t);
        assert!(r.handle(mv(103.0, 102.0, 3.0, 2.0, 50.0), &g, &t).is_empty());
        let out = r.handle(up(103.0, 102.0, 100.0), &g, &t);
        assert_eq!(out.events.len(), 1);
        let GestureEvent::Click(info) = out.events[0] else {
            panic!("expected click, got {:?}", out.events[0]);
        };
        assert_eq!(info.button, Some(PointerButton::Primary));
        assert_eq!(info.view_cursor, Point::new(103.0, 102.0));
        assert_eq!(info.buttons, Buttons::empty());
        assert!(out.intents.is_empty());
        assert!(r.phase(PointerButton::Primary).is_idle());
    }

    #[test]
    fn moving_past_threshold_starts_a_drag() {
        let (g, t) = model();
        let mut r = GestureRecognizer::default();
        r.handle(down(100.0, 100.0, 0.0), &g, &t);
        let out = r.handle(mv(106.0, 100.0, 6.0, 0.0, 20.0), &g, &t);

        assert_eq!(out.events.len(), 2);
        let GestureEvent::MouseDown(start) = out.events[0] else {
            panic!("expected drag start");
        };
        assert_eq!(start.view_cursor, Point::new(100.0, 100.0));
        let GestureEvent::MouseMove(moved) = out.events[1] else {
            panic!("expected drag move");
        };
        // 6 px at scale 0.4.
        assert!((moved.movement.x - 15.0).abs() < 1e-9);
        assert_eq!(
            out.intents.as_slice(),
            &[ViewIntent::Pan {
                delta: Vec2::new(-6.0, 0.0),
                animation_ms: None,
            }]
        );
        assert_eq!(out.pointer_lock, Some(PointerLock::Request));
        assert!(r.pointer_locked());
    }

    #[test]
    fn drag_moves_use_relative_movement() {
        let (g, t) = model();
        let mut r = GestureRecognizer::default();
        r.handle(down(100.0, 100.0, 0.0), &g, &t);
        r.handle(mv(110.0, 100.0, 10.0, 0.0, 10.0), &g, &t);
        // Position frozen by pointer lock; only movement is meaningful.
        let out = r.handle(mv(110.0, 100.0, 4.0, -2.0, 20.0), &g, &t);
        assert_eq!(out.events.len(), 1);
        let info = out.events[0].info();
        assert!((info.movement.x - 10.0).abs() < 1e-9);
        assert!((info.movement.y + 5.0).abs() < 1e-9);
        assert_eq!(
            out.intents.as_slice(),
            &[ViewIntent::Pan {
                delta: Vec2::new(-4.0, 2.0),
                animation_ms: None,
            }]
        );

        let out = r.handle(up(110.0, 100.0, 30.0), &g, &t);
        assert!(matches!(out.events[0], GestureEvent::MouseUp(_)));
        assert_eq!(out.pointer_lock, Some(PointerLock::Release));
        assert!(!r.pointer_locked());
    }

    #[test]
    fn hold_timeout_promotes_to_drag() {
        let (g, t) = model();
        let mut r = GestureRecognizer::default();
        r.handle(down(100.0, 100.0, 0.0), &g, &t);
        r.handle(mv(102.0, 101.0, 2.0, 1.0, 100.0), &g, &t);
        assert!(r.tick(749.0, &g, &t).is_empty());

        let out = r.tick(750.0, &g, &t);
        assert!(matches!(out.events[0], GestureEvent::MouseDown(_)));
        let GestureEvent::MouseMove(moved) = out.events[1] else {
            panic!("expected accumulated move");
        };
        assert_eq!(moved.view_cursor, Point::new(102.0, 101.0));
        assert!((moved.movement.x - 5.0).abs() < 1e-9);
        assert!(r.phase(PointerButton::Primary).is_dragging());

        let out = r.handle(up(102.0, 101.0, 800.0), &g, &t);
        assert!(matches!(out.events[0], GestureEvent::MouseUp(_)));
    }

    #[test]
    fn late_release_resolves_expired_hold_first() {
        let (g, t) = model();
        let mut r = GestureRecognizer::default();
        r.handle(down(100.0, 100.0, 0.0), &g, &t);
        // No tick between; the release arrives after the deadline.
        let out = r.handle(up(100.0, 100.0, 900.0), &g, &t);
        let kinds: SmallVec<[u8; 4]> = out
            .events
            .iter()
            .map(|e| match e {
                GestureEvent::MouseDown(_) => 0,
                GestureEvent::MouseMove(_) => 1,
                GestureEvent::MouseUp(_) => 2,
                _ => 9,
            })
            .collect();
        assert_eq!(kinds.as_slice(), &[0, 1, 2]);
        assert_eq!(out.pointer_lock, Some(PointerLock::Release));
    }

    #[test]
    fn secondary_drag_does_not_pan() {
        let (g, t) = model();
        let mut r = GestureRecognizer::default();
        let button = PointerButton::Secondary;
        r.handle(
            PointerInput::Down {
                button,
                state: at(0.0, 0.0, 0.0),
            },
            &g,
            &t,
        );
        let out = r.handle(mv(20.0, 0.0, 20.0, 0.0, 10.0), &g, &t);
        assert_eq!(out.events.len(), 2);
        assert!(out.intents.is_empty());
        assert_eq!(out.events[1].info().buttons, Buttons::SECONDARY);
    }

    #[test]
    fn hover_moves_carry_no_button() {
        let (g, t) = model();
        let mut r = GestureRecognizer::default();
        let out = r.handle(mv(200.0, 150.0, 1.0, 1.0, 0.0), &g, &t);
        let GestureEvent::MouseMove(info) = out.events[0] else {
            panic!("expected hover move");
        };
        assert_eq!(info.button, None);
        assert_eq!(info.buttons, Buttons::empty());
        assert_eq!(info.cursor, Point::new(500.0, 375.0));
    }

    #[test]
    fn enter_and_leave_pass_through() {
        let (g, t) = model();
        let mut r = GestureRecognizer::default();
        let state = at(0.0, 0.0, 0.0).with_modifiers(Modifiers::SHIFT);
        let out = r.handle(PointerInput::Enter(state), &g, &t);
        assert!(matches!(out.events[0], GestureEvent::Enter(_)));
        assert_eq!(out.events[0].info().modifiers, Modifiers::SHIFT);
        let out = r.handle(PointerInput::Leave(state), &g, &t);
        assert!(matches!(out.events[0], GestureEvent::Leave(_)));
    }

    #[test]
    fn small_wheel_zooms_immediately_at_cursor() {
        let (g, t) = model();
        let t = t.with_zoom(1.0);
        let mut r = GestureRecognizer::default();
        let out = r.handle(
            PointerInput::Wheel {
                delta: Vec2::new(0.0, -1.0),
                state: at(50.0, 60.0, 0.0),
            },
            &g,
            &t,
        );
        assert!(matches!(out.events[0], GestureEvent::Wheel { .. }));
        assert_eq!(
            out.intents.as_slice(),
            &[ViewIntent::Zoom {
                delta: 0.01,
                pivot: Point::new(50.0, 60.0),
                animation_ms: None,
            }]
        );
    }

    #[test]
    fn large_wheel_is_animated() {
        let (g, t) = model();
        let t = t.with_zoom(1.0);
        let mut r = GestureRecognizer::default();
        let out = r.handle(
            PointerInput::Wheel {
                delta: Vec2::new(0.0, 100.0),
                state: at(50.0, 60.0, 0.0),
            },
            &g,
            &t,
        );
        let ViewIntent::Zoom {
            delta,
            animation_ms,
            ..
        } = out.intents[0]
        else {
            panic!("expected zoom");
        };
        assert!((delta + 1.0).abs() < 1e-12);
        assert_eq!(animation_ms, Some(200.0));
    }

    #[test]
    fn wheel_out_at_min_zoom_bumps_instead() {
        let (g, t) = model();
        let t = t.with_zoom(g.min_zoom());
        let mut r = GestureRecognizer::default();
        // Cursor on the right edge: domain center is to the left.
        let out = r.handle(
            PointerInput::Wheel {
                delta: Vec2::new(0.0, 3.0),
                state: at(400.0, 150.0, 0.0),
            },
            &g,
            &t,
        );
        assert_eq!(out.intents.len(), 1);
        let ViewIntent::Bump { delta, duration_ms } = out.intents[0] else {
            panic!("expected bump, got {:?}", out.intents[0]);
        };
        assert!((delta.x - 3.0).abs() < 1e-9);
        assert!(delta.y.abs() < 1e-9);
        assert_eq!(duration_ms, 200.0);
    }

    #[test]
    fn wheel_in_at_min_zoom_still_zooms() {
        let (g, t) = model();
        let t = t.with_zoom(g.min_zoom());
        let mut r = GestureRecognizer::default();
        let out = r.handle(
            PointerInput::Wheel {
                delta: Vec2::new(0.0, -1.0),
                state: at(400.0, 150.0, 0.0),
            },
            &g,
            &t,
        );
        assert!(matches!(out.intents[0], ViewIntent::Zoom { .. }));
    }

    #[test]
    fn reset_releases_lock() {
        let (g, t) = model();
        let mut r = GestureRecognizer::default();
        r.handle(down(0.0, 0.0, 0.0), &g, &t);
        r.tick(1000.0, &g, &t);
        assert!(r.pointer_locked());
        let out = r.reset();
        assert_eq!(out.pointer_lock, Some(PointerLock::Release));
        assert_eq!(r.held_buttons(), Buttons::empty());
        assert!(r.next_deadline().is_none());
    }
}
