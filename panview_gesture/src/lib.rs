// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panview Gesture: click, drag and wheel disambiguation for pan/zoom viewers.
//!
//! This crate turns raw pointer and wheel input into semantic gesture events
//! expressed in scene coordinates, plus the view changes (pan, zoom) those
//! gestures imply:
//!
//! - [`input`]: raw [`PointerInput`] with [`Modifiers`] and [`Buttons`] flags.
//! - [`drag`]: per-button [`PressState`](drag::PressState) and slot phases.
//! - [`GestureRecognizer`]: the state machine resolving click vs. drag with a
//!   hold time and a movement threshold, and wheel steps into zoom-at-cursor
//!   or, at minimum zoom, a "bump" that pushes the view past the scene edge.
//!
//! The recognizer owns no timer and no view state. Every input carries a
//! host timestamp, the host calls [`GestureRecognizer::tick`] so hold windows
//! can expire, and conversions use the [`GeometryModel`](panview_geometry::GeometryModel)
//! and [`Transform`](panview_geometry::Transform) passed with each call.
//!
//! ## Click vs. drag
//!
//! ```rust
//! use kurbo::{Point, Rect, Size, Vec2};
//! use panview_geometry::{GeometryModel, Transform};
//! use panview_gesture::{
//!     GestureEvent, GestureRecognizer, PointerButton, PointerInput, PointerState, ViewIntent,
//! };
//!
//! let mut geometry = GeometryModel::new(Size::new(400.0, 300.0), 20.0);
//! geometry.set_scene_rect(Rect::new(0.0, 0.0, 1000.0, 750.0));
//! let transform = Transform::scene(Point::new(500.0, 375.0), 0.0);
//! let mut gestures = GestureRecognizer::default();
//!
//! let press = PointerInput::Down {
//!     button: PointerButton::Primary,
//!     state: PointerState::new(Point::new(200.0, 150.0), 0.0),
//! };
//! assert!(gestures.handle(press, &geometry, &transform).is_empty());
//!
//! // Moving 10 px resolves the press as a drag that pans the view.
//! let drag = PointerInput::Move {
//!     movement: Vec2::new(10.0, 0.0),
//!     state: PointerState::new(Point::new(210.0, 150.0), 16.0),
//! };
//! let out = gestures.handle(drag, &geometry, &transform);
//! assert!(matches!(out.events[0], GestureEvent::MouseDown(_)));
//! assert!(matches!(out.intents[0], ViewIntent::Pan { .. }));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod config;
pub mod drag;
pub mod input;
mod recognizer;

pub use config::GestureConfig;
pub use input::{Buttons, Modifiers, PointerButton, PointerInput, PointerState};
pub use recognizer::{
    GestureEvent, GestureOutput, GestureRecognizer, PointerInfo, PointerLock, ViewIntent,
};
