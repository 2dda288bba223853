// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panview Store: action-driven pan/zoom state for 2D viewers.
//!
//! This crate ties the Panview pieces together:
//!
//! - [`TransformStore`]: owns a [`GeometryModel`](panview_geometry::GeometryModel)
//!   and the current [`Transform`](panview_geometry::Transform), and reduces
//!   each [`Action`] to a new constrained transform, immediately or through an
//!   animated transition.
//! - [`SyncBus`]: last-value-wins sharing of transforms between linked views,
//!   keyed by [`LinkGroup`].
//! - [`Viewer`]: a store plus a [`GestureRecognizer`](panview_gesture::GestureRecognizer),
//!   turning raw pointer input into pans and zooms.
//!
//! Everything runs on the caller's thread. The host calls `tick(now)` once
//! per frame to advance animations and to pull updates from linked views.
//!
//! ## Linked views
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use panview_geometry::CoordFrame;
//! use panview_store::{Action, SyncBus, TransformStore};
//!
//! let scene = Rect::new(0.0, 0.0, 1000.0, 750.0);
//! let mut a = TransformStore::new(Size::new(400.0, 300.0), 50.0);
//! let mut b = TransformStore::new(Size::new(400.0, 300.0), 50.0);
//! a.dispatch(Action::SceneRect(scene));
//! b.dispatch(Action::SceneRect(scene));
//!
//! let bus = SyncBus::new();
//! a.link(&bus, "A".into());
//! b.link(&bus, "A".into());
//!
//! a.dispatch(Action::zoom_at(2.0, Point::new(200.0, 100.0), CoordFrame::Scene));
//! b.tick(0.0);
//! assert_eq!(a.transform(), b.transform());
//! ```
//!
//! ## Animated transitions
//!
//! Direct actions accept [`AnimationOptions`]. Without explicit keyframes
//! the transition shape follows the zoom change: zooming out eases out,
//! small moves ease in and out, and a large zoom-in to a distant point backs
//! out slightly before diving in. Zooms around a pivot keep the pivot fixed
//! on screen on every frame.
//!
//! This crate is `no_std` and requires `alloc`.

#![no_std]

extern crate alloc;

mod action;
mod animate;
mod config;
mod store;
mod sync;
mod viewer;

pub use action::{Action, AnimationOptions, BUMP_DURATION_MS};
pub use config::ViewerConfig;
pub use store::{TransformStore, link_stores};
pub use sync::{LinkGroup, SubscriberId, Subscription, SyncBus};
pub use viewer::Viewer;
