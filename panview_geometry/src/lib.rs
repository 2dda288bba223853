// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panview Geometry: the coordinate model behind a pannable, zoomable 2D viewer.
//!
//! A viewer displays stacked data layers over a shared *scene* space. This
//! crate reconciles three frames:
//! - **View**: device pixels of the viewport element.
//! - **Scene**: the logical data space (for example, image pixel coordinates).
//! - **Relative**: the scene normalized so the *default domain* is the unit
//!   square.
//!
//! [`GeometryModel`] holds the viewport size, the scene rectangle, the optional
//! default domain and the maximum scale. A [`Transform`] (center + log2 zoom
//! level) is interpreted against a model to convert coordinates, to constrain
//! pan/zoom, and to zoom around a pivot.
//!
//! It does **not** own the current transform or any input handling; see
//! `panview_store` for the action-driven state machine built on top of it.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use panview_geometry::{CoordFrame, GeometryModel, Transform};
//!
//! let mut geometry = GeometryModel::new(Size::new(400.0, 300.0), 50.0);
//! geometry.set_scene_rect(Rect::new(0.0, 0.0, 1000.0, 750.0));
//!
//! // Zoom level 0 fits the scene into the viewport.
//! assert!((geometry.default_scale() - 0.4).abs() < 1e-9);
//!
//! // Convert a pixel position into scene coordinates.
//! let t = Transform::scene(Point::new(500.0, 375.0), 1.0);
//! let scene = geometry.to_scene_point(Point::new(200.0, 150.0), CoordFrame::View, &t);
//! assert!((scene.x - 500.0).abs() < 1e-9);
//! ```
//!
//! ## Zoom levels
//!
//! Zoom is `log2(scale / default_scale)`, where the default scale makes the
//! default domain (or the scene rectangle when none is set) exactly fit the
//! viewport. Zoom is clamped to `[min_zoom, max_zoom]`: the minimum shows the
//! whole scene, the maximum corresponds to the configured maximum scale.
//!
//! ## Degenerate inputs
//!
//! Nothing here fails. An empty scene or a zero-sized viewport yields unit
//! scales and zero padding; NaN centers reset to the origin; out-of-range
//! zoom levels are clamped.
//!
//! This crate is `no_std`.

#![no_std]

mod frame;
mod model;
pub mod rect;
mod transform;

pub use frame::{CenterFrame, CoordFrame};
pub use model::{GeometryDebugInfo, GeometryModel, MIN_SCALE_EPSILON};
pub use transform::{PersistedTransform, PersistedTransformError, Transform};
