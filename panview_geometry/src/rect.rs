// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point and rectangle helpers that `kurbo` does not provide directly.
//!
//! Rectangles are plain [`kurbo::Rect`] values. A rectangle is considered
//! *empty* when its width or height is not strictly positive; most helpers
//! here treat empty rectangles as "no constraint" rather than as errors.

use kurbo::{Point, Rect, Size, Vec2};

/// Returns `true` when `rect` has a non-positive (or NaN) width or height.
#[must_use]
pub fn is_empty(rect: Rect) -> bool {
    !(rect.width() > 0.0 && rect.height() > 0.0)
}

/// Clips `p` into `rect`, one axis at a time.
///
/// `rect` is normalized first, so inverted rectangles behave like their
/// absolute counterpart.
#[must_use]
pub fn clip_point(p: Point, rect: Rect) -> Point {
    let r = rect.abs();
    Point::new(p.x.max(r.x0).min(r.x1), p.y.max(r.y0).min(r.y1))
}

/// Component-wise minimum of two points.
#[must_use]
pub fn min_point(a: Point, b: Point) -> Point {
    Point::new(a.x.min(b.x), a.y.min(b.y))
}

/// Component-wise maximum of two points.
#[must_use]
pub fn max_point(a: Point, b: Point) -> Point {
    Point::new(a.x.max(b.x), a.y.max(b.y))
}

/// Euclidean norm of a vector.
#[must_use]
pub fn norm(v: Vec2) -> f64 {
    libm::hypot(v.x, v.y)
}

/// Component-wise minimum of two vectors.
#[must_use]
pub fn min_vec(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x.min(b.x), a.y.min(b.y))
}

/// Grows (positive) or shrinks (negative) `rect` by `pad` on each side.
///
/// Shrinking past the center collapses the axis onto the center instead of
/// producing an inverted rectangle.
#[must_use]
pub fn pad(rect: Rect, pad: Vec2) -> Rect {
    let c = rect.center();
    let half_w = (rect.width() / 2.0 + pad.x).max(0.0);
    let half_h = (rect.height() / 2.0 + pad.y).max(0.0);
    Rect::new(c.x - half_w, c.y - half_h, c.x + half_w, c.y + half_h)
}

/// Divisor used to normalize against `domain`: zero-sized axes count as `1`.
fn domain_extent(domain: Rect) -> Size {
    let w = domain.width();
    let h = domain.height();
    Size::new(
        if w > 0.0 { w } else { 1.0 },
        if h > 0.0 { h } else { 1.0 },
    )
}

/// Maps `p` into the frame where `domain` is the unit square.
#[must_use]
pub fn point_relative_to(p: Point, domain: Rect) -> Point {
    let extent = domain_extent(domain);
    Point::new(
        (p.x - domain.x0) / extent.width,
        (p.y - domain.y0) / extent.height,
    )
}

/// Inverse of [`point_relative_to`].
#[must_use]
pub fn point_from_relative(p: Point, domain: Rect) -> Point {
    let extent = domain_extent(domain);
    Point::new(
        domain.x0 + p.x * extent.width,
        domain.y0 + p.y * extent.height,
    )
}

/// Scales a vector expressed in `domain` units into unit-square units.
#[must_use]
pub fn vec_relative_to(v: Vec2, domain: Rect) -> Vec2 {
    let extent = domain_extent(domain);
    Vec2::new(v.x / extent.width, v.y / extent.height)
}

/// Inverse of [`vec_relative_to`].
#[must_use]
pub fn vec_from_relative(v: Vec2, domain: Rect) -> Vec2 {
    let extent = domain_extent(domain);
    Vec2::new(v.x * extent.width, v.y * extent.height)
}

/// Maps `rect` onto the frame where `domain` is the unit square.
#[must_use]
pub fn rect_relative_to(rect: Rect, domain: Rect) -> Rect {
    Rect::from_points(
        point_relative_to(rect.origin(), domain),
        point_relative_to(Point::new(rect.x1, rect.y1), domain),
    )
}

/// Inverse of [`rect_relative_to`].
#[must_use]
pub fn rect_from_relative(rect: Rect, domain: Rect) -> Rect {
    Rect::from_points(
        point_from_relative(rect.origin(), domain),
        point_from_relative(Point::new(rect.x1, rect.y1), domain),
    )
}
