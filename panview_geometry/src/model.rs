// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::cell::Cell;

use kurbo::{Point, Rect, Size, Vec2};

use crate::frame::{CenterFrame, CoordFrame};
use crate::rect::{self, is_empty};
use crate::transform::Transform;

/// Added to the fitting scale when deriving the minimum scale, so that the
/// fully zoomed-out view still leaves the scene boundary a sliver of room.
pub const MIN_SCALE_EPSILON: f64 = 1e-6;

/// Values derived from the model inputs, recomputed lazily.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Derived {
    default_scale: f64,
    min_scale: f64,
    min_zoom: f64,
    max_zoom: f64,
    relative_scene_boundaries: Rect,
}

/// Geometry of one viewer: the viewport size, the scene extent, the default
/// domain that anchors zoom level 0, and the maximum magnification.
///
/// `GeometryModel` is a pure model. It owns no transform; every conversion
/// takes the [`Transform`] to interpret explicitly. It can be used to:
/// - Convert points, vectors and rectangles between view, scene and relative
///   frames.
/// - Derive zoom bounds and convert between zoom levels and scales.
/// - Constrain a transform so the view stays over the scene.
/// - Zoom around a pivot point and fit a rectangle into the viewport.
///
/// Derived values (default scale, zoom bounds, relative scene boundaries) are
/// memoized and invalidated by any setter that changes an input.
#[derive(Clone, Debug)]
pub struct GeometryModel {
    view_size: Size,
    scene_rect: Rect,
    scene_default_rect: Option<Rect>,
    max_scale: f64,
    derived: Cell<Option<Derived>>,
}

impl GeometryModel {
    /// Creates a model for a viewport of `view_size` pixels with an empty
    /// scene and no default domain.
    #[must_use]
    pub fn new(view_size: Size, max_scale: f64) -> Self {
        Self {
            view_size: sanitize_size(view_size),
            scene_rect: Rect::ZERO,
            scene_default_rect: None,
            max_scale: sanitize_max_scale(max_scale),
            derived: Cell::new(None),
        }
    }

    /// Current viewport size in pixels.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Sets the viewport size. Returns `false` when the size is unchanged.
    ///
    /// Negative or NaN dimensions are treated as zero.
    pub fn set_view_size(&mut self, size: Size) -> bool {
        let size = sanitize_size(size);
        if self.view_size == size {
            return false;
        }
        self.view_size = size;
        self.invalidate();
        true
    }

    /// Union of all visible layer domains.
    #[must_use]
    pub fn scene_rect(&self) -> Rect {
        self.scene_rect
    }

    /// Sets the scene rectangle. Returns `false` when it is unchanged.
    pub fn set_scene_rect(&mut self, rect: Rect) -> bool {
        if self.scene_rect == rect {
            return false;
        }
        self.scene_rect = rect;
        self.invalidate();
        true
    }

    /// Optional rectangle that exactly fills the viewport at zoom level 0.
    #[must_use]
    pub fn scene_default_rect(&self) -> Option<Rect> {
        self.scene_default_rect
    }

    /// Sets the default domain. Returns `false` when it is unchanged.
    pub fn set_scene_default_rect(&mut self, rect: Option<Rect>) -> bool {
        if self.scene_default_rect == rect {
            return false;
        }
        self.scene_default_rect = rect;
        self.invalidate();
        true
    }

    /// Maximum allowed scale (scene units to pixels).
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Sets the maximum scale. Returns `false` when it is unchanged.
    ///
    /// Non-positive or NaN values fall back to `1.0`.
    pub fn set_max_scale(&mut self, max_scale: f64) -> bool {
        let max_scale = sanitize_max_scale(max_scale);
        if self.max_scale == max_scale {
            return false;
        }
        self.max_scale = max_scale;
        self.invalidate();
        true
    }

    /// The rectangle relative coordinates are expressed against: the default
    /// domain when one is set and non-empty, the scene rectangle otherwise.
    #[must_use]
    pub fn scene_domain(&self) -> Rect {
        match self.scene_default_rect {
            Some(r) if !is_empty(r) => r,
            _ => self.scene_rect,
        }
    }

    /// Scale at which the scene domain exactly fits the viewport.
    ///
    /// `1.0` when the domain is empty or the viewport has no area.
    #[must_use]
    pub fn default_scale(&self) -> f64 {
        self.derived().default_scale
    }

    /// Smallest allowed scale: the whole scene fits in the viewport.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.derived().min_scale
    }

    /// Zoom level of [`GeometryModel::min_scale`].
    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.derived().min_zoom
    }

    /// Zoom level of [`GeometryModel::max_scale`].
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.derived().max_zoom
    }

    /// Scene rectangle expressed in relative coordinates.
    #[must_use]
    pub fn relative_scene_boundaries(&self) -> Rect {
        self.derived().relative_scene_boundaries
    }

    /// Converts a zoom level into a scale.
    #[must_use]
    pub fn zoom2scale(&self, zoom: f64) -> f64 {
        libm::exp2(zoom) * self.default_scale()
    }

    /// Converts a scale into a zoom level.
    #[must_use]
    pub fn scale2zoom(&self, scale: f64) -> f64 {
        libm::log2(scale / self.default_scale())
    }

    /// Scale of `t` (pixels per scene unit).
    #[must_use]
    pub fn scale(&self, t: &Transform) -> f64 {
        self.zoom2scale(t.zoom)
    }

    /// Center of `t` in scene coordinates, whatever frame it is stored in.
    #[must_use]
    pub fn scene_center(&self, t: &Transform) -> Point {
        match t.coord {
            CenterFrame::Scene => t.center,
            CenterFrame::Relative => rect::point_from_relative(t.center, self.scene_domain()),
        }
    }

    /// Expresses a scene-space point in the given center frame.
    #[must_use]
    pub fn center_in_frame(&self, scene_point: Point, frame: CenterFrame) -> Point {
        match frame {
            CenterFrame::Scene => scene_point,
            CenterFrame::Relative => rect::point_relative_to(scene_point, self.scene_domain()),
        }
    }

    /// `t` re-expressed with a scene-space center.
    #[must_use]
    pub fn to_scene_transform(&self, t: &Transform) -> Transform {
        Transform::scene(self.scene_center(t), t.zoom)
    }

    /// `t` re-expressed with a relative-space center.
    #[must_use]
    pub fn to_relative_transform(&self, t: &Transform) -> Transform {
        Transform::relative(
            self.center_in_frame(self.scene_center(t), CenterFrame::Relative),
            t.zoom,
        )
    }

    fn view_center(&self) -> Point {
        Point::new(self.view_size.width / 2.0, self.view_size.height / 2.0)
    }

    /// Converts `p`, expressed in `from`, into scene coordinates under `t`.
    #[must_use]
    pub fn to_scene_point(&self, p: Point, from: CoordFrame, t: &Transform) -> Point {
        match from {
            CoordFrame::Scene => p,
            CoordFrame::Relative => rect::point_from_relative(p, self.scene_domain()),
            CoordFrame::View => {
                let scale = self.scale(t);
                self.scene_center(t) + (p - self.view_center()) / scale
            }
        }
    }

    /// Converts `p`, expressed in `from`, into view coordinates under `t`.
    #[must_use]
    pub fn to_view_point(&self, p: Point, from: CoordFrame, t: &Transform) -> Point {
        if from == CoordFrame::View {
            return p;
        }
        let scene = self.to_scene_point(p, from, t);
        self.view_center() + (scene - self.scene_center(t)) * self.scale(t)
    }

    /// Converts `p`, expressed in `from`, into relative coordinates under `t`.
    #[must_use]
    pub fn to_relative_point(&self, p: Point, from: CoordFrame, t: &Transform) -> Point {
        if from == CoordFrame::Relative {
            return p;
        }
        rect::point_relative_to(self.to_scene_point(p, from, t), self.scene_domain())
    }

    /// Converts `rect`, expressed in `from`, into scene coordinates under `t`.
    #[must_use]
    pub fn to_scene_rect(&self, rect: Rect, from: CoordFrame, t: &Transform) -> Rect {
        self.map_rect(rect, |p| self.to_scene_point(p, from, t))
    }

    /// Converts `rect`, expressed in `from`, into view coordinates under `t`.
    #[must_use]
    pub fn to_view_rect(&self, rect: Rect, from: CoordFrame, t: &Transform) -> Rect {
        self.map_rect(rect, |p| self.to_view_point(p, from, t))
    }

    /// Converts `rect`, expressed in `from`, into relative coordinates under `t`.
    #[must_use]
    pub fn to_relative_rect(&self, rect: Rect, from: CoordFrame, t: &Transform) -> Rect {
        self.map_rect(rect, |p| self.to_relative_point(p, from, t))
    }

    fn map_rect(&self, rect: Rect, f: impl Fn(Point) -> Point) -> Rect {
        // Every conversion is axis-aligned and uniformly scaled, so mapping the
        // two defining corners is enough.
        Rect::from_points(f(rect.origin()), f(Point::new(rect.x1, rect.y1)))
    }

    /// Converts a displacement expressed in `from` into scene units under `t`.
    #[must_use]
    pub fn to_scene_vec(&self, v: Vec2, from: CoordFrame, t: &Transform) -> Vec2 {
        match from {
            CoordFrame::Scene => v,
            CoordFrame::Relative => rect::vec_from_relative(v, self.scene_domain()),
            CoordFrame::View => v / self.scale(t),
        }
    }

    /// Scene rectangle currently visible through the viewport.
    #[must_use]
    pub fn visible_area(&self, t: &Transform) -> Rect {
        let view = Rect::from_origin_size(Point::ORIGIN, self.view_size);
        self.to_scene_rect(view, CoordFrame::View, t)
    }

    /// Clamps `zoom` into `[min_zoom, max_zoom]`. NaN maps to `0.0` first.
    #[must_use]
    pub fn constraint_zoom(&self, zoom: f64) -> f64 {
        let zoom = if zoom.is_nan() {
            log::warn!("NaN zoom level replaced by 0");
            0.0
        } else {
            zoom
        };
        zoom.max(self.min_zoom()).min(self.max_zoom())
    }

    /// Clips the center of `t` so the view stays over the scene.
    ///
    /// The boundary is the scene rectangle shrunk by half the visible extent
    /// on each axis (at most half the scene size, so it never inverts). When
    /// `previous_center` is given, expressed in the same frame as `t`, it is
    /// unioned into the boundary: a center that used to be valid can move
    /// toward the new boundary but is never snapped into it.
    ///
    /// A NaN center, or an empty scene rectangle, resets the center to the
    /// origin.
    #[must_use]
    pub fn constraint_center(&self, t: Transform, previous_center: Option<Point>) -> Transform {
        if t.center.is_nan() {
            log::warn!("NaN transform center reset to the origin");
            return t.with_center(Point::ZERO);
        }
        if is_empty(self.scene_rect) {
            return t.with_center(Point::ZERO);
        }
        let scale = self.zoom2scale(t.zoom);
        let half_view = Vec2::new(
            self.view_size.width / (2.0 * scale),
            self.view_size.height / (2.0 * scale),
        );
        let half_scene = Vec2::new(self.scene_rect.width() / 2.0, self.scene_rect.height() / 2.0);
        let pad = rect::min_vec(half_view, half_scene);

        let mut boundary = match t.coord {
            CenterFrame::Scene => rect::pad(self.scene_rect, -pad),
            CenterFrame::Relative => rect::pad(
                self.relative_scene_boundaries(),
                -rect::vec_relative_to(pad, self.scene_domain()),
            ),
        };
        if let Some(previous) = previous_center.filter(|p| p.is_finite()) {
            boundary = boundary.union_pt(previous);
        }
        t.with_center(rect::clip_point(t.center, boundary))
    }

    /// Constrains both the zoom level and the center of `t`.
    #[must_use]
    pub fn constrain(&self, t: Transform, previous_center: Option<Point>) -> Transform {
        let t = t.with_zoom(self.constraint_zoom(t.zoom));
        self.constraint_center(t, previous_center)
    }

    /// Zooms `t` by `dzoom` levels, optionally around a pivot.
    ///
    /// The target zoom is clamped first and the actual (post-clamp) delta is
    /// used, so the pivot stays fixed on screen even when the request hits a
    /// zoom bound. Without a pivot, the center is only constrained.
    #[must_use]
    pub fn apply_zoom(
        &self,
        t: &Transform,
        dzoom: f64,
        pivot: Option<(Point, CoordFrame)>,
    ) -> Transform {
        let dzoom = if dzoom.is_finite() { dzoom } else { 0.0 };
        let zoom = self.constraint_zoom(t.zoom + dzoom);
        let actual = zoom - t.zoom;
        let mut out = t.with_zoom(zoom);
        if let Some((pivot, frame)) = pivot {
            let pivot = self.to_scene_point(pivot, frame, t);
            let center = self.scene_center(t);
            let moved = center + (pivot - center) * (1.0 - libm::exp2(-actual));
            out.center = self.center_in_frame(moved, t.coord);
        }
        self.constraint_center(out, None)
    }

    /// Transform whose visible area fits `rect` (expressed in `from`).
    ///
    /// The result is stored in relative coordinates. An empty `rect` only
    /// recenters on its center and keeps the zoom level of `t`.
    #[must_use]
    pub fn fit_rect(&self, rect: Rect, from: CoordFrame, t: &Transform) -> Transform {
        let scene = self.to_scene_rect(rect, from, t);
        let center = self.center_in_frame(scene.center(), CenterFrame::Relative);
        let zoom = match fit_scale(self.view_size, scene) {
            Some(scale) => self.scale2zoom(scale),
            None => t.zoom,
        };
        self.constrain(Transform::relative(center, zoom), None)
    }

    /// Snapshot of the current model state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> GeometryDebugInfo {
        let derived = self.derived();
        GeometryDebugInfo {
            view_size: self.view_size,
            scene_rect: self.scene_rect,
            scene_default_rect: self.scene_default_rect,
            max_scale: self.max_scale,
            default_scale: derived.default_scale,
            min_scale: derived.min_scale,
            min_zoom: derived.min_zoom,
            max_zoom: derived.max_zoom,
        }
    }

    fn invalidate(&self) {
        self.derived.set(None);
    }

    fn derived(&self) -> Derived {
        if let Some(derived) = self.derived.get() {
            return derived;
        }
        let derived = self.compute_derived();
        self.derived.set(Some(derived));
        derived
    }

    fn compute_derived(&self) -> Derived {
        let domain = self.scene_domain();
        let default_scale = fit_scale(self.view_size, domain).unwrap_or(1.0);
        let min_scale = if is_empty(self.scene_rect) {
            1.0
        } else {
            let fit = (self.view_size.width / self.scene_rect.width())
                .min(self.view_size.height / self.scene_rect.height());
            (fit + MIN_SCALE_EPSILON).min(self.max_scale)
        };
        let max_zoom = libm::log2(self.max_scale / default_scale);
        let min_zoom = libm::log2(min_scale / default_scale).min(max_zoom);
        Derived {
            default_scale,
            min_scale,
            min_zoom,
            max_zoom,
            relative_scene_boundaries: rect::rect_relative_to(self.scene_rect, domain),
        }
    }
}

/// Largest scale at which `rect` fits in `view`, if both have an area.
fn fit_scale(view: Size, rect: Rect) -> Option<f64> {
    if is_empty(rect) || !(view.width > 0.0 && view.height > 0.0) {
        return None;
    }
    Some((view.width / rect.width()).min(view.height / rect.height()))
}

fn sanitize_size(size: Size) -> Size {
    let clean = |v: f64| if v > 0.0 { v } else { 0.0 };
    Size::new(clean(size.width), clean(size.height))
}

fn sanitize_max_scale(max_scale: f64) -> f64 {
    if max_scale > 0.0 {
        max_scale
    } else {
        log::warn!("invalid max scale {max_scale}, using 1");
        1.0
    }
}

/// Debug snapshot of a [`GeometryModel`] state.
#[derive(Clone, Copy, Debug)]
pub struct GeometryDebugInfo {
    /// Viewport size in pixels.
    pub view_size: Size,
    /// Union of all layer domains.
    pub scene_rect: Rect,
    /// Optional default domain.
    pub scene_default_rect: Option<Rect>,
    /// Maximum scale.
    pub max_scale: f64,
    /// Scale at zoom level 0.
    pub default_scale: f64,
    /// Minimum scale.
    pub min_scale: f64,
    /// Minimum zoom level.
    pub min_zoom: f64,
    /// Maximum zoom level.
    pub max_zoom: f64,
}
