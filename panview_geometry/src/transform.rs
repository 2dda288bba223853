// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::Point;

use crate::frame::CenterFrame;

/// Current pan/zoom state of a viewer.
///
/// `zoom` is a signed log2 factor relative to the model's default scale, so
/// `zoom == 0` shows the default domain exactly fitting the viewport and each
/// `+1` doubles the magnification. `coord` tags which frame `center` is in.
///
/// Transforms are values: stores replace them, they are never mutated in
/// place behind a shared reference.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    /// Point of the scene shown at the middle of the viewport.
    pub center: Point,
    /// Log2 zoom level relative to the default scale.
    pub zoom: f64,
    /// Frame `center` is expressed in.
    pub coord: CenterFrame,
}

impl Transform {
    /// Scene-space transform with the given center and zoom.
    #[must_use]
    pub const fn scene(center: Point, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            coord: CenterFrame::Scene,
        }
    }

    /// Relative-space transform with the given center and zoom.
    #[must_use]
    pub const fn relative(center: Point, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            coord: CenterFrame::Relative,
        }
    }

    /// Returns a copy with `center` replaced, keeping zoom and frame.
    #[must_use]
    pub const fn with_center(self, center: Point) -> Self {
        Self { center, ..self }
    }

    /// Returns a copy with `zoom` replaced, keeping center and frame.
    #[must_use]
    pub const fn with_zoom(self, zoom: f64) -> Self {
        Self { zoom, ..self }
    }

    /// `true` when both center components and the zoom are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.zoom.is_finite()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::scene(Point::ZERO, 0.0)
    }
}

/// Flat `(center_x, center_y, zoom)` triple in scene coordinates.
///
/// This is the encoding hosts persist viewer state with. Every component is
/// carried through unchanged, so a value written and read back compares
/// bit-for-bit equal.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersistedTransform(pub f64, pub f64, pub f64);

impl PersistedTransform {
    /// Center of the persisted transform.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.0, self.1)
    }

    /// Zoom level of the persisted transform.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.2
    }

    /// The scene-space transform this triple encodes.
    #[must_use]
    pub fn to_transform(self) -> Transform {
        Transform::scene(self.center(), self.zoom())
    }

    /// Components as an array, in storage order.
    #[must_use]
    pub fn to_array(self) -> [f64; 3] {
        [self.0, self.1, self.2]
    }
}

impl From<[f64; 3]> for PersistedTransform {
    fn from([x, y, zoom]: [f64; 3]) -> Self {
        Self(x, y, zoom)
    }
}

impl TryFrom<&[f64]> for PersistedTransform {
    type Error = PersistedTransformError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let [x, y, zoom] = values else {
            return Err(PersistedTransformError::Arity(values.len()));
        };
        for (index, value) in [*x, *y, *zoom].into_iter().enumerate() {
            if !value.is_finite() {
                return Err(PersistedTransformError::NonFinite { index });
            }
        }
        Ok(Self(*x, *y, *zoom))
    }
}

/// Reasons a persisted transform could not be decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistedTransformError {
    /// The slice did not hold exactly three values; carries the actual count.
    Arity(usize),
    /// The component at `index` was NaN or infinite.
    NonFinite {
        /// Position of the offending component.
        index: usize,
    },
}

impl fmt::Display for PersistedTransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arity(len) => write!(
                f,
                "persisted transform needs exactly 3 values, got {len}"
            ),
            Self::NonFinite { index } => {
                write!(f, "persisted transform component {index} is not finite")
            }
        }
    }
}

impl core::error::Error for PersistedTransformError {}
