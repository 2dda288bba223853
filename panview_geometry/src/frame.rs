// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Coordinate frame a point, vector or rectangle is expressed in.
///
/// - [`CoordFrame::View`]: device pixels of the viewport element, origin at
///   its top-left corner.
/// - [`CoordFrame::Scene`]: the logical data space shared by all layers.
/// - [`CoordFrame::Relative`]: the scene normalized so that the default
///   domain is the unit square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CoordFrame {
    /// Viewport pixels.
    View,
    /// Scene units.
    #[default]
    Scene,
    /// Unit square of the default domain.
    Relative,
}

/// Frame a [`Transform`](crate::Transform) center is stored in.
///
/// A transform center is never expressed in view pixels: the view frame is
/// itself derived from the transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CenterFrame {
    /// Center in scene units.
    #[default]
    Scene,
    /// Center in relative units.
    Relative,
}

impl From<CenterFrame> for CoordFrame {
    fn from(frame: CenterFrame) -> Self {
        match frame {
            CenterFrame::Scene => Self::Scene,
            CenterFrame::Relative => Self::Relative,
        }
    }
}
