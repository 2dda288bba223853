// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::input::Buttons;

/// Tuning of the [`GestureRecognizer`](crate::GestureRecognizer).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// How long a still press waits before turning into a drag, in milliseconds.
    pub hold_time_ms: f64,
    /// Movement in view pixels that turns a press into a drag.
    pub drag_threshold: f64,
    /// Zoom levels per wheel unit.
    pub wheel_zoom_factor: f64,
    /// Length of the animation wrapping large wheel steps, in milliseconds.
    pub wheel_animation_ms: f64,
    /// Buttons whose drags pan the view.
    pub pan_buttons: Buttons,
}

impl GestureConfig {
    /// Sets the hold time.
    #[must_use]
    pub fn with_hold_time_ms(mut self, hold_time_ms: f64) -> Self {
        self.hold_time_ms = hold_time_ms;
        self
    }

    /// Sets the drag threshold.
    #[must_use]
    pub fn with_drag_threshold(mut self, drag_threshold: f64) -> Self {
        self.drag_threshold = drag_threshold;
        self
    }

    /// Sets the wheel zoom factor.
    #[must_use]
    pub fn with_wheel_zoom_factor(mut self, wheel_zoom_factor: f64) -> Self {
        self.wheel_zoom_factor = wheel_zoom_factor;
        self
    }

    /// Sets the wheel animation length.
    #[must_use]
    pub fn with_wheel_animation_ms(mut self, wheel_animation_ms: f64) -> Self {
        self.wheel_animation_ms = wheel_animation_ms;
        self
    }

    /// Sets which buttons pan when dragged.
    #[must_use]
    pub fn with_pan_buttons(mut self, pan_buttons: Buttons) -> Self {
        self.pan_buttons = pan_buttons;
        self
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            hold_time_ms: 750.0,
            drag_threshold: 5.0,
            wheel_zoom_factor: 0.01,
            wheel_animation_ms: 200.0,
            pan_buttons: Buttons::PRIMARY | Buttons::AUXILIARY,
        }
    }
}
