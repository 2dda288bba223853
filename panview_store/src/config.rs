// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use panview_anim::RunOptions;
use panview_gesture::GestureConfig;

/// Settings of a [`Viewer`](crate::Viewer).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewerConfig {
    /// Largest allowed scale, in pixels per scene unit.
    pub max_scale: f64,
    /// Timing of programmatic animated actions.
    pub transition: RunOptions,
    /// Gesture recognition settings.
    pub gesture: GestureConfig,
}

impl ViewerConfig {
    /// Sets the maximum scale.
    #[must_use]
    pub fn with_max_scale(mut self, max_scale: f64) -> Self {
        self.max_scale = max_scale;
        self
    }

    /// Sets the timing of programmatic animated actions.
    #[must_use]
    pub fn with_transition(mut self, transition: RunOptions) -> Self {
        self.transition = transition;
        self
    }

    /// Sets the gesture settings.
    #[must_use]
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            max_scale: 20.0,
            transition: RunOptions::new(500.0),
            gesture: GestureConfig::default(),
        }
    }
}
