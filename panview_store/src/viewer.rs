// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use panview_gesture::{GestureOutput, GestureRecognizer, PointerInput};

use crate::action::{Action, AnimationOptions};
use crate::config::ViewerConfig;
use crate::store::TransformStore;

/// A [`TransformStore`] wired to a [`GestureRecognizer`].
///
/// Raw input goes in through [`Viewer::handle_input`]; the view intents the
/// recognizer produces are dispatched to the store right away, and the
/// semantic events are handed back for the host to forward.
#[derive(Debug)]
pub struct Viewer {
    store: TransformStore,
    gestures: GestureRecognizer,
    config: ViewerConfig,
}

impl Viewer {
    /// Creates a viewer for a viewport of `view_size` pixels.
    #[must_use]
    pub fn new(view_size: Size, config: ViewerConfig) -> Self {
        Self {
            store: TransformStore::new(view_size, config.max_scale),
            gestures: GestureRecognizer::new(config.gesture),
            config,
        }
    }

    /// Transform state.
    #[must_use]
    pub fn store(&self) -> &TransformStore {
        &self.store
    }

    /// Mutable transform state, for linking and direct dispatch.
    pub fn store_mut(&mut self) -> &mut TransformStore {
        &mut self.store
    }

    /// Gesture state.
    #[must_use]
    pub fn gestures(&self) -> &GestureRecognizer {
        &self.gestures
    }

    /// Settings.
    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Dispatches `action` to the store.
    pub fn dispatch(&mut self, action: Action) -> bool {
        self.store.dispatch(action)
    }

    /// Dispatches `action` animated with the configured transition timing.
    pub fn dispatch_animated(&mut self, action: Action) -> bool {
        let options = AnimationOptions::from(self.config.transition);
        self.store.dispatch(action.animated(options))
    }

    /// Feeds one raw input through the recognizer and applies its intents.
    pub fn handle_input(&mut self, input: PointerInput) -> GestureOutput {
        let out = self
            .gestures
            .handle(input, self.store.geometry(), &self.store.transform());
        self.apply(&out);
        out
    }

    /// Expires hold windows, advances animations and pulls linked views.
    pub fn tick(&mut self, now: f64) -> GestureOutput {
        let out = self
            .gestures
            .tick(now, self.store.geometry(), &self.store.transform());
        self.apply(&out);
        self.store.tick(now);
        out
    }

    fn apply(&mut self, out: &GestureOutput) {
        for intent in &out.intents {
            self.store.dispatch(Action::from(*intent));
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(Size::new(1.0, 1.0), ViewerConfig::default())
    }
}
