// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw device input fed to the [`GestureRecognizer`](crate::GestureRecognizer).

use kurbo::{Point, Vec2};

bitflags::bitflags! {
    /// Keyboard modifiers held during a pointer event.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 1 << 0;
        /// Control key.
        const CONTROL = 1 << 1;
        /// Alt / Option key.
        const ALT = 1 << 2;
        /// Meta / Command / Windows key.
        const META = 1 << 3;
    }
}

bitflags::bitflags! {
    /// Set of pointer buttons, with the bit layout of DOM `MouseEvent.buttons`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Buttons: u8 {
        /// Usually the left button.
        const PRIMARY = 1 << 0;
        /// Usually the right button.
        const SECONDARY = 1 << 1;
        /// Usually the wheel / middle button.
        const AUXILIARY = 1 << 2;
        /// Browser back button.
        const BACK = 1 << 3;
        /// Browser forward button.
        const FORWARD = 1 << 4;
    }
}

/// One pointer button, numbered like DOM `MouseEvent.button`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerButton {
    /// Button 0.
    Primary,
    /// Button 1.
    Auxiliary,
    /// Button 2.
    Secondary,
    /// Button 3.
    Back,
    /// Button 4.
    Forward,
}

impl PointerButton {
    /// All buttons, in slot order.
    pub const ALL: [Self; 5] = [
        Self::Primary,
        Self::Auxiliary,
        Self::Secondary,
        Self::Back,
        Self::Forward,
    ];

    /// Slot index, equal to the DOM `button` number.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Auxiliary => 1,
            Self::Secondary => 2,
            Self::Back => 3,
            Self::Forward => 4,
        }
    }

    /// Button from a DOM `button` number.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Primary),
            1 => Some(Self::Auxiliary),
            2 => Some(Self::Secondary),
            3 => Some(Self::Back),
            4 => Some(Self::Forward),
            _ => None,
        }
    }

    /// The single-button [`Buttons`] set for this button.
    #[must_use]
    pub const fn as_buttons(self) -> Buttons {
        match self {
            Self::Primary => Buttons::PRIMARY,
            Self::Auxiliary => Buttons::AUXILIARY,
            Self::Secondary => Buttons::SECONDARY,
            Self::Back => Buttons::BACK,
            Self::Forward => Buttons::FORWARD,
        }
    }
}

/// Pointer state shared by every input kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    /// Position in view (viewport pixel) coordinates.
    pub position: Point,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Host timestamp in milliseconds.
    pub time: f64,
}

impl PointerState {
    /// Unmodified pointer at `position` and `time`.
    #[must_use]
    pub fn new(position: Point, time: f64) -> Self {
        Self {
            position,
            modifiers: Modifiers::empty(),
            time,
        }
    }

    /// Sets the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Raw pointer or wheel event, as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    /// A button was pressed.
    Down {
        /// The pressed button.
        button: PointerButton,
        /// Pointer state.
        state: PointerState,
    },
    /// The pointer moved.
    Move {
        /// Relative device movement since the previous move, in view pixels.
        ///
        /// Under pointer lock the position freezes and only this is meaningful.
        movement: Vec2,
        /// Pointer state.
        state: PointerState,
    },
    /// A button was released.
    Up {
        /// The released button.
        button: PointerButton,
        /// Pointer state.
        state: PointerState,
    },
    /// The pointer entered the viewport.
    Enter(PointerState),
    /// The pointer left the viewport.
    Leave(PointerState),
    /// Wheel or trackpad scroll.
    Wheel {
        /// Scroll delta in device units; positive `y` scrolls down.
        delta: Vec2,
        /// Pointer state.
        state: PointerState,
    },
}

impl PointerInput {
    /// Pointer state carried by this input.
    #[must_use]
    pub fn state(&self) -> &PointerState {
        match self {
            Self::Down { state, .. }
            | Self::Move { state, .. }
            | Self::Up { state, .. }
            | Self::Wheel { state, .. }
            | Self::Enter(state)
            | Self::Leave(state) => state,
        }
    }
}
