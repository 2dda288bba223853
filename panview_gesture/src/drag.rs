// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-button press state: the click/drag window and the drag that may follow.
//!
//! ## Usage
//!
//! 1) On pointer-down, create a [`PressState`] with [`PressState::start`] and
//!    store it in the button's slot as [`ButtonPhase::Pending`].
//! 2) On each move, call [`PressState::update`] and compare
//!    [`PressState::total_offset`] with the drag threshold.
//! 3) Promote the slot to [`ButtonPhase::Dragging`] once the threshold is
//!    crossed or [`PressState::expired`] reports the hold deadline passed.
//! 4) Reset the slot to [`ButtonPhase::Idle`] on pointer-up.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use panview_gesture::PointerState;
//! use panview_gesture::drag::PressState;
//!
//! let down = PointerState::new(Point::new(10.0, 20.0), 0.0);
//! let mut press = PressState::start(down, 750.0);
//!
//! // Move to (15, 25): delta is (5, 5).
//! let delta = press.update(Point::new(15.0, 25.0));
//! assert_eq!(delta, Vec2::new(5.0, 5.0));
//! assert_eq!(press.total_offset(), Vec2::new(5.0, 5.0));
//!
//! assert!(!press.expired(749.0));
//! assert!(press.expired(750.0));
//! ```

use kurbo::{Point, Vec2};

use crate::input::PointerState;

/// Tracks one pressed button from pointer-down until release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PressState {
    /// View position of the pointer-down.
    pub start_pos: Point,
    /// Last recorded view position.
    pub last_pos: Point,
    /// The pointer-down that opened this press.
    pub down: PointerState,
    /// Time at which a still-pending press turns into a drag.
    pub deadline: f64,
}

impl PressState {
    /// Opens a press at `down`, with a hold window of `hold_time_ms`.
    #[must_use]
    pub fn start(down: PointerState, hold_time_ms: f64) -> Self {
        Self {
            start_pos: down.position,
            last_pos: down.position,
            down,
            deadline: down.time + hold_time_ms.max(0.0),
        }
    }

    /// Records a new position, returning the movement since the last one.
    pub fn update(&mut self, pos: Point) -> Vec2 {
        let delta = pos - self.last_pos;
        self.last_pos = pos;
        delta
    }

    /// Records a relative movement, for when the absolute position is frozen
    /// by pointer lock.
    pub fn advance(&mut self, movement: Vec2) {
        self.last_pos += movement;
    }

    /// Offset of the last position from the start position.
    #[must_use]
    pub fn total_offset(&self) -> Vec2 {
        self.last_pos - self.start_pos
    }

    /// Returns `true` once `now` reached the hold deadline.
    #[must_use]
    pub fn expired(&self, now: f64) -> bool {
        now >= self.deadline
    }
}

/// Where one button slot is in the click/drag state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ButtonPhase {
    /// Button not pressed, or pressed outside the viewer.
    #[default]
    Idle,
    /// Pressed; still undecided between click and drag.
    Pending(PressState),
    /// Pressed and resolved as a drag.
    Dragging(PressState),
}

impl ButtonPhase {
    /// Returns `true` when the button is not tracked.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns `true` inside the click/drag window.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Returns `true` while dragging.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// Press state of a pending or dragging slot.
    #[must_use]
    pub fn press(&self) -> Option<&PressState> {
        match self {
            Self::Idle => None,
            Self::Pending(press) | Self::Dragging(press) => Some(press),
        }
    }
}
