// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panview Anim: host-driven keyframe animation.
//!
//! This crate provides the small animation engine Panview viewers use for
//! smooth pan/zoom transitions:
//! - [`Easing`]: cubic-bezier timing curves (CSS presets plus custom ones).
//! - [`Track`]: ordered [`Keyframe`]s for one channel, each segment with an
//!   optional easing of its own.
//! - [`Animation`]: plays a set of [`Channels`] with one shared duration,
//!   delay and global easing, and supports stopping and in-place retargeting.
//!
//! There is no scheduler and no timer. The host calls [`Animation::tick`]
//! once per frame with the current time; everything else is plain data.
//!
//! This crate is `no_std`.

#![no_std]

mod animation;
mod easing;
mod track;

pub use animation::{Animation, Channels, Frame, RunOptions};
pub use easing::Easing;
pub use track::{Keyframe, Lerp, Track};
