//! Animation Primitives - Springs and Ring Timing
//!
//! Surface-agnostic animation building blocks. Nothing here knows about
//! cells or pixels; surfaces read the interpolated values and paint them.
//!
//! # Design
//!
//! - **Springs** drive the status icon. They are integrated in fixed 1ms
//!   sub-steps so the result does not depend on the host frame rate.
//! - **Ring clocks** drive the decorative ring. They are plain periodic
//!   functions of elapsed time (linear, looping), like CSS keyframes.

mod ring;
mod spring;

pub use ring::RingClock;
pub use spring::{Spring, SpringParams};

use serde::{Deserialize, Serialize};

/// Named spring profiles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpringProfile {
    /// Eased with overshoot, settles over several frames
    #[default]
    Gentle,
    /// No animation: values snap to their targets immediately
    Instant,
}

impl SpringProfile {
    /// Whether this profile produces in-between frames
    #[must_use]
    pub const fn animates(self) -> bool {
        matches!(self, Self::Gentle)
    }
}
