//! One-shot animation latch
//!
//! Starts disabled and flips to enabled exactly once. There is no way to turn
//! it back off: a controller that needs a fresh "first transition" builds a
//! new latch instead.

/// Instance-scoped gate for enter/leave animations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationLatch {
    enabled: bool,
}

impl AnimationLatch {
    /// A new latch, disabled
    #[must_use]
    pub const fn new() -> Self {
        Self { enabled: false }
    }

    /// Whether animations are enabled
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable animations.
    ///
    /// Returns `true` if this call flipped the latch, `false` if it was
    /// already enabled.
    pub fn enable(&mut self) -> bool {
        let flipped = !self.enabled;
        self.enabled = true;
        flipped
    }
}
