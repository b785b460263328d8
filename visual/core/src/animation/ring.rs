//! Ring animation clock
//!
//! The ring around a badge either sits still, pulses its opacity, or spins.
//! Both animations loop forever with linear timing; the clock restarts
//! whenever the ring style changes.

use std::time::Duration;

use crate::resolver::RingStyle;

/// Lowest opacity reached by the pulse
const PULSE_FLOOR: f32 = 0.1;

/// Elapsed-time tracker for the ring of one badge
#[derive(Clone, Debug, PartialEq)]
pub struct RingClock {
    style: RingStyle,
    elapsed: Duration,
    pulse_period: Duration,
    spin_period: Duration,
}

impl RingClock {
    /// Create a clock for `style`
    ///
    /// Zero periods are bumped to 1ms.
    #[must_use]
    pub fn new(style: RingStyle, pulse_period: Duration, spin_period: Duration) -> Self {
        let min = Duration::from_millis(1);
        Self {
            style,
            elapsed: Duration::ZERO,
            pulse_period: pulse_period.max(min),
            spin_period: spin_period.max(min),
        }
    }

    /// Switch ring style, restarting the clock if it changed
    pub fn set_style(&mut self, style: RingStyle) {
        if self.style != style {
            self.style = style;
            self.elapsed = Duration::ZERO;
        }
    }

    /// Advance the clock
    pub fn advance(&mut self, delta: Duration) {
        if self.style == RingStyle::None {
            return;
        }
        self.elapsed += delta;
        // Keep the accumulator bounded; both animations are periodic.
        let cycle = lcm(self.pulse_period.as_nanos() * 2, self.spin_period.as_nanos());
        if cycle > 0 && self.elapsed.as_nanos() >= cycle {
            let wrapped = self.elapsed.as_nanos() % cycle;
            self.elapsed = Duration::from_nanos(u64::try_from(wrapped).unwrap_or(0));
        }
    }

    /// Current ring style
    #[must_use]
    pub fn style(&self) -> RingStyle {
        self.style
    }

    /// Ring opacity (1.0 unless pulsing)
    ///
    /// The pulse runs 1.0 → 0.1 over one period, then back, alternating.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        if self.style != RingStyle::Pulse {
            return 1.0;
        }
        let period = self.pulse_period.as_secs_f32();
        let t = self.elapsed.as_secs_f32() / period;
        let half_cycle = t.floor() as u64;
        let frac = t.fract();
        let span = 1.0 - PULSE_FLOOR;
        if half_cycle % 2 == 0 {
            1.0 - span * frac
        } else {
            PULSE_FLOOR + span * frac
        }
    }

    /// Ring rotation in degrees, 0.0..360.0 (0.0 unless spinning)
    #[must_use]
    pub fn rotation_deg(&self) -> f32 {
        if self.style != RingStyle::Spin {
            return 0.0;
        }
        let period = self.spin_period.as_secs_f32();
        let t = (self.elapsed.as_secs_f32() / period).fract();
        t * 360.0
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: u128, b: u128) -> u128 {
    if a == 0 || b == 0 {
        return 0;
    }
    a / gcd(a, b) * b
}
