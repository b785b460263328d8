//! Damped spring integration
//!
//! A mass on a spring pulled toward a target, integrated with semi-implicit
//! Euler in 1ms sub-steps. The spring is settled once both its speed and its
//! distance to the target fall under the configured precision, at which point
//! it snaps exactly onto the target.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Integration sub-step in seconds
const SUB_STEP_SECS: f32 = 0.001;

/// Physical parameters of a spring
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringParams {
    /// Stiffness
    pub tension: f32,
    /// Damping
    pub friction: f32,
    /// Mass of the animated value
    pub mass: f32,
    /// Settling threshold for both speed and distance
    pub precision: f32,
}

impl SpringParams {
    /// The "gentle" profile: underdamped, overshoots slightly before settling
    pub const GENTLE: Self = Self {
        tension: 120.0,
        friction: 14.0,
        mass: 1.0,
        precision: 0.01,
    };

    /// Damping ratio (< 1.0 means the spring overshoots)
    #[must_use]
    pub fn damping_ratio(&self) -> f32 {
        self.friction / (2.0 * (self.tension * self.mass).sqrt())
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::GENTLE
    }
}

/// A single animated scalar
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    params: SpringParams,
    settled: bool,
}

impl Spring {
    /// Create a spring at `from` heading toward `to`
    #[must_use]
    pub fn new(from: f32, to: f32, params: SpringParams) -> Self {
        Self {
            value: from,
            velocity: 0.0,
            target: to,
            params,
            settled: false,
        }
    }

    /// Create a spring already resting on `value`
    #[must_use]
    pub fn at_rest(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            params: SpringParams::GENTLE,
            settled: true,
        }
    }

    /// Advance the spring by `delta`.
    ///
    /// Returns `true` only on the step in which the spring settles.
    pub fn step(&mut self, delta: Duration) -> bool {
        if self.settled {
            return false;
        }

        let secs = delta.as_secs_f32();
        if secs <= 0.0 {
            return false;
        }

        let steps = (secs / SUB_STEP_SECS).ceil().max(1.0) as u32;
        let h = secs / steps as f32;
        let SpringParams {
            tension,
            friction,
            mass,
            precision,
        } = self.params;

        for _ in 0..steps {
            let spring_force = -tension * (self.value - self.target);
            let damping_force = -friction * self.velocity;
            let acceleration = (spring_force + damping_force) / mass;

            self.velocity += acceleration * h;
            self.value += self.velocity * h;

            if self.velocity.abs() <= precision && (self.target - self.value).abs() <= precision {
                self.settle();
                return true;
            }
        }

        false
    }

    /// Jump onto the target and stop
    pub fn settle(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
        self.settled = true;
    }

    /// Current value
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Target value
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether the spring has come to rest on its target
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled
    }
}
