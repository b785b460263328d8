//! Status Visual Component
//!
//! Ties the resolver, the transition controller and the illustration together
//! for one wizard step. The caller feeds props in and reads a [`VisualFrame`]
//! out every frame; all animation state lives inside the instance.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animation::RingClock;
use crate::config::StatusVisualSettings;
use crate::illustration::{illustrate, IllustrationSpec};
use crate::resolver::{resolve, BadgeBody, BorderVisibility, RingStyle, VisualConfig};
use crate::status::Status;
use crate::transition::{IconFrame, IconPhase, TransitionController, TransitionEvent};

/// Inputs of a status visual
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusVisualProps {
    /// Current step status
    pub status: Status,
    /// CSS-style color token for the ring and icon border
    pub color: String,
    /// Step number, shown as a fallback label and used to seed the illustration
    pub number: u32,
}

impl StatusVisualProps {
    /// Create props
    pub fn new(status: Status, color: impl Into<String>, number: u32) -> Self {
        Self {
            status,
            color: color.into(),
            number,
        }
    }
}

/// Ring state for one frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingFrame {
    /// Ring animation
    pub style: RingStyle,
    /// Border visibility
    pub border: BorderVisibility,
    /// Ring opacity (pulse)
    pub opacity: f32,
    /// Ring rotation in degrees (spin)
    pub rotation_deg: f32,
    /// Whether the interior is filled with the theme background
    pub fill_background: bool,
}

/// Badge body for one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyFrame {
    /// Literal step number
    Number(u32),
    /// Illustration
    Illustration(IllustrationSpec),
}

/// Everything a surface needs to paint one status visual
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualFrame {
    /// Status the frame was derived from
    pub status: Status,
    /// Instance color token
    pub color: String,
    /// Ring
    pub ring: RingFrame,
    /// Body
    pub body: BodyFrame,
    /// Icons, bottom-most first
    pub icons: Vec<IconFrame>,
    /// Phase of the icon slot
    pub icon_phase: IconPhase,
}

/// A single step-status indicator
#[derive(Clone, Debug)]
pub struct StatusVisual {
    props: StatusVisualProps,
    config: VisualConfig,
    transitions: TransitionController,
    ring: RingClock,
}

impl StatusVisual {
    /// Mount a visual with its initial props
    #[must_use]
    pub fn mount(props: StatusVisualProps, settings: &StatusVisualSettings) -> Self {
        let config = resolve(props.status);
        let mut transitions = TransitionController::new(settings.spring, settings.reduced_motion);
        transitions.mount(config.icon);
        let ring = RingClock::new(config.ring, settings.pulse_period, settings.spin_period);

        debug!(status = %props.status, number = props.number, "status visual mounted");

        Self {
            props,
            config,
            transitions,
            ring,
        }
    }

    /// Replace all props
    pub fn set_props(&mut self, props: StatusVisualProps) {
        let status = props.status;
        self.props.color = props.color;
        self.props.number = props.number;
        self.set_status(status);
    }

    /// Change the status; no-op if unchanged
    pub fn set_status(&mut self, status: Status) {
        if self.props.status == status {
            return;
        }
        debug!(from = %self.props.status, to = %status, number = self.props.number, "status changed");

        self.props.status = status;
        self.config = resolve(status);
        self.transitions.apply(self.config.icon);
        self.ring.set_style(self.config.ring);
    }

    /// Change the color token
    pub fn set_color(&mut self, color: impl Into<String>) {
        self.props.color = color.into();
    }

    /// Advance animations.
    ///
    /// Returns `true` if the next frame will differ from this one.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.ring.advance(delta);
        let icon_animating = self.transitions.tick(delta);
        icon_animating || self.config.ring != RingStyle::None
    }

    /// Drop animation state; the current icon is shown again without animating
    pub fn reset(&mut self) {
        self.transitions.reset(self.config.icon);
    }

    /// Remove the icon and stop; the visual must be mounted again to be used
    pub fn unmount(&mut self) {
        self.transitions.unmount();
    }

    /// Toggle reduced motion
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.transitions.set_reduced_motion(reduced_motion);
    }

    /// Snapshot for painting
    #[must_use]
    pub fn frame(&self) -> VisualFrame {
        let body = match self.config.body {
            BadgeBody::Number => BodyFrame::Number(self.props.number),
            BadgeBody::Illustration(mode) => {
                BodyFrame::Illustration(illustrate(mode, self.props.number))
            }
        };

        VisualFrame {
            status: self.props.status,
            color: self.props.color.clone(),
            ring: RingFrame {
                style: self.config.ring,
                border: self.config.border,
                opacity: self.ring.opacity(),
                rotation_deg: self.ring.rotation_deg(),
                fill_background: self.config.fill_background,
            },
            body,
            icons: self.transitions.icons(),
            icon_phase: self.transitions.phase(),
        }
    }

    /// Transition events since the last call
    pub fn drain_events(&mut self) -> Vec<TransitionEvent> {
        self.transitions.drain_events()
    }

    /// Current props
    #[must_use]
    pub fn props(&self) -> &StatusVisualProps {
        &self.props
    }

    /// Current status
    #[must_use]
    pub fn status(&self) -> Status {
        self.props.status
    }

    /// Resolved configuration for the current status
    #[must_use]
    pub fn config(&self) -> &VisualConfig {
        &self.config
    }

    /// Whether the icon is animating
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transitions.is_animating()
    }

    /// Whether the next icon transition will animate
    #[must_use]
    pub fn animation_enabled(&self) -> bool {
        self.transitions.animation_enabled()
    }
}
