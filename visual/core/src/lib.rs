//! Status Visual Core - Headless Step-Status Indicator for Stepper Wizards
//!
//! This crate owns everything a step-status indicator needs to know before a
//! single cell is painted: which status maps to which visual, how the status
//! icon animates in and out, and what the illustration in the badge looks
//! like. It has no opinion about the rendering surface.
//!
//! # Architecture
//!
//! ```text
//! (status, color, number)
//!        │
//!        ▼
//! ┌──────────────┐    ┌──────────────────────┐    ┌─────────────────────┐
//! │StatusResolver│──▶│ TransitionController │──▶│ IllustrationRenderer│
//! │ (pure lookup)│    │ (latch + springs)    │    │ (palette + shape)   │
//! └──────────────┘    └──────────────────────┘    └─────────────────────┘
//!        │                      │                           │
//!        └──────────────────────┴───────────┬───────────────┘
//!                                           ▼
//!                                     VisualFrame
//!                          (painted by a surface, e.g. ratatui)
//! ```
//!
//! # Key Types
//!
//! - [`Status`]: the closed set of step states
//! - [`VisualConfig`]: what a status looks like, derived by [`resolve`]
//! - [`TransitionController`]: enter/leave animation of the status icon
//! - [`StatusVisual`]: the full component tying the three together
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod animation;
pub mod color;
pub mod config;
pub mod illustration;
pub mod resolver;
pub mod status;
pub mod transition;
pub mod visual;

pub use animation::{RingClock, Spring, SpringParams, SpringProfile};
pub use color::Rgb;
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigSource,
    StatusVisualSettings,
};
pub use illustration::{illustrate, IllustrationSpec, Palette, ShapeVariant, Tone};
pub use resolver::{
    resolve, resolve_str, BadgeBody, BorderVisibility, Glyph, IllustrationMode, RingStyle,
    VisualConfig,
};
pub use status::{Status, StatusError};
pub use transition::{
    AnimationLatch, IconFrame, IconLayout, IconPhase, TransitionController, TransitionEvent,
    Transform,
};
pub use visual::{BodyFrame, RingFrame, StatusVisual, StatusVisualProps, VisualFrame};
