//! Stepper TUI - terminal surface for step status visuals
//!
//! Renders a row of wizard steps, each a `StatusVisual` from
//! `status-visual-core`, and lets the user drive their statuses from the
//! keyboard.
//!
//! # Architecture
//!
//! - **App**: event loop, key handling, frame ticks, auto-play
//! - **Widgets**: badge (ring, body, icon) and illustration painting
//! - **Theme**: palette and color token conversion

pub mod app;
pub mod theme;
pub mod widgets;

pub use app::App;
