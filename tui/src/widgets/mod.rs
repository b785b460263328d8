//! Custom widgets for the stepper TUI

pub mod illustration;
pub mod status_visual;

pub use illustration::BadgeBodyWidget;
pub use status_visual::{badge_area, StatusVisualWidget, BADGE_HEIGHT, BADGE_WIDTH};
