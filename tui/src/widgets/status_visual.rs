//! StatusVisual Widget
//!
//! Paints one [`VisualFrame`] as a terminal badge:
//!
//! ```text
//! ╭─────────╮
//! │  ▄███▄  │
//! │  ██3██  │   ring (border), body (number or illustration),
//! │  ▀███▀  │   icon in the bottom-right corner
//! ╰────────✓
//! ```
//!
//! A terminal cell can only hold one glyph. When both a leaving and an
//! entering icon are reported, the more opaque one wins the corner cell.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use status_visual_core::{
    BorderVisibility, IconFrame, Rgb, RingStyle, Transform, VisualFrame,
};

use super::illustration::BadgeBodyWidget;
use crate::theme::{to_color, Theme};

/// Badge width in cells
pub const BADGE_WIDTH: u16 = 11;

/// Badge height in cells
pub const BADGE_HEIGHT: u16 = 5;

/// Icons fainter than this are not painted
const MIN_VISIBLE_OPACITY: f32 = 0.05;

/// Scale above which an entering icon is drawn bold
const BOLD_SCALE: f32 = 1.05;

/// Floor of the spin mask gradient
const SPIN_MASK_FLOOR: f32 = 0.1;

/// Centered badge rectangle inside `area`, clipped to it
#[must_use]
pub fn badge_area(area: Rect) -> Rect {
    let width = BADGE_WIDTH.min(area.width);
    let height = BADGE_HEIGHT.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Widget painting a status visual frame
pub struct StatusVisualWidget<'a> {
    frame: &'a VisualFrame,
    theme: &'a Theme,
    color: Option<Rgb>,
}

impl<'a> StatusVisualWidget<'a> {
    pub fn new(frame: &'a VisualFrame, theme: &'a Theme) -> Self {
        Self {
            frame,
            theme,
            color: None,
        }
    }

    /// Paint with an already resolved instance color instead of the frame's token
    #[must_use]
    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }
}

impl Widget for StatusVisualWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let badge = badge_area(area);
        if badge.width < 4 || badge.height < 3 {
            return;
        }

        let color = self
            .color
            .unwrap_or_else(|| self.theme.resolve_color(&self.frame.color));

        if self.frame.ring.fill_background {
            fill(buf, inner(badge), self.theme.background);
        }

        BadgeBodyWidget::new(&self.frame.body, self.theme).render(body_area(badge), buf);
        self.render_ring(badge, color, buf);
        self.render_icon(badge, color, buf);
    }
}

impl StatusVisualWidget<'_> {
    fn render_ring(&self, badge: Rect, color: Rgb, buf: &mut Buffer) {
        let ring = &self.frame.ring;
        if ring.border == BorderVisibility::Transparent {
            return;
        }

        let cells = perimeter(badge);
        let count = cells.len() as f32;
        for (i, (pos, symbol)) in cells.iter().enumerate() {
            let intensity = match ring.style {
                RingStyle::Spin => {
                    let angle = i as f32 / count * 360.0;
                    let behind = (ring.rotation_deg - angle).rem_euclid(360.0);
                    SPIN_MASK_FLOOR + (1.0 - SPIN_MASK_FLOOR) * (1.0 - behind / 360.0)
                }
                RingStyle::Pulse | RingStyle::None => 1.0,
            };
            let shade = color.with_opacity(ring.opacity * intensity, self.theme.background);
            if let Some(cell) = buf.cell_mut(*pos) {
                cell.set_symbol(symbol).set_fg(to_color(shade));
            }
        }
    }

    fn render_icon(&self, badge: Rect, color: Rgb, buf: &mut Buffer) {
        let Some(icon) = topmost_icon(&self.frame.icons) else {
            return;
        };
        if icon.opacity < MIN_VISIBLE_OPACITY {
            return;
        }

        let fg = color.with_opacity(icon.opacity, self.theme.surface);
        let mut style = Style::default()
            .fg(to_color(fg))
            .bg(to_color(self.theme.surface));
        if let Transform::Scale(scale) = icon.transform {
            if scale > BOLD_SCALE {
                style = style.add_modifier(Modifier::BOLD);
            }
        }

        let corner = Position::new(
            badge.x + badge.width - 1,
            badge.y + badge.height - 1,
        );
        if let Some(cell) = buf.cell_mut(corner) {
            cell.set_symbol(icon.glyph.symbol()).set_style(style);
        }
    }
}

/// The icon that owns the corner cell: the most opaque, later icons on ties
fn topmost_icon(icons: &[IconFrame]) -> Option<&IconFrame> {
    icons.iter().fold(None, |best: Option<&IconFrame>, icon| match best {
        Some(b) if b.opacity > icon.opacity => Some(b),
        _ => Some(icon),
    })
}

fn inner(badge: Rect) -> Rect {
    Rect::new(
        badge.x + 1,
        badge.y + 1,
        badge.width.saturating_sub(2),
        badge.height.saturating_sub(2),
    )
}

fn body_area(badge: Rect) -> Rect {
    let inner = inner(badge);
    Rect::new(
        inner.x + 1,
        inner.y,
        inner.width.saturating_sub(2),
        inner.height,
    )
}

fn fill(buf: &mut Buffer, area: Rect, rgb: Rgb) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                cell.set_symbol(" ").set_bg(to_color(rgb));
            }
        }
    }
}

/// Border cells clockwise from the top-left corner
fn perimeter(badge: Rect) -> Vec<(Position, &'static str)> {
    let left = badge.x;
    let top = badge.y;
    let right = badge.x + badge.width - 1;
    let bottom = badge.y + badge.height - 1;

    let mut cells = Vec::with_capacity(2 * (badge.width + badge.height) as usize);
    cells.push((Position::new(left, top), "╭"));
    for x in left + 1..right {
        cells.push((Position::new(x, top), "─"));
    }
    cells.push((Position::new(right, top), "╮"));
    for y in top + 1..bottom {
        cells.push((Position::new(right, y), "│"));
    }
    cells.push((Position::new(right, bottom), "╯"));
    for x in (left + 1..right).rev() {
        cells.push((Position::new(x, bottom), "─"));
    }
    cells.push((Position::new(left, bottom), "╰"));
    for y in (top + 1..bottom).rev() {
        cells.push((Position::new(left, y), "│"));
    }
    cells
}
