//! Badge body rendering
//!
//! Paints either the step number on a filled disc or the step illustration.
//! Illustrations are drawn with upper-half blocks so each cell carries two
//! vertical samples.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use status_visual_core::{BodyFrame, IllustrationSpec};
use unicode_width::UnicodeWidthStr;

use crate::theme::{to_color, Theme};

const UPPER_HALF: &str = "▀";
const LOWER_HALF: &str = "▄";
const FULL: &str = "█";

/// Paints a badge body into its area
pub struct BadgeBodyWidget<'a> {
    body: &'a BodyFrame,
    theme: &'a Theme,
}

impl<'a> BadgeBodyWidget<'a> {
    pub fn new(body: &'a BodyFrame, theme: &'a Theme) -> Self {
        Self { body, theme }
    }
}

impl Widget for BadgeBodyWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        match self.body {
            BodyFrame::Number(number) => render_number(*number, self.theme, area, buf),
            BodyFrame::Illustration(spec) => render_illustration(spec, area, buf),
        }
    }
}

/// Map a cell-space sample to normalized -1.0..=1.0 coordinates
fn normalize(index: u16, samples: u16) -> f32 {
    (f32::from(index) + 0.5) / f32::from(samples) * 2.0 - 1.0
}

fn render_number(number: u32, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let fill = to_color(theme.surface_opened);

    // Filled disc: rounded by skipping the corner cells
    for row in 0..area.height {
        for col in 0..area.width {
            let x = normalize(col, area.width);
            let y = normalize(row, area.height);
            if x * x + y * y > 1.25 {
                continue;
            }
            if let Some(cell) = buf.cell_mut(Position::new(area.x + col, area.y + row)) {
                cell.set_symbol(" ").set_bg(fill);
            }
        }
    }

    let label = number.to_string();
    let width = label.width() as u16;
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height / 2;
    let style = Style::default()
        .fg(to_color(theme.accent_content))
        .bg(fill)
        .add_modifier(Modifier::BOLD);
    buf.set_stringn(x, y, &label, area.width as usize, style);
}

fn render_illustration(spec: &IllustrationSpec, area: Rect, buf: &mut Buffer) {
    let samples_y = area.height * 2;

    for row in 0..area.height {
        let top_y = normalize(row * 2, samples_y);
        let bottom_y = normalize(row * 2 + 1, samples_y);

        for col in 0..area.width {
            let x = normalize(col, area.width);
            let top = spec.color_at(x, top_y);
            let bottom = spec.color_at(x, bottom_y);

            let Some(cell) = buf.cell_mut(Position::new(area.x + col, area.y + row)) else {
                continue;
            };
            match (top, bottom) {
                (Some(t), Some(b)) if t == b => {
                    cell.set_symbol(FULL).set_fg(to_color(t));
                }
                (Some(t), Some(b)) => {
                    cell.set_symbol(UPPER_HALF).set_fg(to_color(t)).set_bg(to_color(b));
                }
                (Some(t), None) => {
                    cell.set_symbol(UPPER_HALF).set_fg(to_color(t));
                }
                (None, Some(b)) => {
                    cell.set_symbol(LOWER_HALF).set_fg(to_color(b));
                }
                (None, None) => {}
            }
        }
    }
}
