//! Theme and Colors
//!
//! Surface colors for the stepper and conversion from the CSS-style color
//! tokens that step props carry into terminal colors.

use std::str::FromStr;

use ratatui::style::Color;
use status_visual_core::Rgb;
use thiserror::Error;

// ============================================================================
// Stepper Palette
// ============================================================================

/// Page background
pub const BACKGROUND: Rgb = Rgb::new(24, 24, 32);

/// Raised surface (icon badge fill)
pub const SURFACE: Rgb = Rgb::new(38, 38, 52);

/// Opened surface (number badge fill)
pub const SURFACE_OPENED: Rgb = Rgb::new(58, 58, 78);

/// Accent text on opened surfaces
pub const ACCENT_CONTENT: Rgb = Rgb::new(203, 213, 255);

/// Body text
pub const CONTENT: Rgb = Rgb::new(226, 232, 240);

/// Secondary text
pub const CONTENT_MUTED: Rgb = Rgb::new(120, 120, 140);

/// Default instance color when none is given
pub const DEFAULT_STEP_COLOR: Rgb = Rgb::new(45, 212, 191);

/// Errors converting a color token
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorTokenError {
    /// Not a hex color or a known color name
    #[error("unknown color token {0:?}")]
    Unknown(String),
    /// A 256-color palette index has no fixed RGB value
    #[error("indexed color {0:?} cannot be blended")]
    Indexed(String),
}

/// Colors consumed by the status visual widget
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Page background
    pub background: Rgb,
    /// Icon badge fill
    pub surface: Rgb,
    /// Number badge fill
    pub surface_opened: Rgb,
    /// Number badge text
    pub accent_content: Rgb,
    /// Body text
    pub content: Rgb,
    /// Secondary text
    pub content_muted: Rgb,
    /// Fallback instance color
    pub accent: Rgb,
}

impl Theme {
    /// The default dark theme
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            background: BACKGROUND,
            surface: SURFACE,
            surface_opened: SURFACE_OPENED,
            accent_content: ACCENT_CONTENT,
            content: CONTENT,
            content_muted: CONTENT_MUTED,
            accent: DEFAULT_STEP_COLOR,
        }
    }

    /// Resolve a color token once, falling back to the theme accent.
    ///
    /// An unusable token is a presentation problem, not a status error, so it
    /// is logged and painted in the accent color. Call this where the token
    /// enters the app; per-frame paths use [`Theme::resolve_color`].
    #[must_use]
    pub fn step_color(&self, token: &str) -> Rgb {
        match parse_color_token(token) {
            Ok(rgb) => rgb,
            Err(e) => {
                tracing::warn!(token, error = %e, "Falling back to accent color");
                self.accent
            }
        }
    }
}

impl Theme {
    /// Resolve a color token without logging, falling back to the accent
    #[must_use]
    pub fn resolve_color(&self, token: &str) -> Rgb {
        parse_color_token(token).unwrap_or(self.accent)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Convert a core color to a terminal color
#[must_use]
pub const fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Parse a CSS-style token (`#rrggbb`, `#rgb`, or a color name)
///
/// # Errors
///
/// Returns [`ColorTokenError`] when the token has no RGB value.
pub fn parse_color_token(token: &str) -> Result<Rgb, ColorTokenError> {
    let token = token.trim();
    if let Some(rgb) = Rgb::from_hex(token) {
        return Ok(rgb);
    }

    let color =
        Color::from_str(token).map_err(|_| ColorTokenError::Unknown(token.to_string()))?;
    named_rgb(color).ok_or_else(|| ColorTokenError::Indexed(token.to_string()))
}

/// Fixed RGB values for the named ANSI colors (xterm defaults)
fn named_rgb(color: Color) -> Option<Rgb> {
    let rgb = match color {
        Color::Rgb(r, g, b) => Rgb::new(r, g, b),
        Color::Black => Rgb::new(0, 0, 0),
        Color::Red => Rgb::new(205, 0, 0),
        Color::Green => Rgb::new(0, 205, 0),
        Color::Yellow => Rgb::new(205, 205, 0),
        Color::Blue => Rgb::new(0, 0, 238),
        Color::Magenta => Rgb::new(205, 0, 205),
        Color::Cyan => Rgb::new(0, 205, 205),
        Color::Gray => Rgb::new(229, 229, 229),
        Color::DarkGray => Rgb::new(127, 127, 127),
        Color::LightRed => Rgb::new(255, 0, 0),
        Color::LightGreen => Rgb::new(0, 255, 0),
        Color::LightYellow => Rgb::new(255, 255, 0),
        Color::LightBlue => Rgb::new(92, 92, 255),
        Color::LightMagenta => Rgb::new(255, 0, 255),
        Color::LightCyan => Rgb::new(0, 255, 255),
        Color::White => Rgb::new(255, 255, 255),
        Color::Reset | Color::Indexed(_) => return None,
    };
    Some(rgb)
}
