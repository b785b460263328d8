//! Surface-agnostic RGB color
//!
//! Palettes and fades are computed here so that every surface paints the same
//! colors. Surfaces convert [`Rgb`] into their native color type.

use serde::{Deserialize, Serialize};

/// An opaque 24-bit color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a color from components
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` or `#rgb` hex token
    ///
    /// # Examples
    ///
    /// ```
    /// use status_visual_core::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#ff8000"), Some(Rgb::new(255, 128, 0)));
    /// assert_eq!(Rgb::from_hex("#fff"), Some(Rgb::new(255, 255, 255)));
    /// assert_eq!(Rgb::from_hex("teal"), None);
    /// ```
    #[must_use]
    pub fn from_hex(token: &str) -> Option<Self> {
        let hex = token.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => Some(Self {
                r: u8::from_str_radix(&hex[0..2], 16).ok()?,
                g: u8::from_str_radix(&hex[2..4], 16).ok()?,
                b: u8::from_str_radix(&hex[4..6], 16).ok()?,
            }),
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
                Some(Self {
                    r: digit(0)?,
                    g: digit(1)?,
                    b: digit(2)?,
                })
            }
            _ => None,
        }
    }

    /// Convert to a CSS-style hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linearly interpolate between two colors
    ///
    /// `t` is clamped to 0.0..=1.0 (0.0 = self, 1.0 = other).
    #[must_use]
    pub fn lerp(&self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let v = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// Render this color at `opacity` over `background`
    #[must_use]
    pub fn with_opacity(&self, opacity: f32, background: Rgb) -> Rgb {
        background.lerp(*self, opacity)
    }
}
