//! Step illustrations
//!
//! A step that has started work shows a small colored illustration instead of
//! its number. The palette follows the illustration mode; the step number
//! picks the shade and the shape, so neighbouring steps look different but a
//! given step always looks the same.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::resolver::IllustrationMode;

/// Three-tone palette for one illustration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Dominant fill
    pub primary: Rgb,
    /// Background fill
    pub secondary: Rgb,
    /// Small accents
    pub highlight: Rgb,
}

impl Palette {
    const fn new(primary: Rgb, secondary: Rgb, highlight: Rgb) -> Self {
        Self {
            primary,
            secondary,
            highlight,
        }
    }

    /// Color for a tone
    #[must_use]
    pub const fn color(&self, tone: Tone) -> Rgb {
        match tone {
            Tone::Primary => self.primary,
            Tone::Secondary => self.secondary,
            Tone::Highlight => self.highlight,
        }
    }
}

// ============================================================================
// Palettes
// ============================================================================

const NEUTRAL_SHADES: [Palette; 3] = [
    Palette::new(Rgb::new(96, 165, 250), Rgb::new(30, 58, 138), Rgb::new(224, 242, 254)),
    Palette::new(Rgb::new(129, 140, 248), Rgb::new(49, 46, 129), Rgb::new(224, 231, 255)),
    Palette::new(Rgb::new(45, 212, 191), Rgb::new(19, 78, 74), Rgb::new(204, 251, 241)),
];

const POSITIVE_SHADES: [Palette; 3] = [
    Palette::new(Rgb::new(74, 222, 128), Rgb::new(20, 83, 45), Rgb::new(220, 252, 231)),
    Palette::new(Rgb::new(52, 211, 153), Rgb::new(6, 78, 59), Rgb::new(209, 250, 229)),
    Palette::new(Rgb::new(163, 230, 53), Rgb::new(54, 83, 20), Rgb::new(236, 252, 203)),
];

const NEGATIVE_SHADES: [Palette; 3] = [
    Palette::new(Rgb::new(248, 113, 113), Rgb::new(127, 29, 29), Rgb::new(254, 226, 226)),
    Palette::new(Rgb::new(251, 146, 60), Rgb::new(124, 45, 18), Rgb::new(255, 237, 213)),
    Palette::new(Rgb::new(244, 114, 182), Rgb::new(131, 24, 67), Rgb::new(252, 231, 243)),
];

fn shades(mode: IllustrationMode) -> &'static [Palette; 3] {
    match mode {
        IllustrationMode::Neutral => &NEUTRAL_SHADES,
        IllustrationMode::Positive => &POSITIVE_SHADES,
        IllustrationMode::Negative => &NEGATIVE_SHADES,
    }
}

/// Which palette entry a point uses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    /// Dominant fill
    Primary,
    /// Background fill
    Secondary,
    /// Accent
    Highlight,
}

/// Shape family of an illustration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeVariant {
    /// Core with an orbiting band
    Orbit,
    /// Horizontal strata
    Stack,
    /// Sine wave split
    Wave,
    /// Diagonal split with a central spark
    Spark,
}

impl ShapeVariant {
    const ALL: [ShapeVariant; 4] = [Self::Orbit, Self::Stack, Self::Wave, Self::Spark];

    /// Tone at normalized coordinates `(x, y)` in -1.0..=1.0, y pointing down.
    ///
    /// Points outside the unit circle are empty.
    #[must_use]
    pub fn tone_at(self, x: f32, y: f32) -> Option<Tone> {
        let r = (x * x + y * y).sqrt();
        if r > 1.0 {
            return None;
        }

        let tone = match self {
            Self::Orbit => {
                if r < 0.35 {
                    Tone::Primary
                } else if (0.6..0.85).contains(&r) {
                    Tone::Highlight
                } else {
                    Tone::Secondary
                }
            }
            Self::Stack => {
                let band = ((y + 1.0) * 2.5).floor() as i32;
                match band {
                    0 => Tone::Highlight,
                    b if b % 2 == 1 => Tone::Primary,
                    _ => Tone::Secondary,
                }
            }
            Self::Wave => {
                let crest = (x * std::f32::consts::PI).sin() * 0.35;
                if y > crest {
                    Tone::Primary
                } else if y > crest - 0.2 {
                    Tone::Highlight
                } else {
                    Tone::Secondary
                }
            }
            Self::Spark => {
                if (x.abs() < 0.12 && y.abs() < 0.45) || (y.abs() < 0.12 && x.abs() < 0.45) {
                    Tone::Highlight
                } else if x - y > 0.0 {
                    Tone::Primary
                } else {
                    Tone::Secondary
                }
            }
        };
        Some(tone)
    }
}

/// Everything a surface needs to draw one illustration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllustrationSpec {
    /// Palette family
    pub mode: IllustrationMode,
    /// Step number the illustration was derived from
    pub index: u32,
    /// Colors
    pub palette: Palette,
    /// Shape
    pub variant: ShapeVariant,
}

impl IllustrationSpec {
    /// Color at normalized coordinates, or `None` outside the badge
    #[must_use]
    pub fn color_at(&self, x: f32, y: f32) -> Option<Rgb> {
        self.variant.tone_at(x, y).map(|tone| self.palette.color(tone))
    }
}

/// Derive the illustration for a step
#[must_use]
pub fn illustrate(mode: IllustrationMode, number: u32) -> IllustrationSpec {
    let n = number as usize;
    let palettes = shades(mode);
    IllustrationSpec {
        mode,
        index: number,
        palette: palettes[n % palettes.len()],
        variant: ShapeVariant::ALL[n % ShapeVariant::ALL.len()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        for n in 0..20 {
            assert_eq!(
                illustrate(IllustrationMode::Neutral, n),
                illustrate(IllustrationMode::Neutral, n)
            );
        }
    }

    #[test]
    fn test_mode_changes_palette_not_shape() {
        let neutral = illustrate(IllustrationMode::Neutral, 3);
        let positive = illustrate(IllustrationMode::Positive, 3);
        let negative = illustrate(IllustrationMode::Negative, 3);

        assert_eq!(neutral.variant, positive.variant);
        assert_eq!(positive.variant, negative.variant);
        assert_ne!(neutral.palette, positive.palette);
        assert_ne!(positive.palette, negative.palette);
    }

    #[test]
    fn test_neighbouring_steps_differ() {
        for n in 0..10 {
            let a = illustrate(IllustrationMode::Positive, n);
            let b = illustrate(IllustrationMode::Positive, n + 1);
            assert_ne!((a.palette, a.variant), (b.palette, b.variant));
        }
    }

    #[test]
    fn test_outside_circle_is_empty() {
        for variant in ShapeVariant::ALL {
            assert_eq!(variant.tone_at(0.9, 0.9), None);
            assert!(variant.tone_at(0.0, 0.5).is_some());
        }
    }

    #[test]
    fn test_every_variant_uses_several_tones() {
        for variant in ShapeVariant::ALL {
            let mut tones = std::collections::HashSet::new();
            for yi in -10..=10 {
                for xi in -10..=10 {
                    if let Some(t) = variant.tone_at(xi as f32 / 10.0, yi as f32 / 10.0) {
                        tones.insert(t);
                    }
                }
            }
            assert!(tones.len() >= 2, "{variant:?} only used {tones:?}");
        }
    }

    #[test]
    fn test_large_numbers_wrap() {
        let spec = illustrate(IllustrationMode::Negative, u32::MAX);
        assert_eq!(spec.index, u32::MAX);
    }
}
