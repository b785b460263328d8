//! Status Resolver
//!
//! Pure lookup from a [`Status`] to the [`VisualConfig`] that describes it.
//! Every status has exactly one configuration; the match below is exhaustive
//! so a new status cannot compile until it has a visual.

use serde::{Deserialize, Serialize};

use crate::status::{Status, StatusError};

/// Icon shown in the corner badge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Glyph {
    /// Check mark (success)
    Check,
    /// Cross (error)
    Cross,
}

impl Glyph {
    /// Terminal symbol for the glyph
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Check => "✓",
            Self::Cross => "✕",
        }
    }
}

/// Palette family for the illustration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IllustrationMode {
    /// Default palette
    Neutral,
    /// Success palette
    Positive,
    /// Error palette
    Negative,
}

/// Decorative animation of the ring around the badge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingStyle {
    /// Static ring
    None,
    /// Opacity oscillating between 1 and 0.1
    Pulse,
    /// Full rotation with a masked gradient
    Spin,
}

/// Whether the ring border is drawn in the instance color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderVisibility {
    /// Border present but transparent
    Transparent,
    /// Border drawn in the instance color
    Colored,
}

/// What fills the middle of the badge
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeBody {
    /// Literal step number on a filled circle
    Number,
    /// Colored illustration in the given mode
    Illustration(IllustrationMode),
}

/// Presentation parameters derived from a status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualConfig {
    /// Corner icon, if the status has one
    pub icon: Option<Glyph>,
    /// Illustration palette family
    pub illustration: IllustrationMode,
    /// Ring animation
    pub ring: RingStyle,
    /// Badge body
    pub body: BadgeBody,
    /// Ring border visibility
    pub border: BorderVisibility,
    /// Whether the ring interior is filled with the theme background
    pub fill_background: bool,
}

/// Resolve the visual configuration for a status
#[must_use]
pub const fn resolve(status: Status) -> VisualConfig {
    let (icon, illustration, ring) = match status {
        Status::Waiting => (None, IllustrationMode::Neutral, RingStyle::None),
        Status::Prompting => (None, IllustrationMode::Neutral, RingStyle::Pulse),
        Status::Working => (None, IllustrationMode::Neutral, RingStyle::Spin),
        Status::Success => (Some(Glyph::Check), IllustrationMode::Positive, RingStyle::None),
        Status::Error => (Some(Glyph::Cross), IllustrationMode::Negative, RingStyle::None),
    };

    let body = match status {
        Status::Waiting | Status::Prompting => BadgeBody::Number,
        Status::Working | Status::Success | Status::Error => BadgeBody::Illustration(illustration),
    };

    let border = match status {
        Status::Waiting => BorderVisibility::Transparent,
        _ => BorderVisibility::Colored,
    };

    VisualConfig {
        icon,
        illustration,
        ring,
        body,
        border,
        fill_background: matches!(status, Status::Prompting),
    }
}

/// Resolve from untyped text, failing on anything that is not a status
///
/// # Errors
///
/// Returns [`StatusError::Unrecognized`] for unknown values.
pub fn resolve_str(value: &str) -> Result<VisualConfig, StatusError> {
    let status: Status = value.parse()?;
    Ok(resolve(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_table() {
        let table = [
            (Status::Waiting, None, IllustrationMode::Neutral, RingStyle::None),
            (Status::Prompting, None, IllustrationMode::Neutral, RingStyle::Pulse),
            (Status::Working, None, IllustrationMode::Neutral, RingStyle::Spin),
            (
                Status::Success,
                Some(Glyph::Check),
                IllustrationMode::Positive,
                RingStyle::None,
            ),
            (
                Status::Error,
                Some(Glyph::Cross),
                IllustrationMode::Negative,
                RingStyle::None,
            ),
        ];

        for (status, icon, mode, ring) in table {
            let config = resolve(status);
            assert_eq!(
                (config.icon, config.illustration, config.ring),
                (icon, mode, ring),
                "status {status}"
            );
        }
    }

    #[test]
    fn test_body_is_number_until_work_starts() {
        assert_eq!(resolve(Status::Waiting).body, BadgeBody::Number);
        assert_eq!(resolve(Status::Prompting).body, BadgeBody::Number);
        assert_eq!(
            resolve(Status::Working).body,
            BadgeBody::Illustration(IllustrationMode::Neutral)
        );
        assert_eq!(
            resolve(Status::Success).body,
            BadgeBody::Illustration(IllustrationMode::Positive)
        );
        assert_eq!(
            resolve(Status::Error).body,
            BadgeBody::Illustration(IllustrationMode::Negative)
        );
    }

    #[test]
    fn test_border_and_fill() {
        for status in Status::ALL {
            let config = resolve(status);
            let expected_border = if status == Status::Waiting {
                BorderVisibility::Transparent
            } else {
                BorderVisibility::Colored
            };
            assert_eq!(config.border, expected_border);
            assert_eq!(config.fill_background, status == Status::Prompting);
        }
    }

    #[test]
    fn test_resolve_str_fails_fast() {
        assert_eq!(resolve_str("error").map(|c| c.icon), Ok(Some(Glyph::Cross)));
        assert!(matches!(
            resolve_str("complete"),
            Err(StatusError::Unrecognized(v)) if v == "complete"
        ));
    }
}
