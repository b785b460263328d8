//! TOML Configuration File Support
//!
//! Settings for status visuals, loaded from
//! `$XDG_CONFIG_HOME/stepper/status-visual.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (applied by the caller)
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [animation]
//! reduced_motion = false
//! frame_rate = 30
//!
//! [spring]
//! tension = 120.0
//! friction = 14.0
//!
//! [ring]
//! pulse_period_ms = 750
//! spin_period_ms = 1250
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::SpringParams;

/// Environment variable forcing reduced motion
pub const ENV_REDUCED_MOTION: &str = "STEPPER_REDUCED_MOTION";

/// Environment variable overriding the frame rate
pub const ENV_FRAME_RATE: &str = "STEPPER_FRAME_RATE";

/// Highest accepted frame rate
const MAX_FRAME_RATE: u32 = 240;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Tracks where the configuration came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// `[animation]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationToml {
    /// Disable enter/leave animations entirely
    pub reduced_motion: Option<bool>,
    /// Frames per second the surface should redraw at while animating
    pub frame_rate: Option<u32>,
}

/// `[spring]` section (the gentle profile)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpringToml {
    /// Stiffness
    pub tension: Option<f32>,
    /// Damping
    pub friction: Option<f32>,
    /// Mass
    pub mass: Option<f32>,
    /// Settling threshold
    pub precision: Option<f32>,
}

/// `[ring]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RingToml {
    /// One half-cycle of the pulse, in milliseconds
    pub pulse_period_ms: Option<u64>,
    /// One full rotation of the spin, in milliseconds
    pub spin_period_ms: Option<u64>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusVisualToml {
    /// Animation section
    pub animation: AnimationToml,
    /// Spring section
    pub spring: SpringToml,
    /// Ring section
    pub ring: RingToml,
}

// =============================================================================
// Resolved Settings
// =============================================================================

/// Resolved settings for status visuals
#[derive(Clone, Debug, PartialEq)]
pub struct StatusVisualSettings {
    /// Disable enter/leave animations
    pub reduced_motion: bool,
    /// Redraw rate while animating
    pub frame_rate: u32,
    /// Gentle spring parameters
    pub spring: SpringParams,
    /// Pulse half-cycle
    pub pulse_period: Duration,
    /// Spin rotation period
    pub spin_period: Duration,
    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,
    source: ConfigSource,
}

impl Default for StatusVisualSettings {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            frame_rate: 30,
            spring: SpringParams::GENTLE,
            pulse_period: Duration::from_millis(750),
            spin_period: Duration::from_millis(1250),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl StatusVisualSettings {
    /// Parse settings from TOML text on top of the defaults
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] on malformed TOML and
    /// [`ConfigError::ValidationError`] on out-of-range values.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let toml_config: StatusVisualToml = toml::from_str(text)?;
        let mut settings = Self::default();
        settings.apply_toml(&toml_config);
        settings.source = ConfigSource::File;
        settings.validate()?;
        Ok(settings)
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Time between frames at the configured frame rate
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_REDUCED_MOTION) {
            match parse_bool(&value) {
                Some(flag) => {
                    self.reduced_motion = flag;
                    self.source = ConfigSource::Env;
                }
                None => tracing::warn!(
                    var = ENV_REDUCED_MOTION,
                    value = %value,
                    "Ignoring unparsable boolean"
                ),
            }
        }

        if let Some(value) = lookup(ENV_FRAME_RATE) {
            match value.trim().parse::<u32>() {
                Ok(rate) => {
                    self.frame_rate = rate;
                    self.source = ConfigSource::Env;
                }
                Err(e) => tracing::warn!(
                    var = ENV_FRAME_RATE,
                    value = %value,
                    error = %e,
                    "Ignoring unparsable frame rate"
                ),
            }
        }
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 || self.frame_rate > MAX_FRAME_RATE {
            return Err(ConfigError::ValidationError(format!(
                "animation.frame_rate must be between 1 and {MAX_FRAME_RATE}, got {}",
                self.frame_rate
            )));
        }
        let spring = &self.spring;
        if !is_positive(spring.tension) || !is_positive(spring.mass) || !is_positive(spring.precision)
        {
            return Err(ConfigError::ValidationError(
                "spring.tension, spring.mass and spring.precision must be positive".to_string(),
            ));
        }
        if spring.friction.is_nan() || spring.friction < 0.0 {
            return Err(ConfigError::ValidationError(
                "spring.friction must not be negative".to_string(),
            ));
        }
        if self.pulse_period.is_zero() || self.spin_period.is_zero() {
            return Err(ConfigError::ValidationError(
                "ring periods must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    fn apply_toml(&mut self, toml: &StatusVisualToml) {
        if let Some(reduced) = toml.animation.reduced_motion {
            self.reduced_motion = reduced;
        }
        if let Some(rate) = toml.animation.frame_rate {
            self.frame_rate = rate;
        }

        if let Some(tension) = toml.spring.tension {
            self.spring.tension = tension;
        }
        if let Some(friction) = toml.spring.friction {
            self.spring.friction = friction;
        }
        if let Some(mass) = toml.spring.mass {
            self.spring.mass = mass;
        }
        if let Some(precision) = toml.spring.precision {
            self.spring.precision = precision;
        }

        if let Some(ms) = toml.ring.pulse_period_ms {
            self.pulse_period = Duration::from_millis(ms);
        }
        if let Some(ms) = toml.ring.spin_period_ms {
            self.spin_period = Duration::from_millis(ms);
        }
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/stepper/status-visual.toml` or
/// `~/.config/stepper/status-visual.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("stepper").join("status-visual.toml"))
}

/// Load configuration from the default path and the environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
/// A missing config file is not an error (defaults are used).
pub fn load_config() -> Result<StatusVisualSettings, ConfigError> {
    load_config_from_path(default_config_path().as_deref())
}

/// Load configuration from a specific path and the environment
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or if the resulting values are out of range.
pub fn load_config_from_path(path: Option<&Path>) -> Result<StatusVisualSettings, ConfigError> {
    let mut settings = read_config_file(path)?;
    settings.apply_env_overrides(|key| std::env::var(key).ok());
    settings.validate()?;
    Ok(settings)
}

fn read_config_file(path: Option<&Path>) -> Result<StatusVisualSettings, ConfigError> {
    let Some(config_path) = path else {
        return Ok(StatusVisualSettings::default());
    };

    if !config_path.exists() {
        tracing::debug!(
            path = %config_path.display(),
            "Config file not found, using defaults"
        );
        return Ok(StatusVisualSettings::default());
    }

    let toml_content =
        std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
            path: config_path.to_path_buf(),
            source: e,
        })?;

    let mut settings = StatusVisualSettings::from_toml(&toml_content)?;
    settings.config_file_path = Some(config_path.to_path_buf());

    tracing::info!(
        path = %config_path.display(),
        "Loaded configuration from file"
    );
    Ok(settings)
}
