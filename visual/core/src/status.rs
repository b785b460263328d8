//! Step Status
//!
//! The closed set of lifecycle states a wizard step can be in. Text input is
//! parsed strictly: anything outside the set is rejected at the point of
//! resolution instead of falling back to a default visual.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while resolving a status
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    /// The value is not one of the known step statuses
    #[error("unrecognized step status {0:?} (expected one of: waiting, prompting, working, success, error)")]
    Unrecognized(String),
}

/// Lifecycle state of a single wizard step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not started yet
    Waiting,
    /// Waiting on the user to act
    Prompting,
    /// In progress
    Working,
    /// Finished successfully
    Success,
    /// Finished with an error
    Error,
}

impl Status {
    /// Every status, in wizard order
    pub const ALL: [Status; 5] = [
        Status::Waiting,
        Status::Prompting,
        Status::Working,
        Status::Success,
        Status::Error,
    ];

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Prompting => "prompting",
            Self::Working => "working",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// The status that follows this one when a step is advanced.
    ///
    /// Terminal statuses wrap back to `Waiting`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Waiting => Self::Prompting,
            Self::Prompting => Self::Working,
            Self::Working => Self::Success,
            Self::Success | Self::Error => Self::Waiting,
        }
    }

    /// Whether the step has reached a final outcome
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "prompting" => Ok(Self::Prompting),
            "working" => Ok(Self::Working),
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            other => Err(StatusError::Unrecognized(other.to_string())),
        }
    }
}
