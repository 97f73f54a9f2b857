//! Settings errors and violations.

use std::path::PathBuf;
use thiserror::Error;

/// A single rule broken by otherwise well-formed settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsViolation {
    #[error("step delay {value}ms exceeds maximum of {max}ms")]
    StepDelayTooLong { value: u64, max: u64 },

    #[error("log filter is empty")]
    EmptyLogFilter,

    #[error("log filter '{filter}' is invalid: {reason}")]
    InvalidLogFilter { filter: String, reason: String },
}

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("environment variable {key}={value:?} is not valid")]
    InvalidEnv { key: String, value: String },

    #[error("invalid settings: {}", join(.0))]
    Invalid(Vec<SettingsViolation>),
}

fn join(violations: &[SettingsViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
