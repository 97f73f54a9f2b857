//! Runtime settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables, then command-line overrides. The result is validated with `Validation` so every
//! violation is reported together instead of one at a time.
//!
//! ```toml
//! step_delay_ms = 300
//! log_filter = "toy_robot=debug"
//! ```

pub mod error;

pub use error::{SettingsError, SettingsViolation};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing_subscriber::EnvFilter;

/// File read when no explicit path is given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "toy-robot.toml";

pub const DEFAULT_STEP_DELAY_MS: u64 = 300;
pub const MAX_STEP_DELAY_MS: u64 = 60_000;

pub const ENV_STEP_DELAY_MS: &str = "TOY_ROBOT_STEP_DELAY_MS";
pub const ENV_LOG_FILTER: &str = "TOY_ROBOT_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Pause before each command of a paced batch
    pub step_delay_ms: u64,
    /// `tracing` filter directives used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(raw: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply environment overrides read through `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_STEP_DELAY_MS) {
            self.step_delay_ms =
                value
                    .trim()
                    .parse()
                    .map_err(|_| SettingsError::InvalidEnv {
                        key: ENV_STEP_DELAY_MS.to_string(),
                        value: value.clone(),
                    })?;
        }
        if let Some(value) = lookup(ENV_LOG_FILTER) {
            self.log_filter = value;
        }
        Ok(self)
    }

    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<SettingsViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<SettingsViolation>>> = Vec::new();

        checks.push(if self.step_delay_ms > MAX_STEP_DELAY_MS {
            Validation::fail(SettingsViolation::StepDelayTooLong {
                value: self.step_delay_ms,
                max: MAX_STEP_DELAY_MS,
            })
        } else {
            Validation::success(())
        });

        let filter = self.log_filter.trim();
        checks.push(if filter.is_empty() {
            Validation::fail(SettingsViolation::EmptyLogFilter)
        } else {
            match EnvFilter::try_new(filter) {
                Ok(_) => Validation::success(()),
                Err(e) => Validation::fail(SettingsViolation::InvalidLogFilter {
                    filter: filter.to_string(),
                    reason: e.to_string(),
                }),
            }
        });

        Validation::all_vec(checks).map(|_| ())
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

/// Overrides taken from the command line. They win over every other layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub step_delay_ms: Option<u64>,
}

impl Overrides {
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(step_delay_ms) = self.step_delay_ms {
            settings.step_delay_ms = step_delay_ms;
        }
        settings
    }
}

/// The settings file [`load_settings`] reads: `path` when given, otherwise
/// [`DEFAULT_CONFIG_FILE`] if it exists.
pub fn settings_file(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => Some(path.to_path_buf()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
    }
}

/// Load settings from [`settings_file`], apply environment variables and
/// `overrides`, then validate the result.
///
/// Logs nothing. Callers log the result once tracing is set up.
pub fn load_settings(
    path: Option<&Path>,
    overrides: &Overrides,
) -> Result<Settings, SettingsError> {
    let settings = match settings_file(path) {
        Some(file) => read_file(&file)?,
        None => Settings::default(),
    };

    let settings = settings.with_env_overrides(|key| std::env::var(key).ok())?;
    ensure_valid(overrides.apply(settings))
}

fn read_file(path: &Path) -> Result<Settings, SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Settings::from_toml_str(&raw)
}

fn ensure_valid(settings: Settings) -> Result<Settings, SettingsError> {
    match settings.validate() {
        Validation::Success(_) => Ok(settings),
        Validation::Failure(violations) => Err(SettingsError::Invalid(
            violations.iter().cloned().collect(),
        )),
    }
}
