//! Application configuration module
//!
//! Provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with
//! the `CHORE_ROTA_` prefix.
//!
//! # Example
//!
//! ```no_run
//! use chore_rota::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;

pub use error::ConfigError;

use std::fs;

use serde::Deserialize;

use crate::domain::roster::Roster;
use crate::domain::rotation::RotationSettings;

fn default_state_path() -> String {
    "chore-rota-state.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cycle_length_days() -> u32 {
    3
}

fn default_min_chores() -> usize {
    2
}

fn default_max_chores() -> usize {
    2
}

fn default_rotation_weekday() -> String {
    "tuesday".to_string()
}

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Path of the JSON state file.
    #[serde(default = "default_state_path")]
    pub state_path: String,

    /// Optional path of a YAML roster file; the built-in sample household
    /// is used when unset.
    #[serde(default)]
    pub roster_path: Option<String>,

    /// Rust log filter directive.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Days from cycle start to deadline.
    #[serde(default = "default_cycle_length_days")]
    pub cycle_length_days: u32,

    /// Minimum chores per person per cycle.
    #[serde(default = "default_min_chores")]
    pub min_chores_per_person: usize,

    /// Maximum chores per person per cycle.
    #[serde(default = "default_max_chores")]
    pub max_chores_per_person: usize,

    /// Weekday each new cycle starts on.
    #[serde(default = "default_rotation_weekday")]
    pub rotation_weekday: String,
}

impl AppConfig {
    /// Loads configuration from `CHORE_ROTA_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("CHORE_ROTA"))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Returns the rotation settings portion of the configuration.
    pub fn rotation_settings(&self) -> RotationSettings {
        RotationSettings {
            cycle_length_days: self.cycle_length_days,
            min_chores_per_person: self.min_chores_per_person,
            max_chores_per_person: self.max_chores_per_person,
            rotation_weekday: self.rotation_weekday.clone(),
        }
    }

    /// Loads the roster named by `roster_path`, or the built-in sample
    /// household when no path is configured.
    pub fn roster(&self) -> Result<Roster, ConfigError> {
        match &self.roster_path {
            None => Ok(Roster::default_household()),
            Some(path) => {
                let yaml = fs::read_to_string(path).map_err(|e| ConfigError::RosterFile {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                Ok(Roster::from_yaml_str(&yaml)?)
            }
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rotation_settings().validate()?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
            roster_path: None,
            log_level: default_log_level(),
            cycle_length_days: default_cycle_length_days(),
            min_chores_per_person: default_min_chores(),
            max_chores_per_person: default_max_chores(),
            rotation_weekday: default_rotation_weekday(),
        }
    }
}
