//! Roster configuration
//!
//! Loaded from a JSON file. Every field has a default, so `{}` is a valid
//! configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event, Event};
use crate::record::DEFAULT_PLACEHOLDER_IMAGE;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Simulated course service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Response latency in milliseconds (default: 800)
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Probability that a fetch fails, 0.0..=1.0 (default: 0.1)
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            failure_rate: default_failure_rate(),
        }
    }
}

impl DirectoryConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Root directory of the file backend (default: "./roster-data")
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Name of the persisted blob (default: "students")
    #[serde(default = "default_blob_name")]
    pub blob_name: String,

    /// Image used when a draft has none
    #[serde(default = "default_placeholder_image_url")]
    pub placeholder_image_url: String,

    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Simulated submission latency in milliseconds (default: 500)
    #[serde(default = "default_submission_delay_ms")]
    pub submission_delay_ms: u64,

    /// Reject courses missing from the directory snapshot (default: true)
    #[serde(default = "default_enforce_course_membership")]
    pub enforce_course_membership: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./roster-data")
}
fn default_blob_name() -> String {
    "students".to_string()
}
fn default_placeholder_image_url() -> String {
    DEFAULT_PLACEHOLDER_IMAGE.to_string()
}
fn default_latency_ms() -> u64 {
    800
}
fn default_failure_rate() -> f64 {
    0.1
}
fn default_submission_delay_ms() -> u64 {
    500
}
fn default_enforce_course_membership() -> bool {
    true
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            blob_name: default_blob_name(),
            placeholder_image_url: default_placeholder_image_url(),
            directory: DirectoryConfig::default(),
            submission_delay_ms: default_submission_delay_ms(),
            enforce_course_membership: default_enforce_course_membership(),
        }
    }
}

impl RosterConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config = Self::from_json(&content)?;

        let path_field = path.display().to_string();
        log_event(Event::ConfigLoaded, &[("path", path_field.as_str())]);
        Ok(config)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: RosterConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.blob_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "blob_name",
                reason: "must not be empty".to_string(),
            });
        }

        if self.blob_name.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                field: "blob_name",
                reason: format!("'{}' must not contain path separators", self.blob_name),
            });
        }

        let rate = self.directory.failure_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::Invalid {
                field: "directory.failure_rate",
                reason: format!("{} is outside 0.0..=1.0", rate),
            });
        }

        Ok(())
    }

    pub fn submission_delay(&self) -> Duration {
        Duration::from_millis(self.submission_delay_ms)
    }
}
