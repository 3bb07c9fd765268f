//! Configuration file structure
//!
//! Every field is optional; a missing file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::contact::ContactId;
use crate::index::{IdGenerator, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_ID, DEFAULT_MIN_ID};
use crate::observability::Severity;

use super::errors::{CliError, CliResult};

/// rolodex configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Contacts file (optional, default "contacts.json")
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Lowest generated id (optional, default 1)
    #[serde(default = "default_min_id")]
    pub min_id: ContactId,

    /// Highest generated id (optional, default 1_000_000)
    #[serde(default = "default_max_id")]
    pub max_id: ContactId,

    /// Sampling attempts per generated id (optional, default 10_000)
    #[serde(default = "default_max_id_attempts")]
    pub max_id_attempts: u32,

    /// Minimum log severity (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_file() -> String {
    "contacts.json".to_string()
}
fn default_min_id() -> ContactId {
    DEFAULT_MIN_ID
}
fn default_max_id() -> ContactId {
    DEFAULT_MAX_ID
}
fn default_max_id_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            min_id: default_min_id(),
            max_id: default_max_id(),
            max_id_attempts: default_max_id_attempts(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::parse(&content)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_file.trim().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }

        if self.min_id == 0 {
            return Err(CliError::config_error("min_id must be >= 1"));
        }

        if self.min_id > self.max_id {
            return Err(CliError::config_error(format!(
                "min_id ({}) must not exceed max_id ({})",
                self.min_id, self.max_id
            )));
        }

        if self.max_id_attempts == 0 {
            return Err(CliError::config_error("max_id_attempts must be > 0"));
        }

        self.log_severity()?;

        Ok(())
    }

    /// Contacts file as a path
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_file)
    }

    /// Parsed `log_level`
    pub fn log_severity(&self) -> CliResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of trace, info, warn, error, fatal.",
                self.log_level
            ))
        })
    }

    /// Id allocator over the configured range
    pub fn id_generator(&self) -> IdGenerator {
        IdGenerator::new(self.min_id, self.max_id, self.max_id_attempts)
    }
}
