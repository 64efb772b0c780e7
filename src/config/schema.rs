//! Configuration schema types
//!
//! Every section and field has a default, so an empty file (or no file at
//! all) yields a working configuration that writes to `data/test`.

use crate::domain::CtsUrn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main atf2cts configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Atf2CtsConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Output layout and CTS metadata
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Atf2CtsConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Worker pool size per input file; 0 uses one worker per CPU
    #[serde(default)]
    pub workers: usize,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }

        if self.workers > MAX_WORKERS {
            return Err(format!(
                "application.workers must be <= {}, got {}",
                MAX_WORKERS, self.workers
            ));
        }

        Ok(())
    }

    /// Number of workers to run, resolving 0 to the CPU count
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.workers
        }
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            workers: 0,
        }
    }
}

/// Upper bound on the configured worker count
pub const MAX_WORKERS: usize = 512;

/// Output layout and CTS metadata configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root of the CTS data directory
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,

    /// Textgroup every converted document belongs to
    #[serde(default = "default_textgroup_urn")]
    pub textgroup_urn: String,

    /// Human-readable textgroup name
    #[serde(default = "default_textgroup_name")]
    pub textgroup_name: String,

    /// Description written to every work descriptor
    #[serde(default = "default_work_description")]
    pub work_description: String,

    /// First word of every edition label
    #[serde(default = "default_label_prefix")]
    pub label_prefix: String,

    /// Language used in file names when a document declares none
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.data_root.as_os_str().is_empty() {
            return Err("output.data_root cannot be empty".to_string());
        }

        CtsUrn::new(self.textgroup_urn.as_str())
            .map_err(|e| format!("Invalid output.textgroup_urn: {}", e))?;

        if self.textgroup_name.trim().is_empty() {
            return Err("output.textgroup_name cannot be empty".to_string());
        }

        let lang = &self.default_language;
        if lang.is_empty() || !lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(format!(
                "Invalid output.default_language '{}'. Must be a plain language tag",
                lang
            ));
        }

        Ok(())
    }

    /// Parsed textgroup URN
    ///
    /// # Errors
    ///
    /// Returns an error if `textgroup_urn` is not a CTS URN.
    pub fn textgroup(&self) -> Result<CtsUrn, String> {
        CtsUrn::new(self.textgroup_urn.as_str())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            textgroup_urn: default_textgroup_urn(),
            textgroup_name: default_textgroup_name(),
            work_description: default_work_description(),
            label_prefix: default_label_prefix(),
            default_language: default_language(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to rotating files under `local_path`
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_root() -> PathBuf {
    PathBuf::from("data/test")
}

fn default_textgroup_urn() -> String {
    crate::core::transform::DEFAULT_TEXTGROUP_URN.to_string()
}

fn default_textgroup_name() -> String {
    "atf2cts test examples".to_string()
}

fn default_work_description() -> String {
    "Test doc converted from atf.".to_string()
}

fn default_label_prefix() -> String {
    "CDLI".to_string()
}

fn default_language() -> String {
    "und".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
