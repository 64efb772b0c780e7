//! Configuration management for atf2cts.
//!
//! # Overview
//!
//! atf2cts reads an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ATF2CTS_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use atf2cts::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("atf2cts.toml")?;
//!
//! println!("Data root: {}", config.output.data_root.display());
//! println!("Textgroup: {}", config.output.textgroup_urn);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and worker count
//! - [`OutputConfig`] - Data root and CTS metadata
//! - [`LoggingConfig`] - Log file settings
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! workers = 0
//!
//! [output]
//! data_root = "data/test"
//! textgroup_urn = "urn:cts:cdli:test"
//! textgroup_name = "atf2cts test examples"
//! work_description = "Test doc converted from atf."
//! label_prefix = "CDLI"
//! default_language = "und"
//!
//! [logging]
//! local_enabled = false
//! local_path = "logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default, parse_config, DEFAULT_CONFIG_PATH};
pub use schema::{ApplicationConfig, Atf2CtsConfig, LoggingConfig, OutputConfig, MAX_WORKERS};
