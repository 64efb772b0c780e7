//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the atf2cts configuration file.

use super::exit_code;
use crate::config::load_config_or_default;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        // Loading applies overrides and validates
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(exit_code::CONFIGURATION);
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Workers: {} (effective {})",
            config.application.workers,
            config.application.effective_workers()
        );
        println!("  Data Root: {}", config.output.data_root.display());
        println!("  Textgroup URN: {}", config.output.textgroup_urn);
        println!("  Textgroup Name: {}", config.output.textgroup_name);
        println!("  Label Prefix: {}", config.output.label_prefix);
        println!("  Default Language: {}", config.output.default_language);
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        println!();
        Ok(exit_code::SUCCESS)
    }
}
