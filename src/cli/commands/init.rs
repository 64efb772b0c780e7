//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::exit_code;
use crate::config::DEFAULT_CONFIG_PATH;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(exit_code::CONFIGURATION);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: atf2cts validate-config");
                println!("  3. Convert: atf2cts convert <FILES>...");
                println!();
                Ok(exit_code::SUCCESS)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(exit_code::FATAL)
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# atf2cts Configuration File
# ATF to TEI/CTS converter
#
# Every setting can be overridden with ATF2CTS_<SECTION>_<KEY>,
# e.g. ATF2CTS_OUTPUT_DATA_ROOT. Values may reference ${ENV_VARS}.

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Parallel workers per input file (0 = one per CPU)
workers = 0

[output]
# Root of the CTS data directory
data_root = "data/test"

# Textgroup all converted documents belong to
textgroup_urn = "urn:cts:cdli:test"
textgroup_name = "atf2cts test examples"

# Written to every work descriptor
work_description = "Test doc converted from atf."
label_prefix = "CDLI"

# Used in file names when a document declares no language
default_language = "und"

[logging]
# JSON log files with rotation (daily, hourly, never)
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }
}
