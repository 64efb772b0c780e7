//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for atf2cts using clap.

pub mod commands;

use crate::config::DEFAULT_CONFIG_PATH;
use clap::{Parser, Subcommand};

/// atf2cts - ATF to TEI/CTS converter
#[derive(Parser, Debug)]
#[command(name = "atf2cts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, env = "ATF2CTS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ATF2CTS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert ATF files to TEI documents in a CTS layout
    Convert(commands::convert::ConvertArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
