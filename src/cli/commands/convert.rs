//! Convert command implementation
//!
//! This module implements the `convert` command, which turns ATF files into
//! TEI documents in a CTS directory layout.

use super::exit_code;
use crate::config::{load_config_or_default, Atf2CtsConfig};
use crate::core::export::{ConversionCoordinator, ConversionSummary};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// ATF files to convert
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Override the output data root
    #[arg(long, value_name = "DIR")]
    pub data_root: Option<PathBuf>,

    /// Override the number of parallel workers (0 = one per CPU)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Log every parsed document
    #[arg(short, long)]
    pub verbose: bool,

    /// Write a JSON run report to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl ConvertArgs {
    /// Execute the convert command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting convert command");

        let mut config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(exit_code::CONFIGURATION);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(exit_code::CONFIGURATION);
        }

        let coordinator = ConversionCoordinator::new(config).verbose(self.verbose);
        let summary = match coordinator.execute(&self.files).await {
            Ok(summary) => summary,
            Err(e) => {
                crate::log_error_with_context!(&e, "Conversion aborted");
                eprintln!("Conversion failed: {e}");
                return Ok(exit_code::FATAL);
            }
        };

        Self::print_summary(&summary);

        if let Some(report) = &self.report {
            if let Err(e) = summary.write_report(report) {
                crate::log_error_with_context!(&e, "Failed to write report");
                eprintln!("Failed to write report: {e}");
                return Ok(exit_code::FATAL);
            }
            println!("Report written to {}", report.display());
        }

        Ok(if summary.is_successful() {
            exit_code::SUCCESS
        } else {
            exit_code::RECORD_FAILURES
        })
    }

    fn apply_overrides(&self, config: &mut Atf2CtsConfig) {
        if let Some(data_root) = &self.data_root {
            tracing::info!(data_root = %data_root.display(), "Overriding data root from CLI");
            config.output.data_root = data_root.clone();
        }
        if let Some(workers) = self.workers {
            tracing::info!(workers, "Overriding worker count from CLI");
            config.application.workers = workers;
        }
    }

    fn print_summary(summary: &ConversionSummary) {
        println!();
        println!("Conversion Summary:");
        println!("  Files: {}", summary.files.len());
        println!("  Records: {}", summary.total_records());
        println!("  Successful: {}", summary.successful);
        println!("  Parse failures: {}", summary.parse_failed);
        println!("  Export failures: {}", summary.export_failed);
        println!("  Duration: {:.3}s", summary.duration.as_secs_f64());
        println!("  Success Rate: {:.2}%", summary.success_rate());

        if summary.parse_failed > 0 {
            println!();
            println!("Error: {} records did not convert.", summary.parse_failed);
        }
        if summary.export_failed > 0 {
            println!("Error: {} records did not serialize.", summary.export_failed);
        }
        for failure in summary.failed_records.iter().take(10) {
            println!("  - {} ({})", failure.header, failure.error);
        }
        for failure in summary.failed_documents.iter().take(10) {
            println!("  - {} ({})", failure.header, failure.error);
        }
        println!();
    }
}
