//! Conversion coordinator - main orchestrator for a conversion run
//!
//! Writes the textgroup descriptor, then segments and converts each input
//! file in turn with a fresh worker pool.

use crate::adapters::atf::{AtfParser, CdliAtfParser};
use crate::config::Atf2CtsConfig;
use crate::core::export::batch::{BatchProcessor, ConversionContext};
use crate::core::export::summary::ConversionSummary;
use crate::core::export::writer::OutputWriter;
use crate::core::segment::segment_str;
use crate::core::transform::RenderOptions;
use crate::domain::{Atf2CtsError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Conversion coordinator
pub struct ConversionCoordinator {
    config: Atf2CtsConfig,
    parser: Arc<dyn AtfParser>,
    verbose: bool,
}

impl ConversionCoordinator {
    /// Create a coordinator using the CDLI ATF parser
    pub fn new(config: Atf2CtsConfig) -> Self {
        Self::with_parser(config, Arc::new(CdliAtfParser))
    }

    /// Create a coordinator with a custom parser
    pub fn with_parser(config: Atf2CtsConfig, parser: Arc<dyn AtfParser>) -> Self {
        Self {
            config,
            parser,
            verbose: false,
        }
    }

    /// Log every parsed document at info level
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Converts every record of every input file
    ///
    /// Per-record failures are counted in the summary. Unreadable input files
    /// and filesystem errors while writing abort the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written or an input file
    /// cannot be read.
    pub async fn execute(&self, files: &[PathBuf]) -> Result<ConversionSummary> {
        let start_time = Instant::now();
        let mut summary = ConversionSummary::new();

        let output = &self.config.output;
        let writer = OutputWriter::new(output)?;
        writer.write_textgroup(&output.textgroup_name)?;

        let context = ConversionContext::new(
            RenderOptions::new(output.textgroup_urn.clone(), self.verbose),
            writer,
        );
        let workers = self.config.application.effective_workers();

        tracing::info!(
            files = files.len(),
            workers,
            parser = self.parser.name(),
            data_root = %output.data_root.display(),
            "Starting conversion"
        );

        for path in files {
            let result = self.convert_file(path, &context, workers).await?;
            summary.add_file(path, result);
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    async fn convert_file(
        &self,
        path: &Path,
        context: &ConversionContext,
        workers: usize,
    ) -> Result<crate::core::export::BatchResult> {
        tracing::info!(path = %path.display(), "Parsing");
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Atf2CtsError::io_at(path, e))?;

        let processor = BatchProcessor::new(Arc::clone(&self.parser), context.clone(), workers);
        let result = processor.process(segment_str(&text)).await?;

        tracing::info!(
            path = %path.display(),
            records = result.total(),
            successful = result.successful,
            parse_failed = result.parse_failed,
            export_failed = result.export_failed,
            "File converted"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(root: &Path) -> Atf2CtsConfig {
        let mut config = Atf2CtsConfig::default();
        config.output.data_root = root.to_path_buf();
        config.application.workers = 2;
        config
    }

    #[tokio::test]
    async fn test_execute_writes_textgroup_even_without_records() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("data");
        let input = dir.path().join("empty.atf");
        std::fs::write(&input, "no records here\n").unwrap();

        let summary = ConversionCoordinator::new(config(&root))
            .execute(&[input])
            .await
            .unwrap();
        assert_eq!(summary.total_records(), 0);
        assert!(root.join("__cts__.xml").exists());
    }

    #[tokio::test]
    async fn test_execute_missing_input_is_fatal() {
        let dir = TempDir::new().unwrap();
        let result = ConversionCoordinator::new(config(&dir.path().join("data")))
            .execute(&[dir.path().join("missing.atf")])
            .await;
        assert!(matches!(result, Err(Atf2CtsError::Io(_))));
    }

    #[tokio::test]
    async fn test_execute_counts_across_files() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("data");
        let first = dir.path().join("a.atf");
        let second = dir.path().join("b.atf");
        std::fs::write(&first, "&P1 = One\n1. a\n&P2 broken\n").unwrap();
        std::fs::write(&second, "&P3 = Three\n#atf: lang sux\n1. lugal\n").unwrap();

        let summary = ConversionCoordinator::new(config(&root))
            .verbose(true)
            .execute(&[first, second])
            .await
            .unwrap();
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.parse_failed, 1);
        assert_eq!(summary.files.len(), 2);
        assert!(root.join("P3").join("test.P3.sux.xml").exists());
        assert!(root.join("P1").join("test.P1.und.xml").exists());
    }
}
