//! Conversion summary and reporting
//!
//! The summary is logged at the end of every run and can be written as a JSON
//! report with `convert --report`.

use crate::core::export::batch::{BatchResult, DocumentFailure, RecordFailure};
use crate::domain::{Atf2CtsError, Result};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-file record counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub records: usize,
    pub successful: usize,
    pub parse_failed: usize,
    pub export_failed: usize,
}

/// Summary of a conversion run
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Input files in processing order
    pub files: Vec<FileSummary>,

    /// Number of records converted and written
    pub successful: usize,

    /// Number of records the ATF parser rejected
    pub parse_failed: usize,

    /// Number of records that failed rendering or the export check
    pub export_failed: usize,

    /// Duration of the run
    #[serde(rename = "duration_secs", serialize_with = "serialize_secs")]
    pub duration: Duration,

    /// Records that failed to parse
    pub failed_records: Vec<RecordFailure>,

    /// Records that failed to render or export
    pub failed_documents: Vec<DocumentFailure>,
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

impl ConversionSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            files: Vec::new(),
            successful: 0,
            parse_failed: 0,
            export_failed: 0,
            duration: Duration::from_secs(0),
            failed_records: Vec::new(),
            failed_documents: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Folds the result of one input file into the summary
    pub fn add_file(&mut self, path: &Path, result: BatchResult) {
        self.files.push(FileSummary {
            path: path.to_path_buf(),
            records: result.total(),
            successful: result.successful,
            parse_failed: result.parse_failed,
            export_failed: result.export_failed,
        });
        self.successful += result.successful;
        self.parse_failed += result.parse_failed;
        self.export_failed += result.export_failed;
        self.failed_records.extend(result.failed_records);
        self.failed_documents.extend(result.failed_documents);
    }

    /// Total number of records seen
    pub fn total_records(&self) -> usize {
        self.successful + self.parse_failed + self.export_failed
    }

    /// Check if every record converted
    pub fn is_successful(&self) -> bool {
        self.parse_failed == 0 && self.export_failed == 0
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let total = self.total_records();
        if total == 0 {
            return 100.0;
        }
        (self.successful as f64 / total as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        crate::log_conversion_complete!(
            self.successful,
            self.parse_failed,
            self.export_failed,
            self.duration
        );

        if self.parse_failed > 0 {
            tracing::error!(count = self.parse_failed, "Records did not convert");
        }
        if self.export_failed > 0 {
            tracing::error!(count = self.export_failed, "Records did not serialize");
        }
        tracing::info!(
            files = self.files.len(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Successfully converted {} records from ATF in {:.3} seconds",
            self.successful,
            self.duration.as_secs_f64()
        );
    }

    /// Writes the summary as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_report(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| Atf2CtsError::io_at(path, e))
    }
}

impl Default for ConversionSummary {
    fn default() -> Self {
        Self::new()
    }
}
