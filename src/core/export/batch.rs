//! Batch conversion of ATF records
//!
//! Each record is parsed, rendered, checked and written on a blocking worker.
//! Per-record failures are classified and counted; only filesystem errors
//! abort the batch.

use crate::adapters::atf::AtfParser;
use crate::core::export::metadata::extract_metadata;
use crate::core::export::writer::OutputWriter;
use crate::core::transform::{render_document, RenderOptions};
use crate::domain::{
    Atf2CtsError, ConversionOutcome, DocumentMetadata, ExportFailureKind, Record, Result,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Immutable per-run settings shared by all workers
#[derive(Debug, Clone)]
pub struct ConversionContext {
    pub render: RenderOptions,
    pub writer: OutputWriter,
}

impl ConversionContext {
    pub fn new(render: RenderOptions, writer: OutputWriter) -> Self {
        Self { render, writer }
    }
}

/// Converts one record end to end
///
/// # Errors
///
/// Only filesystem errors while writing are returned as `Err`; every other
/// failure is reported through the returned [`ConversionOutcome`].
pub fn convert_record(
    record: Record,
    parser: &dyn AtfParser,
    context: &ConversionContext,
) -> Result<ConversionOutcome> {
    let parsed = match parser.parse(record.as_str()) {
        Ok(parsed) => parsed,
        Err(e) => {
            return Ok(ConversionOutcome::ParseFailed {
                record,
                error: e.to_string(),
            })
        }
    };

    let xml = match render_document(&parsed, &context.render) {
        Ok(xml) => xml,
        Err(e) => {
            return Ok(ConversionOutcome::ExportFailed {
                content: record.into_inner(),
                kind: ExportFailureKind::Render,
                error: e.to_string(),
            })
        }
    };

    let located = extract_metadata(&xml).and_then(|doc| {
        let location = context.writer.locate(&doc)?;
        Ok((doc, location))
    });
    let (doc, location) = match located {
        Ok(located) => located,
        Err(e) => {
            return Ok(ConversionOutcome::ExportFailed {
                content: xml,
                kind: ExportFailureKind::Export,
                error: e.to_string(),
            })
        }
    };

    let metadata = context.writer.write_document(&doc, &location)?;
    Ok(ConversionOutcome::Success(metadata))
}

/// A record the parser rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    /// First line of the record
    pub header: String,
    pub error: String,
    /// Raw ATF text of the record
    pub record: Record,
}

/// A parsed record that could not be rendered or exported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFailure {
    /// First line of the record
    pub header: String,
    pub kind: ExportFailureKind,
    pub error: String,
    /// Record text for render failures, rendered XML for export failures
    pub content: String,
}

/// Aggregated outcomes of a batch
///
/// Folding is commutative in the counts, so the result does not depend on
/// the order in which workers finish.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Number of records converted and written
    pub successful: usize,
    /// Number of records the parser rejected
    pub parse_failed: usize,
    /// Number of records that failed rendering or the export check
    pub export_failed: usize,
    /// Written documents
    pub documents: Vec<DocumentMetadata>,
    /// Records that failed to parse
    pub failed_records: Vec<RecordFailure>,
    /// Records that failed to render or export
    pub failed_documents: Vec<DocumentFailure>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records seen
    pub fn total(&self) -> usize {
        self.successful + self.parse_failed + self.export_failed
    }

    /// Folds one record outcome into the result
    pub fn record(&mut self, header: String, outcome: ConversionOutcome) {
        match outcome {
            ConversionOutcome::Success(metadata) => {
                self.successful += 1;
                self.documents.push(metadata);
            }
            ConversionOutcome::ParseFailed { record, error } => {
                tracing::warn!(header = %header, error = %error, record = %record, "Error converting ATF");
                self.parse_failed += 1;
                self.failed_records.push(RecordFailure {
                    header,
                    error,
                    record,
                });
            }
            ConversionOutcome::ExportFailed {
                content,
                kind,
                error,
            } => {
                tracing::warn!(
                    header = %header,
                    kind = ?kind,
                    error = %error,
                    content = %content,
                    "Error exporting document"
                );
                self.export_failed += 1;
                self.failed_documents.push(DocumentFailure {
                    header,
                    kind,
                    error,
                    content,
                });
            }
        }
    }

    /// Merge another batch result into this one
    pub fn merge(&mut self, other: BatchResult) {
        self.successful += other.successful;
        self.parse_failed += other.parse_failed;
        self.export_failed += other.export_failed;
        self.documents.extend(other.documents);
        self.failed_records.extend(other.failed_records);
        self.failed_documents.extend(other.failed_documents);
    }
}

/// Bounded pool converting records on blocking workers
pub struct BatchProcessor {
    parser: Arc<dyn AtfParser>,
    context: Arc<ConversionContext>,
    workers: usize,
}

impl BatchProcessor {
    /// Creates a processor running at most `workers` conversions at once
    pub fn new(parser: Arc<dyn AtfParser>, context: ConversionContext, workers: usize) -> Self {
        Self {
            parser,
            context: Arc::new(context),
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Converts all records, collecting outcomes in completion order
    ///
    /// # Errors
    ///
    /// Returns the first fatal error. After a fatal error no further records
    /// are submitted and the records already in flight are drained.
    pub async fn process<I>(&self, records: I) -> Result<BatchResult>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut records = records.into_iter();
        let mut tasks = JoinSet::new();
        let mut result = BatchResult::new();
        let mut fatal: Option<Atf2CtsError> = None;

        loop {
            while fatal.is_none() && tasks.len() < self.workers {
                let Some(record) = records.next() else {
                    break;
                };
                let parser = Arc::clone(&self.parser);
                let context = Arc::clone(&self.context);
                tasks.spawn_blocking(move || {
                    let header = record.header().to_string();
                    let outcome = convert_record(record, parser.as_ref(), &context);
                    (header, outcome)
                });
            }

            match tasks.join_next().await {
                None => break,
                Some(Ok((header, Ok(outcome)))) => result.record(header, outcome),
                Some(Ok((header, Err(e)))) => {
                    crate::log_error_with_context!(&e, format!("writing {}", header));
                    fatal.get_or_insert(e);
                }
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Conversion task failed");
                    fatal.get_or_insert(Atf2CtsError::Other(format!(
                        "Conversion task failed: {}",
                        e
                    )));
                }
            }
        }

        match fatal {
            Some(e) => Err(e),
            None => Ok(result),
        }
    }
}
