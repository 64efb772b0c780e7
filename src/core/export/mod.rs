//! Export orchestration and batch processing
//!
//! This module provides the conversion pipeline after parsing:
//! - Metadata extraction and well-formedness check of rendered TEI
//! - CTS catalog descriptors and the on-disk layout
//! - Batch processing on a bounded worker pool
//! - Run coordination and reporting

pub mod batch;
pub mod coordinator;
pub mod cts;
pub mod metadata;
pub mod summary;
pub mod writer;

pub use batch::{
    convert_record, BatchProcessor, BatchResult, ConversionContext, DocumentFailure, RecordFailure,
};
pub use coordinator::ConversionCoordinator;
pub use cts::{TextGroupDescriptor, WorkDescriptor, CTS_NAMESPACE, DESCRIPTOR_FILE};
pub use metadata::extract_metadata;
pub use summary::{ConversionSummary, FileSummary};
pub use writer::{write_atomic, DocumentLocation, OutputWriter};
