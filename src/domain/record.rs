//! Records and per-record conversion outcomes

use super::ids::CtsUrn;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Marker that starts every ATF record
pub const RECORD_MARKER: char = '&';

/// One raw ATF record
///
/// Always begins with a line starting with [`RECORD_MARKER`]; produced by the
/// segmentor and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record(String);

impl Record {
    /// Wraps raw record text
    ///
    /// Returns `Err` if the text does not start with the record marker.
    pub fn new(text: impl Into<String>) -> Result<Self, String> {
        let text = text.into();
        if !text.starts_with(RECORD_MARKER) {
            return Err(format!("Record must start with '{RECORD_MARKER}'"));
        }
        Ok(Self(text))
    }

    pub(crate) fn from_segment(text: String) -> Self {
        debug_assert!(text.starts_with(RECORD_MARKER));
        Self(text)
    }

    /// Returns the record text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the record text
    pub fn into_inner(self) -> String {
        self.0
    }

    /// The marker line without its line ending, used in diagnostics
    pub fn header(&self) -> &str {
        self.0.lines().next().unwrap_or_default().trim_end()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Record {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A rendered TEI document with the metadata needed to place it on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Serialized TEI-XML
    pub xml: String,
    /// URN from the `n` attribute of `<text>`
    pub urn: CtsUrn,
    /// Language from the `xml:lang` attribute of `<text>`, if declared
    pub language: Option<String>,
    /// Title from the TEI header
    pub title: String,
}

/// Metadata of a successfully written document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentMetadata {
    /// Work URN
    pub urn: CtsUrn,
    /// Language used in the file name
    pub language: String,
    /// Document title
    pub title: String,
    /// Path of the written TEI file
    pub path: PathBuf,
}

/// Which stage rejected a record that parsed successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFailureKind {
    /// The renderer refused the parse tree
    Render,
    /// The rendered XML failed re-parsing or metadata extraction
    Export,
}

/// Classification of one record's conversion
///
/// Exactly one outcome is produced per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Parsed, rendered and written
    Success(DocumentMetadata),
    /// The ATF parser rejected the record
    ParseFailed {
        /// The record as read from the input file
        record: Record,
        /// Parser message
        error: String,
    },
    /// Rendering or the export check failed
    ExportFailed {
        /// Rendered XML for export failures, record text for render failures
        content: String,
        /// Failing stage
        kind: ExportFailureKind,
        /// Error message
        error: String,
    },
}
