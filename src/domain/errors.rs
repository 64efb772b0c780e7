//! Domain error types
//!
//! This module defines the error hierarchy for atf2cts. Per-record failures
//! ([`ParseError`], [`RenderError`], [`ExportError`]) are recovered at the record
//! boundary by the batch converter; [`Atf2CtsError`] is the run-level error type.

use thiserror::Error;

/// Main atf2cts error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum Atf2CtsError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Filesystem errors; fatal to a conversion run
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl Atf2CtsError {
    /// Builds an I/O error that names the path it happened on
    pub fn io_at(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Atf2CtsError::Io(format!("{}: {}", path.display(), err))
    }
}

/// ATF parse errors
///
/// Raised by an [`AtfParser`](crate::adapters::atf::AtfParser) when a record's
/// raw text does not follow the supported grammar. Line numbers are 1-based and
/// relative to the start of the record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The record is empty or does not begin with a `&` text header
    #[error("Missing text header (&<code> = <description>)")]
    MissingHeader,

    /// The `&` line is not of the form `&<code> = <description>`
    #[error("Malformed text header at line {line}: {text}")]
    MalformedHeader { line: usize, text: String },

    /// A second `&` header inside the same record
    #[error("Duplicate text header at line {line}")]
    DuplicateHeader { line: usize },

    /// An `@` directive outside the supported set
    #[error("Unknown directive at line {line}: @{directive}")]
    UnknownDirective { line: usize, directive: String },

    /// A line matching none of the grammar rules
    #[error("Unrecognized line {line}: {text}")]
    UnrecognizedLine { line: usize, text: String },

    /// A `#note:`, `#tr.` or `#lem:` attachment with no preceding text line
    #[error("Note without a preceding text line at line {line}")]
    OrphanNote { line: usize },

    /// An indented continuation with no preceding text line
    #[error("Continuation without a preceding text line at line {line}")]
    OrphanContinuation { line: usize },

    /// `@translation` without a language code
    #[error("Translation block without a language at line {line}")]
    TranslationWithoutLanguage { line: usize },
}

/// TEI rendering errors
///
/// The parse tree was valid ATF but violates an assumption the renderer
/// makes about it. No partial output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The document has no identifier to build a URN from
    #[error("Document code is empty")]
    MissingCode,

    /// The document identifier cannot be used in a URN or file name
    #[error("Document code '{0}' contains characters not allowed in a CTS URN")]
    InvalidCode(String),

    /// The declared language is not a plain language tag
    #[error("Document language '{0}' is not a valid language tag")]
    InvalidLanguage(String),

    /// The textgroup and document code do not form a CTS URN
    #[error("Invalid document URN: {0}")]
    InvalidUrn(String),
}

/// Export errors
///
/// Raised when a rendered document fails re-parsing or metadata extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The rendered string is not well-formed XML
    #[error("Rendered document is not well-formed XML: {0}")]
    MalformedXml(String),

    /// The rendered document does not have exactly one `<text>` element
    #[error("Expected exactly one <text> element, found {0}")]
    TextElementCount(usize),

    /// A required attribute is missing from the `<text>` element
    #[error("Missing attribute '{0}' on <text>")]
    MissingAttribute(&'static str),

    /// The URN on `<text>` is not a CTS URN
    #[error("Invalid CTS URN: {0}")]
    InvalidUrn(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for Atf2CtsError {
    fn from(err: std::io::Error) -> Self {
        Atf2CtsError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for Atf2CtsError {
    fn from(err: serde_json::Error) -> Self {
        Atf2CtsError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for Atf2CtsError {
    fn from(err: toml::de::Error) -> Self {
        Atf2CtsError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from quick-xml writer errors
impl From<quick_xml::Error> for Atf2CtsError {
    fn from(err: quick_xml::Error) -> Self {
        Atf2CtsError::Serialization(format!("XML write error: {err}"))
    }
}
