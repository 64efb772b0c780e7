//! ATF parsing adapter
//!
//! The renderer consumes the tree in [`model`]; how that tree is produced is
//! hidden behind [`AtfParser`] so the batch converter can be driven by any
//! parser implementation (and by failing stubs in tests).

pub mod model;
pub mod parser;

pub use model::{
    ArtefactObject, Comment, Line, Note, ParsedDocument, Section, State, Translation,
};
pub use parser::parse_atf;

use crate::domain::ParseError;

/// Parser from raw ATF record text to a [`ParsedDocument`]
///
/// Implementations must be stateless across calls: one instance is shared by
/// every worker of a batch.
pub trait AtfParser: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Parses one record
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the text is not valid ATF.
    fn parse(&self, text: &str) -> Result<ParsedDocument, ParseError>;
}

/// Parser for the CDLI ATF subset understood by [`parse_atf`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CdliAtfParser;

impl AtfParser for CdliAtfParser {
    fn name(&self) -> &str {
        "cdli"
    }

    fn parse(&self, text: &str) -> Result<ParsedDocument, ParseError> {
        parse_atf(text)
    }
}
