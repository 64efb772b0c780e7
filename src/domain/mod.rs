//! Domain models and types for atf2cts.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`CtsUrn`])
//! - **Records and outcomes** ([`Record`], [`ConversionOutcome`], [`RenderedDocument`])
//! - **Error types** ([`Atf2CtsError`], [`ParseError`], [`RenderError`], [`ExportError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Run-level operations return [`Result<T, Atf2CtsError>`]:
//!
//! ```rust
//! use atf2cts::domain::{Atf2CtsError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = atf2cts::config::Atf2CtsConfig::default();
//!     config.validate().map_err(Atf2CtsError::Configuration)?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{Atf2CtsError, ExportError, ParseError, RenderError};
pub use ids::CtsUrn;
pub use record::{
    ConversionOutcome, DocumentMetadata, ExportFailureKind, Record, RenderedDocument,
    RECORD_MARKER,
};
pub use result::Result;
