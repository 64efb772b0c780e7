//! External format integrations for atf2cts.
//!
//! - [`atf`] - ATF record parsing into the tree the renderer consumes
//!
//! # Design Pattern
//!
//! Parsing sits behind the [`atf::AtfParser`] trait so the converter can be
//! exercised with stub parsers in tests.
//!
//! ```rust
//! use atf2cts::adapters::atf::{AtfParser, CdliAtfParser};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let document = CdliAtfParser.parse("&P100001 = Example\n1. a\n")?;
//! assert_eq!(document.code, "P100001");
//! # Ok(())
//! # }
//! ```

pub mod atf;
