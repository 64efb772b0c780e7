//! Core conversion logic for atf2cts.
//!
//! # Modules
//!
//! - [`segment`] - Splitting ATF exports into records
//! - [`transform`] - Normalization and TEI rendering
//! - [`export`] - Metadata checks, CTS output and batch coordination
//!
//! # Conversion Workflow
//!
//! 1. **Segment**: Split each input file into records at `&` header lines
//! 2. **Parse**: Build an ATF tree for each record
//! 3. **Render**: Produce a TEI document (edition, translations)
//! 4. **Check**: Re-parse the XML and extract URN, language and title
//! 5. **Write**: Place the document and its `__cts__.xml` in the CTS layout
//! 6. **Report**: Summarize successes and failures
//!
//! # Example
//!
//! ```rust,no_run
//! use atf2cts::config::Atf2CtsConfig;
//! use atf2cts::core::export::ConversionCoordinator;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let coordinator = ConversionCoordinator::new(Atf2CtsConfig::default());
//! let summary = coordinator.execute(&[PathBuf::from("cdli.atf")]).await?;
//!
//! println!("Successful: {}", summary.successful);
//! println!("Parse failures: {}", summary.parse_failed);
//! println!("Export failures: {}", summary.export_failed);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod segment;
pub mod transform;
