// atf2cts - ATF to TEI/CTS converter
// Copyright (c) 2025 atf2cts Contributors
// Licensed under the MIT License

//! # atf2cts - ATF to TEI/CTS converter
//!
//! atf2cts converts cuneiform transliterations in the ATF format into
//! TEI-XML documents laid out in a Canonical Text Services (CTS) directory
//! tree, ready to be served by a CTS-aware text server.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Segmenting** a multi-record ATF file into one record per `&` header
//! - **Parsing** each record into an object/surface/line tree
//! - **Rendering** the tree as TEI with a normalized edition and a translation
//! - **Writing** the TEI and its `__cts__.xml` catalog files atomically
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (segment, transform, export)
//! - [`adapters`] - ATF parsing behind the [`adapters::atf::AtfParser`] trait
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use atf2cts::config::load_config;
//! use atf2cts::core::export::ConversionCoordinator;
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("atf2cts.toml")?;
//!
//!     let coordinator = ConversionCoordinator::new(config);
//!     let summary = coordinator.execute(&[PathBuf::from("cdli.atf")]).await?;
//!
//!     println!("Converted {} records", summary.successful);
//!     Ok(())
//! }
//! ```
//!
//! ## Rendering a single record
//!
//! ```rust
//! use atf2cts::adapters::atf::parse_atf;
//! use atf2cts::core::transform::{render_document, RenderOptions};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let document = parse_atf("&P100001 = Example\n#atf: lang akk\n1. a-na _{d}utu_\n")?;
//! let xml = render_document(&document, &RenderOptions::default())?;
//! assert!(xml.contains("urn:cts:cdli:test.P100001"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Per-record problems are reported as [`domain::ParseError`],
//! [`domain::RenderError`] or [`domain::ExportError`] and counted; only
//! [`domain::Atf2CtsError`] aborts a run.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
