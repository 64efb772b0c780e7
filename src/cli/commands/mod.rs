//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod convert;
pub mod init;
pub mod validate;

/// Process exit codes shared by all commands
pub mod exit_code {
    /// Every record converted
    pub const SUCCESS: i32 = 0;
    /// Some records failed to parse or export
    pub const RECORD_FAILURES: i32 = 1;
    /// Invalid or unreadable configuration
    pub const CONFIGURATION: i32 = 2;
    /// Filesystem error or unreadable input
    pub const FATAL: i32 = 5;
}
