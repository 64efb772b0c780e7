//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - JSON-formatted log files
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use atf2cts::logging::init_logging;
//! use atf2cts::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an ATF record
///
/// # Example
///
/// ```no_run
/// use atf2cts::log_record_start;
///
/// log_record_start!("&P100001 = Letter");
/// ```
#[macro_export]
macro_rules! log_record_start {
    ($header:expr) => {
        tracing::debug!(header = %$header, "New ATF record");
    };
}

/// Log the completion of a conversion run
///
/// # Example
///
/// ```no_run
/// use atf2cts::log_conversion_complete;
/// use std::time::Duration;
///
/// log_conversion_complete!(40, 1, 1, Duration::from_secs(3));
/// ```
#[macro_export]
macro_rules! log_conversion_complete {
    ($successful:expr, $parse_failed:expr, $export_failed:expr, $duration:expr) => {
        tracing::info!(
            successful = $successful,
            parse_failed = $parse_failed,
            export_failed = $export_failed,
            duration_ms = $duration.as_millis(),
            "Conversion completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use atf2cts::log_error_with_context;
/// use atf2cts::domain::Atf2CtsError;
///
/// let error = Atf2CtsError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::Atf2CtsError;
    use std::time::Duration;

    #[test]
    fn test_macros_expand_without_subscriber() {
        crate::log_record_start!("&P1 = x");
        crate::log_conversion_complete!(1usize, 0usize, 0usize, Duration::from_millis(5));
        let error = Atf2CtsError::Other("boom".to_string());
        crate::log_error_with_context!(&error, "while testing");
    }
}
