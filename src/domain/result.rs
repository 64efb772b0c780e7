//! Result type alias for atf2cts

use super::errors::Atf2CtsError;

/// Result type alias for atf2cts operations
///
/// # Examples
///
/// ```
/// use atf2cts::domain::result::Result;
/// use atf2cts::domain::errors::Atf2CtsError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(Atf2CtsError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Atf2CtsError>;
