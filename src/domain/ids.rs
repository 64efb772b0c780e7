//! CTS identifier types with validation
//!
//! This module provides a newtype wrapper for CTS URNs. The URN determines
//! where a converted document lands on disk, so its parts are exposed as
//! typed accessors rather than re-split at every call site.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// CTS URN newtype wrapper
///
/// Format: `urn:cts:<namespace>:<work>` where `<work>` is a dot-separated
/// path such as `test.P123456`.
///
/// # Examples
///
/// ```
/// use atf2cts::domain::ids::CtsUrn;
/// use std::str::FromStr;
///
/// let urn = CtsUrn::from_str("urn:cts:cdli:test.P123456").unwrap();
/// assert_eq!(urn.local_part(), "test.P123456");
/// assert_eq!(urn.work_segment(), "P123456");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CtsUrn(String);

impl CtsUrn {
    /// Creates a new CtsUrn from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(CtsUrn)` if the URN has the `urn:cts:<namespace>:<work>`
    /// shape with non-empty parts, `Err` otherwise
    pub fn new(urn: impl Into<String>) -> Result<Self, String> {
        let urn = urn.into();
        let parts: Vec<&str> = urn.split(':').collect();
        if parts.len() != 4 || parts[0] != "urn" || parts[1] != "cts" {
            return Err(format!(
                "Invalid CTS URN format. Expected urn:cts:<namespace>:<work>, got: {urn}"
            ));
        }
        if parts[2].is_empty() || parts[3].is_empty() {
            return Err(format!("CTS URN has an empty namespace or work: {urn}"));
        }
        if parts[3].split('.').any(str::is_empty) {
            return Err(format!("CTS URN work has an empty segment: {urn}"));
        }
        Ok(Self(urn))
    }

    /// Returns the URN as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }

    /// The part after the last `:` (e.g. `test.P123456`)
    pub fn local_part(&self) -> &str {
        self.0.rsplit(':').next().unwrap_or(&self.0)
    }

    /// The part of the local part after its last `.` (e.g. `P123456`)
    pub fn work_segment(&self) -> &str {
        let local = self.local_part();
        local.rsplit('.').next().unwrap_or(local)
    }

    /// Appends a child segment, e.g. a document code to a textgroup URN
    pub fn child(&self, segment: &str) -> Result<Self, String> {
        Self::new(format!("{}.{}", self.0, segment))
    }
}

impl fmt::Display for CtsUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CtsUrn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CtsUrn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
