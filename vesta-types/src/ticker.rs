//! Ticker identity used to key price histories.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::VestaError;

/// Normalized ticker symbol (trimmed, lowercased).
///
/// Histories are keyed by this form, so `"GOOG"`, `" goog "` and `"goog"`
/// all refer to the same series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Normalize a raw ticker symbol.
    ///
    /// Symbols double as directory names in file-backed sources, so path
    /// separators, control characters and the names `.` / `..` are refused.
    ///
    /// # Errors
    /// Returns `VestaError::InvalidArg` if the symbol is empty after trimming
    /// or could not be used as a single path component.
    pub fn new(raw: &str) -> Result<Self, VestaError> {
        let norm = raw.trim().to_lowercase();
        if norm.is_empty() {
            return Err(VestaError::InvalidArg("ticker must not be empty".into()));
        }
        let bad_char = |c: char| matches!(c, '/' | '\\') || c.is_control();
        if norm == "." || norm == ".." || norm.chars().any(bad_char) {
            return Err(VestaError::InvalidArg(format!("invalid ticker '{raw}'")));
        }
        Ok(Self(norm))
    }

    /// Returns the normalized symbol.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ticker {
    type Error = VestaError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(&raw)
    }
}

impl From<Ticker> for String {
    fn from(t: Ticker) -> Self {
        t.0
    }
}
