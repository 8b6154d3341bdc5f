//! Postal code (CEP) and federative unit (UF) types.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::document::strip_non_digits;

/// Errors that can occur when parsing postal data.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PostalError {
    /// The CEP does not have 8 digits.
    #[error("CEP must be a valid postal code")]
    InvalidZipCode,
    /// The state is not two letters.
    #[error("State must have 2 characters (e.g., SP, RJ)")]
    InvalidState,
}

/// An 8-digit Brazilian postal code (CEP).
///
/// ```
/// use profile_registry_core::ZipCode;
///
/// assert_eq!(ZipCode::parse("01310-100").unwrap().as_str(), "01310100");
/// assert!(ZipCode::parse("1310-100").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ZipCode(String);

impl ZipCode {
    /// Number of digits in a CEP.
    pub const LENGTH: usize = 8;

    /// Parse a CEP, ignoring punctuation.
    ///
    /// # Errors
    ///
    /// Returns [`PostalError::InvalidZipCode`] unless exactly 8 digits remain.
    pub fn parse(s: &str) -> Result<Self, PostalError> {
        let digits = strip_non_digits(s);
        if digits.len() == Self::LENGTH {
            Ok(Self(digits))
        } else {
            Err(PostalError::InvalidZipCode)
        }
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ZipCode` and returns its digits.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A two-letter state abbreviation, kept as the caller wrote it (trimmed).
///
/// Comparison against a resolved address is case-insensitive; see
/// [`StateCode::matches`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct StateCode(String);

impl StateCode {
    /// Parse a state abbreviation.
    ///
    /// # Errors
    ///
    /// Returns [`PostalError::InvalidState`] unless the trimmed input is two ASCII letters.
    pub fn parse(s: &str) -> Result<Self, PostalError> {
        let trimmed = s.trim();
        if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(PostalError::InvalidState)
        }
    }

    /// Returns the abbreviation as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison with another (trimmed) abbreviation.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
