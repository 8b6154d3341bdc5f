//! Brazilian telephone numbers.
//!
//! Both kinds are stored as bare digits: a two-digit area code (DDD) followed
//! by the subscriber number.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::document::strip_non_digits;

/// Errors that can occur when parsing a phone number.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// Not an 11-digit mobile number with a 9 after the area code.
    #[error("Cellphone must be a valid Brazilian cellphone (11 digits: DD9XXXXXXXX)")]
    InvalidCellphone,
    /// Not a 10-digit landline whose first subscriber digit is 2-5.
    #[error("Phone must be a valid Brazilian landline (10 digits: DDXXXXXXXX)")]
    InvalidLandline,
}

/// A mobile number: `DD9XXXXXXXX`.
///
/// ```
/// use profile_registry_core::Cellphone;
///
/// assert_eq!(Cellphone::parse("(11) 98765-4321").unwrap().as_str(), "11987654321");
/// assert!(Cellphone::parse("1187654321").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Cellphone(String);

impl Cellphone {
    /// Number of digits in a mobile number.
    pub const LENGTH: usize = 11;

    /// Parse a mobile number, ignoring punctuation.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::InvalidCellphone`] if the digits do not match `DD9XXXXXXXX`.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let digits = strip_non_digits(s);
        if digits.len() == Self::LENGTH && digits.chars().nth(2) == Some('9') {
            Ok(Self(digits))
        } else {
            Err(PhoneError::InvalidCellphone)
        }
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Cellphone` and returns its digits.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Cellphone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed-line number: `DD` + a digit from 2 to 5 + seven digits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Landline(String);

impl Landline {
    /// Number of digits in a landline number.
    pub const LENGTH: usize = 10;

    /// Parse a landline number, ignoring punctuation.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::InvalidLandline`] if the digits do not match `DD[2-5]XXXXXXX`.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let digits = strip_non_digits(s);
        let valid_prefix = matches!(digits.chars().nth(2), Some('2'..='5'));
        if digits.len() == Self::LENGTH && valid_prefix {
            Ok(Self(digits))
        } else {
            Err(PhoneError::InvalidLandline)
        }
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Landline` and returns its digits.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Landline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
