//! Brazilian taxpayer identifiers (CPF and CNPJ).
//!
//! Both identifiers end in two check digits computed from the preceding
//! digits. The checks here are total over arbitrary input: anything that is
//! not the right number of ASCII digits is simply invalid.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Number of digits in a CPF.
pub const CPF_LENGTH: usize = 11;

/// Number of digits in a CNPJ.
pub const CNPJ_LENGTH: usize = 14;

/// Weights for the first CNPJ check digit (applied to the 12-digit base).
const CNPJ_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Weights for the second CNPJ check digit (applied to base + first check digit).
const CNPJ_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Errors that can occur when parsing a [`Cpf`] or [`Cnpj`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The CPF has the wrong length or fails its checksum.
    #[error("provided CPF is invalid.")]
    InvalidCpf,
    /// The CNPJ has the wrong length or fails its checksum.
    #[error("provided CNPJ is invalid.")]
    InvalidCnpj,
}

/// Remove every character that is not an ASCII digit.
///
/// ```
/// use profile_registry_core::strip_non_digits;
///
/// assert_eq!(strip_non_digits("529.982.247-25"), "52998224725");
/// assert_eq!(strip_non_digits("(11) 98765-4321"), "11987654321");
/// ```
#[must_use]
pub fn strip_non_digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// Check whether `digits` is a valid CPF.
///
/// The input must be exactly 11 ASCII digits, not all identical, and carry
/// correct check digits. Formatting characters are not accepted; strip them
/// first with [`strip_non_digits`].
///
/// ```
/// use profile_registry_core::is_valid_cpf;
///
/// assert!(is_valid_cpf("52998224725"));
/// assert!(!is_valid_cpf("52998224724"));
/// assert!(!is_valid_cpf("11111111111"));
/// ```
#[must_use]
pub fn is_valid_cpf(digits: &str) -> bool {
    let Some(digits) = parse_digits(digits, CPF_LENGTH) else {
        return false;
    };
    if all_identical(&digits) {
        return false;
    }

    let (base, check) = digits.split_at(CPF_LENGTH - 2);
    let first = cpf_check_digit(base);

    let mut extended = base.to_vec();
    extended.push(first);
    let second = cpf_check_digit(&extended);

    check == [first, second]
}

/// Check whether `digits` is a valid CNPJ.
///
/// The input must be exactly 14 ASCII digits, not all identical, and carry
/// correct check digits.
///
/// ```
/// use profile_registry_core::is_valid_cnpj;
///
/// assert!(is_valid_cnpj("11222333000181"));
/// assert!(!is_valid_cnpj("11222333000182"));
/// assert!(!is_valid_cnpj("00000000000000"));
/// ```
#[must_use]
pub fn is_valid_cnpj(digits: &str) -> bool {
    let Some(digits) = parse_digits(digits, CNPJ_LENGTH) else {
        return false;
    };
    if all_identical(&digits) {
        return false;
    }

    let (base, check) = digits.split_at(CNPJ_LENGTH - 2);
    let first = cnpj_check_digit(base, &CNPJ_FIRST_WEIGHTS);

    let mut extended = base.to_vec();
    extended.push(first);
    let second = cnpj_check_digit(&extended, &CNPJ_SECOND_WEIGHTS);

    check == [first, second]
}

fn parse_digits(s: &str, expected_len: usize) -> Option<Vec<u32>> {
    if s.len() != expected_len {
        return None;
    }
    s.chars().map(|c| c.to_digit(10)).collect()
}

fn all_identical(digits: &[u32]) -> bool {
    digits.iter().all(|d| Some(d) == digits.first())
}

/// Weights run from 2 at the last digit up to `len + 1` at the first.
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let sum: u32 = digits.iter().rev().zip(2_u32..).map(|(d, w)| d * w).sum();
    match (sum * 10) % 11 {
        10 => 0,
        remainder => remainder,
    }
}

fn cnpj_check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        remainder if remainder < 2 => 0,
        remainder => 11 - remainder,
    }
}

/// A checksum-validated CPF (individual taxpayer number), stored as 11 digits.
///
/// ```
/// use profile_registry_core::Cpf;
///
/// let cpf = Cpf::parse("529.982.247-25").unwrap();
/// assert_eq!(cpf.as_str(), "52998224725");
/// assert_eq!(cpf.formatted(), "529.982.247-25");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Cpf(String);

impl Cpf {
    /// Parse a CPF, ignoring punctuation.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidCpf`] if the digits do not form a valid CPF.
    pub fn parse(s: &str) -> Result<Self, DocumentError> {
        let digits = strip_non_digits(s);
        if is_valid_cpf(&digits) {
            Ok(Self(digits))
        } else {
            Err(DocumentError::InvalidCpf)
        }
    }

    /// Returns the 11 digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Cpf` and returns its digits.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Render with the conventional `000.000.000-00` mask.
    #[must_use]
    pub fn formatted(&self) -> String {
        let (a, rest) = self.0.split_at(3);
        let (b, rest) = rest.split_at(3);
        let (c, d) = rest.split_at(3);
        format!("{a}.{b}.{c}-{d}")
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Cpf {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A checksum-validated CNPJ (company taxpayer number), stored as 14 digits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Cnpj(String);

impl Cnpj {
    /// Parse a CNPJ, ignoring punctuation.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidCnpj`] if the digits do not form a valid CNPJ.
    pub fn parse(s: &str) -> Result<Self, DocumentError> {
        let digits = strip_non_digits(s);
        if is_valid_cnpj(&digits) {
            Ok(Self(digits))
        } else {
            Err(DocumentError::InvalidCnpj)
        }
    }

    /// Returns the 14 digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Cnpj` and returns its digits.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Render with the conventional `00.000.000/0000-00` mask.
    #[must_use]
    pub fn formatted(&self) -> String {
        let (a, rest) = self.0.split_at(2);
        let (b, rest) = rest.split_at(3);
        let (c, rest) = rest.split_at(3);
        let (d, e) = rest.split_at(4);
        format!("{a}.{b}.{c}/{d}-{e}")
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Cnpj {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Cnpj {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
