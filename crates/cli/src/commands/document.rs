//! Offline CPF/CNPJ checks.
//!
//! # Usage
//!
//! ```bash
//! pr-cli document check 529.982.247-25
//! pr-cli document check 11222333000181
//! ```

use std::fmt;

use profile_registry_core::{
    CNPJ_LENGTH, CPF_LENGTH, Cnpj, Cpf, DocumentError, strip_non_digits,
};
use thiserror::Error;

/// A value that is not a valid CPF or CNPJ.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Right length, wrong check digits.
    #[error(transparent)]
    Invalid(#[from] DocumentError),

    /// Neither 11 nor 14 digits.
    #[error("expected 11 (CPF) or 14 (CNPJ) digits, got {0}")]
    WrongLength(usize),
}

/// A recognized identifier.
#[derive(Debug, PartialEq, Eq)]
pub enum Document {
    Cpf(Cpf),
    Cnpj(Cnpj),
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpf(cpf) => write!(f, "valid CPF {}", cpf.formatted()),
            Self::Cnpj(cnpj) => write!(f, "valid CNPJ {}", cnpj.formatted()),
        }
    }
}

/// Classify `value` by digit count and verify its check digits.
///
/// # Errors
///
/// Returns [`CheckError`] if the value is neither a valid CPF nor a valid CNPJ.
pub fn check(value: &str) -> Result<Document, CheckError> {
    let digits = strip_non_digits(value);
    match digits.len() {
        CPF_LENGTH => Ok(Document::Cpf(Cpf::parse(&digits)?)),
        CNPJ_LENGTH => Ok(Document::Cnpj(Cnpj::parse(&digits)?)),
        len => Err(CheckError::WrongLength(len)),
    }
}

/// Print the result of [`check`].
///
/// # Errors
///
/// Returns [`CheckError`] if the value is invalid.
pub fn run(value: &str) -> Result<(), CheckError> {
    let document = check(value)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{document}");
    }
    Ok(())
}
