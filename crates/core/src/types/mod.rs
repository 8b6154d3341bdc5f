//! Core types for Profile Registry.
//!
//! This module provides type-safe wrappers for Brazilian registration data.

pub mod document;
pub mod email;
pub mod id;
pub mod phone;
pub mod postal;

pub use document::{
    CNPJ_LENGTH, CPF_LENGTH, Cnpj, Cpf, DocumentError, is_valid_cnpj, is_valid_cpf,
    strip_non_digits,
};
pub use email::{Email, EmailError};
pub use id::*;
pub use phone::{Cellphone, Landline, PhoneError};
pub use postal::{PostalError, StateCode, ZipCode};
