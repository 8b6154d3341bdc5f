//! Profile Registry Core - Shared types library.
//!
//! This crate provides the domain types used across all Profile Registry components:
//! - `api` - HTTP service that registers person and company profiles
//! - `cli` - Command-line tools for migrations and offline document checks
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - CPF/CNPJ checksums, contact and postal newtypes, type-safe IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
