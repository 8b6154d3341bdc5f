//! Business logic services.
//!
//! # Services
//!
//! - `viacep` - Postal code lookup client
//! - `address` - Reconciling caller address fields with the lookup result
//! - `profile` - Profile creation pipeline

pub mod address;
pub mod profile;
pub mod viacep;

pub use profile::{ProfileError, ProfileService};
pub use viacep::{AddressResolver, ViaCepClient};
