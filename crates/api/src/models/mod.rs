//! Domain models for the profile service.
//!
//! - [`profile`] - Persistable record, stored record, and public response shape

pub mod profile;

pub use profile::{
    AddressResponse, NewAddress, NewProfile, ProfileResponse, StoredAddress, StoredProfile,
};
