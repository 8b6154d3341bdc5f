//! Profile creation.
//!
//! [`ProfileService::create_profile`] runs the whole pipeline for one
//! request: identifier checks, postal lookup, reconciliation, the atomic
//! write, and mapping to the public shape.

use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;

use profile_registry_core::{Cnpj, Cpf, DocumentError};

use super::address::{self, AddressMismatch};
use super::viacep::{AddressResolver, LookupError};
use crate::db::{ProfileStore, RepositoryError, conflict_message};
use crate::models::{NewAddress, NewProfile, ProfileResponse};
use crate::validation::ValidatedProfile;

/// Errors that can occur while creating a profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Neither a CPF nor a CNPJ was supplied.
    #[error("missing CPF or CNPJ")]
    MissingDocument,

    /// An identifier failed its checksum.
    #[error(transparent)]
    InvalidDocument(#[from] DocumentError),

    /// The postal lookup failed or did not know the code.
    #[error("error fetching address from ViaCEP: {0}")]
    AddressLookup(#[from] LookupError),

    /// The caller's city or state contradicts the postal code.
    #[error(transparent)]
    AddressMismatch(#[from] AddressMismatch),

    /// A unique field is already registered.
    #[error("{}", conflict_message(.0))]
    Conflict(Vec<String>),

    /// The store failed for any reason other than a conflict.
    #[error("profile not created: {0}")]
    Store(#[source] sqlx::Error),

    /// Anything else.
    #[error("failed to create profile: {0}")]
    Service(String),
}

impl ProfileError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingDocument
            | Self::InvalidDocument(_)
            | Self::AddressLookup(_)
            | Self::AddressMismatch(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Store(_) | Self::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable code naming the step that failed.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingDocument | Self::InvalidDocument(_) | Self::Service(_) => {
                "profile-service.createProfile"
            }
            Self::AddressLookup(_) => "create-profile.getAddress",
            Self::AddressMismatch(_) => "create-profile.addressMismatch",
            Self::Conflict(_) | Self::Store(_) => "profile-repository.createProfile",
        }
    }
}

impl From<RepositoryError> for ProfileError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(fields) => Self::Conflict(fields),
            RepositoryError::Database(e) => Self::Store(e),
            RepositoryError::DataCorruption(msg) => {
                Self::Service(format!("data corruption: {msg}"))
            }
        }
    }
}

/// Creates profiles.
#[derive(Clone)]
pub struct ProfileService {
    resolver: Arc<dyn AddressResolver>,
    store: Arc<dyn ProfileStore>,
}

impl ProfileService {
    /// Create a new profile service.
    #[must_use]
    pub fn new(resolver: Arc<dyn AddressResolver>, store: Arc<dyn ProfileStore>) -> Self {
        Self { resolver, store }
    }

    /// Register a profile and its address.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileError`] naming the step that failed. Nothing is
    /// written unless every check before the store passes.
    #[tracing::instrument(skip_all, fields(zip_code = %input.zip_code))]
    pub async fn create_profile(
        &self,
        input: ValidatedProfile,
    ) -> Result<ProfileResponse, ProfileError> {
        let result = self.run(input).await;

        match &result {
            Ok(profile) => tracing::info!(profile_id = %profile.id, "profile created"),
            // AppError reports server errors to Sentry; keep this a breadcrumb
            Err(e) if e.status().is_server_error() => {
                tracing::debug!(error = %e, code = e.code(), "profile creation failed");
            }
            Err(e) => tracing::warn!(error = %e, code = e.code(), "profile rejected"),
        }

        result
    }

    async fn run(&self, input: ValidatedProfile) -> Result<ProfileResponse, ProfileError> {
        let (cpf, cnpj) = check_documents(input.cpf.as_deref(), input.cnpj.as_deref())?;

        let resolved = self.resolver.resolve(&input.zip_code).await?;
        address::reconcile(Some(&input.city), Some(&input.state), &resolved)?;

        let record = NewProfile {
            cpf,
            cnpj,
            name: input.name,
            cellphone: input.cellphone,
            phone: input.phone,
            email: input.email,
            address: NewAddress {
                zip_code: input.zip_code,
                street: address::merge_field(&resolved.street, Some(&input.street)),
                number: input.number,
                complement: input.complement,
                neighborhood: address::merge_field(
                    &resolved.neighborhood,
                    Some(&input.neighborhood),
                ),
                city: address::merge_field(&resolved.city, Some(&input.city)),
                state: address::merge_field(&resolved.state, Some(input.state.as_str())),
            },
        };

        let stored = self.store.create_profile(record).await?;
        Ok(stored.into())
    }
}

/// Require at least one identifier and check every one supplied.
///
/// # Errors
///
/// Returns `MissingDocument` when both are absent, otherwise the first
/// checksum failure (CPF before CNPJ).
pub fn check_documents(
    cpf: Option<&str>,
    cnpj: Option<&str>,
) -> Result<(Option<Cpf>, Option<Cnpj>), ProfileError> {
    if cpf.is_none() && cnpj.is_none() {
        return Err(ProfileError::MissingDocument);
    }
    let cpf = cpf.map(Cpf::parse).transpose()?;
    let cnpj = cnpj.map(Cnpj::parse).transpose()?;
    Ok((cpf, cnpj))
}
