//! Profile repository for database operations.
//!
//! The service talks to storage only through [`ProfileStore`]; the
//! `PostgreSQL` adapter lives here as [`PgProfileStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgDatabaseError;

use profile_registry_core::{
    AddressId, Cellphone, Cnpj, Cpf, Email, Landline, ProfileId, ZipCode,
};

use super::RepositoryError;
use crate::models::{NewProfile, StoredAddress, StoredProfile};

/// Storage for profiles and their owned address.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Create a profile and its address in one atomic operation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` naming the clashing columns on a
    /// uniqueness violation, and `RepositoryError::Database` for anything else
    /// the engine reports.
    async fn create_profile(&self, profile: NewProfile) -> Result<StoredProfile, RepositoryError>;
}

/// `PostgreSQL`-backed [`ProfileStore`].
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    /// Create a new profile store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: ProfileId,
    cpf: Option<String>,
    cnpj: Option<String>,
    name: String,
    cellphone: String,
    phone: Option<String>,
    email: Email,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct AddressRow {
    id: AddressId,
    profile_id: ProfileId,
    zipcode: String,
    street: String,
    number: String,
    complement: Option<String>,
    neighborhood: String,
    city: String,
    state: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    #[tracing::instrument(skip_all)]
    async fn create_profile(&self, profile: NewProfile) -> Result<StoredProfile, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let profile_row = sqlx::query_as::<_, ProfileRow>(
            r"
            INSERT INTO profile (cpf, cnpj, name, cellphone, phone, email)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, cpf, cnpj, name, cellphone, phone, email, created_at, updated_at
            ",
        )
        .bind(profile.cpf.as_ref().map(Cpf::as_str))
        .bind(profile.cnpj.as_ref().map(Cnpj::as_str))
        .bind(&profile.name)
        .bind(profile.cellphone.as_str())
        .bind(profile.phone.as_ref().map(Landline::as_str))
        .bind(&profile.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        let address = &profile.address;
        let address_row = sqlx::query_as::<_, AddressRow>(
            r"
            INSERT INTO address (
                profile_id, zipcode, street, number, complement, neighborhood, city, state
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id, profile_id, zipcode, street, number, complement,
                neighborhood, city, state, created_at, updated_at
            ",
        )
        .bind(profile_row.id)
        .bind(address.zip_code.as_str())
        .bind(&address.street)
        .bind(&address.number)
        .bind(address.complement.as_deref())
        .bind(&address.neighborhood)
        .bind(&address.city)
        .bind(&address.state)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        tx.commit().await?;

        tracing::debug!(profile_id = %profile_row.id, "profile row committed");
        into_stored(profile_row, address_row)
    }
}

/// Turn a unique violation into `Conflict`, everything else into `Database`.
fn map_insert_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        let detail = db_err
            .try_downcast_ref::<PgDatabaseError>()
            .and_then(PgDatabaseError::detail);
        return RepositoryError::Conflict(conflicting_fields(detail, db_err.constraint()));
    }
    RepositoryError::Database(e)
}

/// Work out which columns clashed.
///
/// `PostgreSQL` reports unique violations with a detail like
/// `Key (email)=(maria@example.com) already exists.`; composite keys list
/// several columns. Without a detail the constraint name
/// (`profile_email_key`) still identifies a single column.
fn conflicting_fields(detail: Option<&str>, constraint: Option<&str>) -> Vec<String> {
    let from_detail = detail
        .and_then(|d| d.strip_prefix("Key ("))
        .and_then(|d| d.split_once(")=("))
        .map(|(columns, _)| {
            columns
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .filter(|columns| !columns.is_empty());

    if let Some(columns) = from_detail {
        return columns;
    }

    constraint
        .and_then(|name| {
            ["profile_", "address_"]
                .iter()
                .find_map(|table| name.strip_prefix(table))
        })
        .and_then(|rest| rest.strip_suffix("_key"))
        .filter(|column| !column.is_empty())
        .map(|column| vec![column.to_owned()])
        .unwrap_or_default()
}

fn into_stored(profile: ProfileRow, address: AddressRow) -> Result<StoredProfile, RepositoryError> {
    let corrupt = |what: &str, e: &dyn std::fmt::Display| {
        RepositoryError::DataCorruption(format!("invalid {what} in database: {e}"))
    };

    let cpf = profile
        .cpf
        .as_deref()
        .map(Cpf::parse)
        .transpose()
        .map_err(|e| corrupt("cpf", &e))?;
    let cnpj = profile
        .cnpj
        .as_deref()
        .map(Cnpj::parse)
        .transpose()
        .map_err(|e| corrupt("cnpj", &e))?;
    let cellphone = Cellphone::parse(&profile.cellphone).map_err(|e| corrupt("cellphone", &e))?;
    let phone = profile
        .phone
        .as_deref()
        .map(Landline::parse)
        .transpose()
        .map_err(|e| corrupt("phone", &e))?;
    let zip_code = ZipCode::parse(&address.zipcode).map_err(|e| corrupt("zipcode", &e))?;

    Ok(StoredProfile {
        id: profile.id,
        cpf,
        cnpj,
        name: profile.name,
        cellphone,
        phone,
        email: profile.email,
        created_at: profile.created_at,
        updated_at: profile.updated_at,
        address: StoredAddress {
            id: address.id,
            profile_id: address.profile_id,
            zip_code,
            street: address.street,
            number: address.number,
            complement: address.complement,
            neighborhood: address.neighborhood,
            city: address.city,
            state: address.state,
            created_at: address.created_at,
            updated_at: address.updated_at,
        },
    })
}
