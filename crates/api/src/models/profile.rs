//! Profile domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use profile_registry_core::{
    AddressId, Cellphone, Cnpj, Cpf, Email, Landline, ProfileId, ZipCode,
};

/// A profile ready to be written, address fields already reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    /// Individual taxpayer number, if this is a person.
    pub cpf: Option<Cpf>,
    /// Company taxpayer number, if this is a company.
    pub cnpj: Option<Cnpj>,
    /// Display name.
    pub name: String,
    /// Mobile number.
    pub cellphone: Cellphone,
    /// Fixed-line number.
    pub phone: Option<Landline>,
    /// Normalized email address.
    pub email: Email,
    /// The address created together with the profile.
    pub address: NewAddress,
}

/// An address ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub zip_code: ZipCode,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// A persisted profile with its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredProfile {
    pub id: ProfileId,
    pub cpf: Option<Cpf>,
    pub cnpj: Option<Cnpj>,
    pub name: String,
    pub cellphone: Cellphone,
    pub phone: Option<Landline>,
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub address: StoredAddress,
}

/// A persisted address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAddress {
    pub id: AddressId,
    /// Owning profile.
    pub profile_id: ProfileId,
    pub zip_code: ZipCode,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public representation of a created profile.
///
/// Absent identifiers serialize as `null` rather than being omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub cnpj: Option<String>,
    pub cpf: Option<String>,
    pub name: String,
    pub cellphone: String,
    pub phone: Option<String>,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
    pub address: AddressResponse,
}

/// Public representation of a profile's address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: String,
    pub profile_id: String,
    pub zipcode: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub created_at: String,
    pub updated_at: String,
}

/// `2026-01-05T14:03:07.120Z`
fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<StoredProfile> for ProfileResponse {
    fn from(profile: StoredProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            cnpj: profile.cnpj.map(Cnpj::into_inner),
            cpf: profile.cpf.map(Cpf::into_inner),
            name: profile.name,
            cellphone: profile.cellphone.into_inner(),
            phone: profile.phone.map(Landline::into_inner),
            email: profile.email.into_inner(),
            created_at: iso_timestamp(profile.created_at),
            updated_at: iso_timestamp(profile.updated_at),
            address: profile.address.into(),
        }
    }
}

impl From<StoredAddress> for AddressResponse {
    fn from(address: StoredAddress) -> Self {
        Self {
            id: address.id.to_string(),
            profile_id: address.profile_id.to_string(),
            zipcode: address.zip_code.into_inner(),
            street: address.street,
            number: address.number,
            complement: address.complement,
            neighborhood: address.neighborhood,
            city: address.city,
            state: address.state,
            created_at: iso_timestamp(address.created_at),
            updated_at: iso_timestamp(address.updated_at),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn stored_profile() -> StoredProfile {
        let created_at = Utc.with_ymd_and_hms(2026, 1, 5, 14, 3, 7).unwrap();
        let profile_id = ProfileId::new(uuid::Uuid::nil());
        StoredProfile {
            id: profile_id,
            cpf: Some(Cpf::parse("52998224725").unwrap()),
            cnpj: None,
            name: "Maria Silva".to_string(),
            cellphone: Cellphone::parse("11987654321").unwrap(),
            phone: None,
            email: Email::parse("maria@example.com").unwrap(),
            created_at,
            updated_at: created_at,
            address: StoredAddress {
                id: AddressId::new(uuid::Uuid::from_u128(1)),
                profile_id,
                zip_code: ZipCode::parse("01310100").unwrap(),
                street: "Avenida Paulista".to_string(),
                number: "1000".to_string(),
                complement: None,
                neighborhood: "Bela Vista".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
                created_at,
                updated_at: created_at,
            },
        }
    }

    #[test]
    fn test_response_shape() {
        let response = ProfileResponse::from(stored_profile());
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["cpf"], "52998224725");
        assert!(json["cnpj"].is_null());
        assert!(json["phone"].is_null());
        assert_eq!(json["createdAt"], "2026-01-05T14:03:07.000Z");
        assert_eq!(json["address"]["zipcode"], "01310100");
        assert_eq!(
            json["address"]["profileId"],
            "00000000-0000-0000-0000-000000000000"
        );
        assert!(json["address"]["complement"].is_null());
        assert_eq!(json["address"]["city"], "São Paulo");
    }

    #[test]
    fn test_response_keeps_null_keys() {
        let json = serde_json::to_string(&ProfileResponse::from(stored_profile())).unwrap();
        assert!(json.contains("\"cnpj\":null"));
        assert!(json.contains("\"phone\":null"));
    }
}
