//! Structural validation of profile creation requests.
//!
//! [`ProfileInput`] is what arrives over the wire; every field is optional so
//! that a missing field is reported here, alongside every other problem,
//! rather than by the JSON extractor. [`ProfileInput::validate`] either
//! returns a [`ValidatedProfile`] or all failures in field order. Keys the
//! request does not define are failures too.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use profile_registry_core::{
    CNPJ_LENGTH, CPF_LENGTH, Cellphone, Email, Landline, StateCode, ZipCode, strip_non_digits,
};

/// A single field failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire name of the field.
    pub field: Cow<'static, str>,
    pub message: Cow<'static, str>,
}

/// Every failure found in a request, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_ref()).collect();
        f.write_str(&messages.join(", "))
    }
}

impl ValidationErrors {
    /// Whether `field` has at least one failure.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Profile creation request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub cnpj: Option<String>,
    pub cpf: Option<String>,
    pub name: Option<String>,
    pub cellphone: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub email_confirmation: Option<String>,
    pub zip_code: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub state: Option<String>,
    /// Every key the request does not define, rejected by [`ProfileInput::validate`].
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

/// A structurally valid request.
///
/// Identifiers are digit strings of the right length; their checksums are
/// checked later. The email confirmation has served its purpose and is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProfile {
    pub cnpj: Option<String>,
    pub cpf: Option<String>,
    pub name: String,
    pub cellphone: Cellphone,
    pub phone: Option<Landline>,
    pub email: Email,
    pub zip_code: ZipCode,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub city: String,
    pub neighborhood: String,
    pub state: StateCode,
}

/// Collects failures while walking the fields.
#[derive(Default)]
struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    fn push(
        &mut self,
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// A required text field: present and not blank.
    fn required(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        message: &'static str,
    ) -> Option<String> {
        match present(value) {
            Some(v) => Some(v.to_string()),
            None => {
                self.push(field, message);
                None
            }
        }
    }

    /// An optional identifier: absent, or exactly `len` digits once punctuation is gone.
    fn digits(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        len: usize,
        message: &'static str,
    ) -> Option<String> {
        let value = present(value)?;
        let digits = strip_non_digits(value);
        if digits.len() == len {
            Some(digits)
        } else {
            self.push(field, message);
            None
        }
    }

    fn email(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        missing: &'static str,
        invalid: &'static str,
    ) -> Option<Email> {
        let Some(value) = present(value) else {
            self.push(field, missing);
            return None;
        };
        Email::parse(value)
            .map_err(|_| self.push(field, invalid))
            .ok()
    }
}

/// Trimmed value, or `None` when absent or blank.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl ProfileInput {
    /// Validate every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] with one entry per failed rule.
    pub fn validate(self) -> Result<ValidatedProfile, ValidationErrors> {
        let mut c = Collector::default();

        for key in self.unknown.keys() {
            c.push(key.clone(), format!("property {key} should not exist"));
        }

        let cnpj = c.digits(
            "cnpj",
            self.cnpj.as_deref(),
            CNPJ_LENGTH,
            "CNPJ must have 14 digits",
        );
        let cpf = c.digits(
            "cpf",
            self.cpf.as_deref(),
            CPF_LENGTH,
            "CPF must have 11 digits",
        );

        let name = c.required("name", self.name.as_deref(), "Name is required");

        let cellphone = match present(self.cellphone.as_deref()) {
            None => {
                c.push("cellphone", "Cellphone is required");
                None
            }
            Some(raw) => Cellphone::parse(raw)
                .map_err(|_| {
                    c.push(
                        "cellphone",
                        "Cellphone must be a valid Brazilian cellphone (11 digits: DD9XXXXXXXX)",
                    );
                })
                .ok(),
        };

        let phone = match present(self.phone.as_deref()) {
            None => None,
            Some(raw) => match Landline::parse(raw) {
                Ok(phone) => Some(phone),
                Err(_) => {
                    c.push(
                        "phone",
                        "Phone must be a valid Brazilian landline (10 digits: DDXXXXXXXX)",
                    );
                    None
                }
            },
        };

        let email = c.email(
            "email",
            self.email.as_deref(),
            "Email is required",
            "Email must be valid",
        );
        let confirmation = c.email(
            "emailConfirmation",
            self.email_confirmation.as_deref(),
            "Email confirmation is required",
            "Email confirmation must be valid",
        );
        if let (Some(email), Some(confirmation)) = (&email, &confirmation)
            && email != confirmation
        {
            c.push(
                "emailConfirmation",
                "emailConfirmation must match email field.",
            );
        }

        let zip_code = match present(self.zip_code.as_deref()) {
            None => {
                c.push("zipCode", "CEP is required");
                None
            }
            Some(raw) => ZipCode::parse(raw)
                .map_err(|_| c.push("zipCode", "CEP must be a valid postal code"))
                .ok(),
        };

        let street = c.required(
            "street",
            self.street.as_deref(),
            "Street (logradouro) is required",
        );
        let number = c.required("number", self.number.as_deref(), "Number is required");
        let complement = present(self.complement.as_deref()).map(str::to_string);
        let city = c.required("city", self.city.as_deref(), "City is required");
        let neighborhood = c.required(
            "neighborhood",
            self.neighborhood.as_deref(),
            "Neighborhood (bairro) is required",
        );

        let state = match present(self.state.as_deref()) {
            None => {
                c.push("state", "State (UF) is required");
                None
            }
            Some(raw) => StateCode::parse(raw)
                .map_err(|_| c.push("state", "State must have 2 characters (e.g., SP, RJ)"))
                .ok(),
        };

        match (
            name,
            cellphone,
            email,
            confirmation,
            zip_code,
            street,
            number,
            city,
            neighborhood,
            state,
        ) {
            (
                Some(name),
                Some(cellphone),
                Some(email),
                Some(_),
                Some(zip_code),
                Some(street),
                Some(number),
                Some(city),
                Some(neighborhood),
                Some(state),
            ) if c.errors.is_empty() => Ok(ValidatedProfile {
                cnpj,
                cpf,
                name,
                cellphone,
                phone,
                email,
                zip_code,
                street,
                number,
                complement,
                city,
                neighborhood,
                state,
            }),
            _ => Err(ValidationErrors { errors: c.errors }),
        }
    }
}
