//! Reconciling caller-supplied address fields with a resolved address.

use std::fmt;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use profile_registry_core::StateCode;

use super::viacep::ResolvedAddress;

/// One field where the caller and the resolver disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMismatch {
    pub field: &'static str,
    pub provided: String,
    pub resolved: String,
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} \"{}\" differs from \"{}\"",
            self.field, self.provided, self.resolved
        )
    }
}

/// The caller's city or state contradicts the postal code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("provided address does not match zip code: {}", join_mismatches(.mismatches))]
pub struct AddressMismatch {
    pub mismatches: Vec<FieldMismatch>,
}

fn join_mismatches(mismatches: &[FieldMismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Lowercase, trim and strip diacritics, so `" São Paulo"` folds to `"sao paulo"`.
#[must_use]
pub fn fold_diacritics(s: &str) -> String {
    s.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Check the caller's city and state against the resolved address.
///
/// Absent caller values always match. An empty resolved value has nothing to
/// contradict, so it matches too and the caller's value is kept later by
/// [`merge_field`].
///
/// # Errors
///
/// Returns [`AddressMismatch`] listing every field that differs.
pub fn reconcile(
    provided_city: Option<&str>,
    provided_state: Option<&StateCode>,
    resolved: &ResolvedAddress,
) -> Result<(), AddressMismatch> {
    let mut mismatches = Vec::new();

    if let Some(city) = provided_city
        && !resolved.city.trim().is_empty()
        && fold_diacritics(city) != fold_diacritics(&resolved.city)
    {
        mismatches.push(FieldMismatch {
            field: "city",
            provided: city.trim().to_string(),
            resolved: resolved.city.trim().to_string(),
        });
    }

    if let Some(state) = provided_state
        && !resolved.state.trim().is_empty()
        && !state.matches(&resolved.state)
    {
        mismatches.push(FieldMismatch {
            field: "state",
            provided: state.to_string(),
            resolved: resolved.state.trim().to_string(),
        });
    }

    if mismatches.is_empty() {
        Ok(())
    } else {
        Err(AddressMismatch { mismatches })
    }
}

/// Prefer the resolved value, then the caller's, then empty. Both are trimmed.
#[must_use]
pub fn merge_field(resolved: &str, provided: Option<&str>) -> String {
    let resolved = resolved.trim();
    if !resolved.is_empty() {
        return resolved.to_string();
    }
    provided.map(str::trim).unwrap_or_default().to_string()
}
