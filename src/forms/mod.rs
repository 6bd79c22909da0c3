//! Request payloads accepted by the JSON API.
//!
//! Each form is deserialized by serde, checked with `validator` and then
//! converted into a payload of domain value objects with `TryFrom`.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod activity;
pub mod article;
pub mod chat;
pub mod contact;
pub mod customer;
pub mod deal;
pub mod drive;
pub mod lead;
pub mod pricing;
pub mod quiz;
pub mod task;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid value: {0}")]
    Constraint(TypeConstraintError),

    #[error("invalid {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    #[error("could not read CSV: {0}")]
    Csv(String),

    #[error("upload rejected: {0}")]
    Upload(String),
}

impl FormError {
    pub(crate) fn field(field: &'static str, err: impl std::fmt::Display) -> Self {
        FormError::InvalidField {
            field,
            message: err.to_string(),
        }
    }
}

/// Runs a value-object constructor and tags failures with the field name.
pub(crate) fn parse_field<T, E, F>(field: &'static str, ctor: F) -> Result<T, FormError>
where
    F: FnOnce() -> Result<T, E>,
    E: std::fmt::Display,
{
    ctor().map_err(|err| FormError::field(field, err))
}

/// Blank or missing input becomes `None`, anything else goes through `ctor`.
pub(crate) fn parse_optional<T, F>(
    field: &'static str,
    value: Option<String>,
    ctor: F,
) -> Result<Option<T>, FormError>
where
    F: FnOnce(String) -> Result<T, TypeConstraintError>,
{
    crate::domain::types::optional_text(value, ctor).map_err(|err| FormError::field(field, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::EmailAddress;

    #[test]
    fn blank_optional_values_are_none() {
        let parsed = parse_optional("email", Some("   ".to_string()), EmailAddress::new).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn invalid_optional_values_name_the_field() {
        let err = parse_optional("email", Some("nope".to_string()), EmailAddress::new).unwrap_err();
        assert!(matches!(err, FormError::InvalidField { field: "email", .. }));
    }
}
