//! Business rules behind the HTTP handlers.
//!
//! Services are generic over the repository traits so they can be exercised
//! against [`crate::repository::mock::MockRepository`] in tests.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod activities;
pub mod chat;
pub mod contact;
pub mod customers;
pub mod dashboard;
pub mod deals;
pub mod drive;
pub mod knowledge_base;
pub mod leads;
pub mod pricing;
pub mod quiz;
pub mod tasks;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid value: {0}")]
    TypeConstraint(String),

    #[error("repository error: {0}")]
    Repository(RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConstraintViolation(message) => ServiceError::Conflict(message),
            other => ServiceError::Repository(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::NotFound => "NOT_FOUND",
            ServiceError::Form(_) | ServiceError::TypeConstraint(_) => "VALIDATION_ERROR",
            ServiceError::Conflict(_) => "CONFLICT",
            ServiceError::Repository(_) | ServiceError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message shown to the visitor; internal details stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::NotFound => "Niet gevonden".to_string(),
            ServiceError::Form(details) | ServiceError::TypeConstraint(details) => {
                format!("Ongeldige invoer: {details}")
            }
            ServiceError::Conflict(details) => format!("Conflict: {details}"),
            ServiceError::Repository(_) | ServiceError::Internal(_) => {
                "Er is iets misgegaan, probeer het later opnieuw".to_string()
            }
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Form(_) | ServiceError::TypeConstraint(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Repository(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("Request failed: {self}");
        }
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.public_message(),
            code: self.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_not_found_becomes_404() {
        let err = ServiceError::from(RepositoryError::NotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn constraint_violation_is_a_conflict() {
        let err = ServiceError::from(RepositoryError::ConstraintViolation("unique".into()));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_details_are_hidden() {
        let err = ServiceError::from(RepositoryError::DatabaseError("disk I/O error".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.public_message().contains("disk"));
    }
}
