use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A stored or submitted value broke a domain invariant.
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

fn constraint_label(kind: &DatabaseErrorKind) -> Option<&'static str> {
    match kind {
        DatabaseErrorKind::UniqueViolation => Some("unique"),
        DatabaseErrorKind::ForeignKeyViolation => Some("foreign key"),
        DatabaseErrorKind::NotNullViolation => Some("not null"),
        DatabaseErrorKind::CheckViolation => Some("check"),
        _ => None,
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(kind, info) => match constraint_label(&kind) {
                Some(label) => RepositoryError::ConstraintViolation(format!(
                    "{label} constraint violated: {}",
                    info.message()
                )),
                None => RepositoryError::DatabaseError(info.message().to_string()),
            },
            DieselError::SerializationError(e) | DieselError::DeserializationError(e) => {
                RepositoryError::ValidationError(format!("column conversion failed: {e}"))
            }
            DieselError::QueryBuilderError(e) => {
                RepositoryError::ValidationError(format!("invalid query: {e}"))
            }
            DieselError::RollbackTransaction
            | DieselError::AlreadyInTransaction
            | DieselError::NotInTransaction
            | DieselError::BrokenTransactionManager => {
                RepositoryError::DatabaseError(format!("transaction failure: {err}"))
            }
            other => RepositoryError::Unexpected(other.to_string()),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}
