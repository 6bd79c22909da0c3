//! Error conversion glue between layers.
//!
//! The domain layer does not know about repository or service errors, so the
//! `From` impls that lift [`TypeConstraintError`] live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use super::*;
    use crate::domain::pipeline::PipelineError;
    use crate::forms::FormError;
    use crate::services::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::TypeConstraint(val.to_string())
        }
    }

    impl From<TypeConstraintError> for FormError {
        fn from(val: TypeConstraintError) -> Self {
            FormError::Constraint(val)
        }
    }

    impl From<PipelineError> for ServiceError {
        fn from(val: PipelineError) -> Self {
            match val {
                PipelineError::UnknownDeal(_) => ServiceError::NotFound,
                PipelineError::MovePending(_) | PipelineError::NotPending(_) => {
                    ServiceError::Conflict(val.to_string())
                }
            }
        }
    }
}
