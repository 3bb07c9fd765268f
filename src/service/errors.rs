//! # Service Errors

use thiserror::Error;

use crate::index::IndexError;
use crate::repository::RepositoryError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Contact service errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid contact: {0}")]
    Validation(String),

    #[error("A contact with email {0} already exists")]
    DuplicateEmail(String),

    #[error("Contacts were not loaded; saving would overwrite the stored contacts")]
    LoadIncomplete,

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "ROLODEX_VALIDATION_FAILED",
            ServiceError::DuplicateEmail(_) => "ROLODEX_DUPLICATE_EMAIL",
            ServiceError::LoadIncomplete => "ROLODEX_LOAD_INCOMPLETE",
            ServiceError::Index(e) => e.code(),
            ServiceError::Repository(e) => e.code(),
        }
    }

    /// Returns true if the caller supplied bad input
    pub fn is_client_error(&self) -> bool {
        match self {
            ServiceError::Validation(_) | ServiceError::DuplicateEmail(_) => true,
            ServiceError::Index(e) => e.is_conflict(),
            ServiceError::LoadIncomplete | ServiceError::Repository(_) => false,
        }
    }
}
