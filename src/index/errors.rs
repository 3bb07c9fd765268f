//! Index error types
//!
//! Error codes:
//! - ROLODEX_DUPLICATE_ID
//! - ROLODEX_DUPLICATE_EMAIL
//! - ROLODEX_ID_SPACE_EXHAUSTED
//!
//! Lookups never fail: absence is `None` or an empty result.

use thiserror::Error;

use crate::contact::ContactId;

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Index errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("Contact id already indexed: {0}")]
    DuplicateId(ContactId),

    #[error("Email already indexed: {0}")]
    DuplicateEmail(String),

    #[error("No free contact id in [{min}, {max}] after {attempts} attempts")]
    IdSpaceExhausted {
        min: ContactId,
        max: ContactId,
        attempts: u32,
    },
}

impl IndexError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            IndexError::DuplicateId(_) => "ROLODEX_DUPLICATE_ID",
            IndexError::DuplicateEmail(_) => "ROLODEX_DUPLICATE_EMAIL",
            IndexError::IdSpaceExhausted { .. } => "ROLODEX_ID_SPACE_EXHAUSTED",
        }
    }

    /// Conflicts are caller mistakes; exhaustion is a capacity problem
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            IndexError::DuplicateId(_) | IndexError::DuplicateEmail(_)
        )
    }
}
