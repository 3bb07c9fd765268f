//! # Repository Errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Contact repository errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid contact data in {path}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RepositoryError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RepositoryError::Io { .. } => "ROLODEX_REPOSITORY_IO",
            RepositoryError::Serialization { .. } => "ROLODEX_REPOSITORY_DATA",
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RepositoryError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn serialization(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        RepositoryError::Serialization {
            path: path.into(),
            source,
        }
    }
}
