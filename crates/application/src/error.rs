//! Application error types

use stockroom_domain::DomainError;
use thiserror::Error;

use crate::ports::{GatewayError, StorageError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A backend exchange failed.
    #[error("{0}")]
    Gateway(#[from] GatewayError),

    /// The token store could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A local file could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The session changed (logout or another login) while the operation
    /// was waiting on the backend; its result was dropped.
    #[error("session changed while the request was in flight")]
    SessionChanged,
}

impl ApplicationError {
    /// True if the backend rejected the supplied credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Gateway(GatewayError::Unauthorized { .. }))
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
