//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A bearer token was empty or whitespace only.
    #[error("bearer token is empty")]
    EmptyToken,

    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A request timeout of zero was configured.
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    /// The backend returned something that is not a user record.
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    /// A report kind name was not recognised.
    #[error("unknown report kind: {0}")]
    UnknownReportKind(String),

    /// A report format name was not recognised.
    #[error("unknown report format: {0}")]
    UnknownReportFormat(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
