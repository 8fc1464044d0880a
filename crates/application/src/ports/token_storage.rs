//! Durable token storage port.

use stockroom_domain::{BearerToken, DomainError};

/// Storage key the bearer token lives under.
pub const TOKEN_KEY: &str = "token";

/// Errors that can occur while reading or writing stored credentials.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The stored value is not a usable token.
    #[error("stored token is invalid: {0}")]
    Invalid(#[from] DomainError),
}

/// Durable storage for the bearer token, surviving restarts.
///
/// Operations are synchronous so logout can complete without yielding.
/// Absence of a token means logged out.
pub trait TokenStorage: Send + Sync {
    /// Reads the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load(&self) -> Result<Option<BearerToken>, StorageError>;

    /// Replaces the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn save(&self, token: &BearerToken) -> Result<(), StorageError>;

    /// Removes the stored token. Removing an absent token is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}
