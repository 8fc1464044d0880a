//! Credential gateway port
//!
//! Defines the HTTP exchanges the session lifecycle depends on.

use async_trait::async_trait;
use stockroom_domain::{BearerToken, Identity, LoginCredentials, SignupRequest};

/// Errors returned by backend gateways.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The backend refused the credentials or token (401/403).
    #[error("unauthorized: {detail}")]
    Unauthorized {
        /// Backend-provided reason.
        detail: String,
    },

    /// The backend answered with another error status.
    #[error("request rejected ({status}): {detail}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Backend-provided reason.
        detail: String,
    },

    /// No response within the configured timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// The backend could not be reached at all.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with a body we could not use.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    /// True for transport failures where the backend never judged the request.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Unreachable(_))
    }

    /// HTTP status attached to the error, if the backend answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Port for the authentication endpoints.
///
/// Requests needing a bearer header read it from the
/// [`CredentialProvider`](crate::ports::CredentialProvider) the
/// implementation was built with, at call time.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges a username and password for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Unauthorized` for bad credentials, or a
    /// transport error.
    async fn request_token(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<BearerToken, GatewayError>;

    /// Fetches the user the current bearer token belongs to.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Unauthorized` when the token is missing,
    /// expired or invalid.
    async fn fetch_identity(&self) -> Result<Identity, GatewayError>;

    /// Registers a new account. Does not log in.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Rejected` for validation or conflict errors.
    async fn signup(&self, request: &SignupRequest) -> Result<(), GatewayError>;
}
