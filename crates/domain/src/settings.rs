//! Client Settings Domain Model
//!
//! Defines how the Stockroom client reaches its backend and how it
//! treats a stored token it cannot verify.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Per-request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// What startup does with a stored token whose verification failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPolicy {
    /// Any failure discards the stored token.
    #[default]
    ClearOnAnyFailure,
    /// Only a backend rejection discards it; an unreachable backend keeps
    /// it on disk for the next start.
    KeepOnUnreachable,
}

impl VerificationPolicy {
    /// Whether a failure of the given kind should discard the token.
    #[must_use]
    pub const fn clears_on(self, unreachable: bool) -> bool {
        match self {
            Self::ClearOnAnyFailure => true,
            Self::KeepOnUnreachable => !unreachable,
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of the inventory API.
    pub api_base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Handling of unverifiable stored tokens.
    pub verification_policy: VerificationPolicy,
    /// Override for the token storage file.
    pub storage_path: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            verification_policy: VerificationPolicy::default(),
            storage_path: None,
        }
    }
}

impl ClientSettings {
    /// Checks the settings before anything talks to the backend.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ZeroTimeout` for a zero timeout and
    /// `DomainError::InvalidUrl` for an unusable base URL.
    pub fn validate(&self) -> DomainResult<()> {
        if self.timeout_ms == 0 {
            return Err(DomainError::ZeroTimeout);
        }
        self.base_url().map(|_| ())
    }

    /// Parses the base URL.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the URL does not parse or is not http(s).
    pub fn base_url(&self) -> DomainResult<Url> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.api_base_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(DomainError::InvalidUrl(format!(
                "unsupported scheme {other}: {}",
                self.api_base_url
            ))),
        }
    }
}
