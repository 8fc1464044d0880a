//! Authentication value types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomainError, DomainResult};

/// Scheme used in the `Authorization` header.
pub const BEARER_SCHEME: &str = "Bearer";

/// An opaque bearer credential issued by the backend.
///
/// Tokens are replaced, never edited. `Debug` prints a short preview so
/// tokens can appear in logs without leaking.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a raw token string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyToken` if the string is empty or blank.
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::EmptyToken);
        }
        Ok(Self(raw))
    }

    /// Returns the raw token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{BEARER_SCHEME} {}", self.0)
    }

    /// Get a preview of the token (first 8 chars + ...).
    #[must_use]
    pub fn preview(&self) -> String {
        if self.0.len() > 12 && self.0.is_char_boundary(8) {
            format!("{}...", &self.0[..8])
        } else {
            "***".to_string()
        }
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&self.preview()).finish()
    }
}

impl TryFrom<String> for BearerToken {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BearerToken> for String {
    fn from(token: BearerToken) -> Self {
        token.0
    }
}

/// Username/password pair submitted to the token endpoint.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    /// Account name.
    pub username: String,
    /// Plain password, sent form-encoded.
    pub password: String,
}

impl LoginCredentials {
    /// Creates a new credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Account registration payload.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    /// Requested account name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Initial password.
    pub password: String,
}

impl SignupRequest {
    /// Creates a new signup payload.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// The authenticated user record returned by the backend.
///
/// Kept opaque: the client only cares that it exists. `username` is
/// read for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(serde_json::Value);

impl Identity {
    /// Wraps a backend user record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIdentity` unless the value is a JSON object.
    pub fn from_value(value: serde_json::Value) -> DomainResult<Self> {
        if value.is_object() {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidIdentity(format!(
                "expected an object, got {value}"
            )))
        }
    }

    /// Returns the username field if the backend sent one.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.0.get("username").and_then(serde_json::Value::as_str)
    }

    /// Returns an arbitrary field of the record.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }

    /// Returns the raw record.
    #[must_use]
    pub const fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_token_rejected() {
        assert_eq!(BearerToken::new(""), Err(DomainError::EmptyToken));
        assert_eq!(BearerToken::new("   "), Err(DomainError::EmptyToken));
    }

    #[test]
    fn test_authorization_header() {
        let token = BearerToken::new("abc123").unwrap();
        assert_eq!(token.authorization_header(), "Bearer abc123");
    }

    #[test]
    fn test_debug_hides_token() {
        let token = BearerToken::new("eyJhbGciOiJIUzI1NiJ9.secret").unwrap();
        let debug = format!("{token:?}");
        assert!(debug.contains("eyJhbGci..."));
        assert!(!debug.contains("secret"));

        let short = BearerToken::new("short").unwrap();
        assert!(!format!("{short:?}").contains("short"));
    }

    #[test]
    fn test_token_serde_is_plain_string() {
        let token = BearerToken::new("abc").unwrap();
        assert_eq!(serde_json::to_string(&token).ok().as_deref(), Some("\"abc\""));
        assert!(serde_json::from_str::<BearerToken>("\"\"").is_err());
    }

    #[test]
    fn test_identity_username() {
        let identity = Identity::from_value(json!({
            "id": 1,
            "username": "alice",
            "email": "alice@example.com",
            "is_active": true
        }))
        .unwrap();

        assert_eq!(identity.username(), Some("alice"));
        assert_eq!(identity.field("id"), Some(&json!(1)));
    }

    #[test]
    fn test_identity_must_be_object() {
        assert!(matches!(
            Identity::from_value(json!("alice")),
            Err(DomainError::InvalidIdentity(_))
        ));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = LoginCredentials::new("alice", "pw");
        assert!(!format!("{creds:?}").contains("\"pw\""));
        let signup = SignupRequest::new("alice", "a@example.com", "hunter2");
        assert!(!format!("{signup:?}").contains("hunter2"));
    }
}
