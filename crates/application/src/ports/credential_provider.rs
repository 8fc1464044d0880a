//! Per-request credential port

use stockroom_domain::BearerToken;

/// Supplies the bearer token for outgoing requests.
///
/// HTTP adapters consult this on every request instead of keeping a
/// default header, so clearing the credential takes effect immediately.
pub trait CredentialProvider: Send + Sync {
    /// The token to attach, or `None` to send the request anonymously.
    fn bearer(&self) -> Option<BearerToken>;
}

/// A provider that never supplies credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl CredentialProvider for Anonymous {
    fn bearer(&self) -> Option<BearerToken> {
        None
    }
}
