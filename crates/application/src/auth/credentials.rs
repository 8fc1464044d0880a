//! In-memory credential slot shared by the session and the HTTP client.
//!
//! Every change bumps an epoch so a request that started under an older
//! credential can tell its answer is stale.

use parking_lot::RwLock;
use stockroom_domain::BearerToken;

use crate::ports::CredentialProvider;

#[derive(Debug, Default)]
struct Slot {
    token: Option<BearerToken>,
    epoch: u64,
}

/// Thread-safe holder of the active bearer token.
#[derive(Debug, Default)]
pub struct SessionCredentials {
    slot: RwLock<Slot>,
}

impl SessionCredentials {
    /// Creates an empty credential slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a token and returns the new epoch.
    pub fn install(&self, token: BearerToken) -> u64 {
        let mut slot = self.slot.write();
        slot.token = Some(token);
        slot.epoch += 1;
        slot.epoch
    }

    /// Drops the token and returns the new epoch.
    pub fn clear(&self) -> u64 {
        let mut slot = self.slot.write();
        slot.token = None;
        slot.epoch += 1;
        slot.epoch
    }

    /// Current epoch.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.slot.read().epoch
    }

    /// Returns true if a token is installed.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.slot.read().token.is_some()
    }
}

impl CredentialProvider for SessionCredentials {
    fn bearer(&self) -> Option<BearerToken> {
        self.slot.read().token.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_install_and_clear() {
        let credentials = SessionCredentials::new();
        assert!(credentials.bearer().is_none());
        assert_eq!(credentials.epoch(), 0);

        let epoch = credentials.install(BearerToken::new("abc").unwrap());
        assert_eq!(epoch, 1);
        assert_eq!(credentials.bearer().unwrap().as_str(), "abc");
        assert!(credentials.is_present());

        let epoch = credentials.clear();
        assert_eq!(epoch, 2);
        assert!(credentials.bearer().is_none());
    }

    #[test]
    fn test_every_change_bumps_epoch() {
        let credentials = SessionCredentials::new();
        let first = credentials.install(BearerToken::new("a").unwrap());
        let second = credentials.install(BearerToken::new("b").unwrap());
        assert!(second > first);
        assert!(credentials.clear() > second);
    }
}
