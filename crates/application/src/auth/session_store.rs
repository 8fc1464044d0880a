//! The session store: single source of truth for who is logged in.
//!
//! The store owns the session snapshot and drives it through its
//! lifecycle: one startup verification, then login and logout. It is
//! built once and shared (usually behind an `Arc`) with whatever needs to
//! read the session or act on it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use stockroom_domain::{
    BearerToken, Identity, LoginCredentials, Session, SignupRequest, VerificationPolicy,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::SessionCredentials;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{AuthGateway, StorageError, TokenStorage};

/// Session lifecycle manager.
///
/// # Example
///
/// ```ignore
/// let credentials = Arc::new(SessionCredentials::new());
/// let client = Arc::new(ReqwestApiClient::new(&settings, credentials.clone())?);
/// let store = SessionStore::new(client, Arc::new(FileTokenStorage::at(path)), credentials);
///
/// store.initialize().await;
/// if !store.snapshot().is_authenticated() {
///     store.login("alice", "pw").await?;
/// }
/// ```
pub struct SessionStore<G: AuthGateway, S: TokenStorage> {
    gateway: Arc<G>,
    storage: Arc<S>,
    credentials: Arc<SessionCredentials>,
    policy: VerificationPolicy,
    state: watch::Sender<Session>,
    initialized: AtomicBool,
}

impl<G: AuthGateway, S: TokenStorage> SessionStore<G, S> {
    /// Creates a store in the loading state.
    ///
    /// `credentials` must be the same slot the gateway reads its bearer
    /// token from.
    pub fn new(gateway: Arc<G>, storage: Arc<S>, credentials: Arc<SessionCredentials>) -> Self {
        Self {
            gateway,
            storage,
            credentials,
            policy: VerificationPolicy::default(),
            state: watch::Sender::new(Session::starting()),
            initialized: AtomicBool::new(false),
        }
    }

    /// Sets how startup treats a stored token it could not verify.
    #[must_use]
    pub const fn with_policy(mut self, policy: VerificationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current session snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receiver notified on every session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// The credential slot shared with the HTTP client.
    #[must_use]
    pub fn credentials(&self) -> &Arc<SessionCredentials> {
        &self.credentials
    }

    /// Restores the session from storage.
    ///
    /// Reads the stored token; if there is one, installs it and asks the
    /// backend who it belongs to. Verification failures are logged and
    /// end in a logged-out session; they are never returned. Only the
    /// first call does anything.
    pub async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            debug!("session already initialized");
            return;
        }

        let stored = match self.storage.load() {
            Ok(token) => token,
            Err(error) => {
                warn!(%error, "could not read stored token; starting signed out");
                if matches!(
                    error,
                    StorageError::Invalid(_) | StorageError::Serialization(_)
                ) {
                    self.discard_token();
                }
                None
            }
        };

        let Some(token) = stored else {
            info!("no stored token");
            self.settle(Some(None));
            return;
        };

        debug!(token = %token.preview(), "verifying stored token");
        let epoch = self.credentials.install(token);

        match self.gateway.fetch_identity().await {
            Ok(identity) if self.credentials.epoch() == epoch => {
                info!(user = identity.username().unwrap_or("?"), "session restored");
                self.settle(Some(Some(identity)));
            }
            Ok(_) => {
                debug!("session changed during verification; dropping result");
                self.settle(None);
            }
            Err(error) => {
                warn!(%error, "stored token could not be verified");
                if self.credentials.epoch() == epoch {
                    if self.policy.clears_on(error.is_unreachable()) {
                        self.discard_token();
                    } else {
                        info!("backend unreachable; keeping stored token for next start");
                        self.credentials.clear();
                    }
                    self.settle(Some(None));
                } else {
                    self.settle(None);
                }
            }
        }
    }

    /// Logs in with a username and password.
    ///
    /// On success the token is stored and installed, and the user record
    /// is fetched and published.
    ///
    /// # Errors
    ///
    /// Propagates credential rejection and transport errors. If the token
    /// exchange succeeds but the user fetch fails, the token stays stored.
    pub async fn login(&self, username: &str, password: &str) -> ApplicationResult<Identity> {
        let credentials = LoginCredentials::new(username, password);
        debug!(username, "requesting token");

        let token = self.gateway.request_token(&credentials).await?;
        let epoch = self.store_token(token)?;

        let identity = self.gateway.fetch_identity().await?;
        if self.credentials.epoch() != epoch {
            return Err(ApplicationError::SessionChanged);
        }

        info!(username, "logged in");
        let user = identity.clone();
        self.state.send_modify(|session| session.user = Some(user));
        Ok(identity)
    }

    /// Registers a new account. Leaves the session untouched.
    ///
    /// # Errors
    ///
    /// Propagates validation and conflict errors from the backend.
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ApplicationResult<()> {
        let request = SignupRequest::new(username, email, password);
        self.gateway.signup(&request).await?;
        info!(username, "account created");
        Ok(())
    }

    /// Logs out: forgets the stored token, the installed credential and
    /// the user. Never touches the network.
    pub fn logout(&self) {
        self.discard_token();
        self.state.send_modify(|session| session.user = None);
        info!("logged out");
    }

    fn store_token(&self, token: BearerToken) -> ApplicationResult<u64> {
        self.storage.save(&token)?;
        Ok(self.credentials.install(token))
    }

    fn discard_token(&self) {
        if let Err(error) = self.storage.clear() {
            warn!(%error, "could not remove stored token");
        }
        self.credentials.clear();
    }

    /// Ends the loading phase. `Some(user)` also replaces the user;
    /// `None` leaves whatever a concurrent login/logout set.
    fn settle(&self, user: Option<Option<Identity>>) {
        self.state.send_modify(|session| {
            session.loading = false;
            if let Some(user) = user {
                session.user = user;
            }
        });
    }
}
