//! Session state types for UI binding.
//!
//! A `Session` is the client's belief about who is logged in. It starts
//! in the loading state and leaves it exactly once, after the stored
//! token has been checked.

use serde::{Deserialize, Serialize};

use crate::auth::Identity;

/// Snapshot of the client-held authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The logged-in user, if any.
    pub user: Option<Identity>,
    /// True only while the startup token check is running.
    pub loading: bool,
}

impl Session {
    /// The state every process starts in.
    #[must_use]
    pub const fn starting() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    /// A settled session with no user.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    /// A settled session for the given user.
    #[must_use]
    pub const fn authenticated(user: Identity) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    /// Returns true once a user is known and startup has finished.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        !self.loading && self.user.is_some()
    }

    /// Collapses the snapshot into its state-machine position.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        if self.loading {
            SessionStatus::Loading
        } else if self.user.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::starting()
    }
}

/// Position in the session state machine.
///
/// `Loading` moves to one of the other two once; afterwards login and
/// logout flip between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Startup verification in progress.
    Loading,
    /// A user is logged in.
    Authenticated,
    /// Nobody is logged in.
    Unauthenticated,
}

impl SessionStatus {
    /// Short label for status lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Loading => "Loading...",
            Self::Authenticated => "Signed in",
            Self::Unauthenticated => "Signed out",
        }
    }
}
