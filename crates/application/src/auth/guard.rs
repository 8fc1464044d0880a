//! Route protection.

use stockroom_domain::{Access, AppRoute, Navigation, Session};

/// Gate in front of the protected area.
///
/// A pure function of the session snapshot: no retries, no timeout.
#[derive(Debug, Clone, Copy)]
pub struct RouteGuard {
    login: AppRoute,
}

impl RouteGuard {
    /// A guard redirecting anonymous users to the login screen.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            login: AppRoute::Login,
        }
    }

    /// Decides what a protected `target` shows for `session`.
    #[must_use]
    pub const fn check(&self, session: &Session, target: AppRoute) -> Navigation {
        if session.loading {
            Navigation::Wait
        } else if session.user.is_none() {
            Navigation::Redirect(self.login)
        } else {
            Navigation::Render(target)
        }
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps paths to screens, sending protected ones through the guard.
#[derive(Debug, Clone, Copy, Default)]
pub struct Router {
    guard: RouteGuard,
}

impl Router {
    /// Creates a router with the default guard.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            guard: RouteGuard::new(),
        }
    }

    /// Resolves a navigation to `path` under `session`.
    #[must_use]
    pub fn navigate(&self, path: &str, session: &Session) -> Navigation {
        let route = AppRoute::from_path(path);
        match route.access() {
            Access::Public => Navigation::Render(route),
            Access::Protected => self.guard.check(session, route),
        }
    }
}
