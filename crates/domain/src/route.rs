//! Navigation targets of the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A screen of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppRoute {
    /// Login form, the redirect target for anonymous users.
    Login,
    /// Account creation form.
    Signup,
    /// Overview with headline stats.
    Dashboard,
    /// Product catalog.
    Products,
    /// Purchase orders.
    Orders,
    /// Supplier directory.
    Suppliers,
    /// Forecast and classification charts.
    Analytics,
    /// User preferences.
    Settings,
    /// Any path inside the protected area that matches no screen.
    NotFound,
}

/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reachable without a session.
    Public,
    /// Requires an authenticated session.
    Protected,
}

impl AppRoute {
    /// Every routable screen, in sidebar order.
    pub const ALL: [Self; 8] = [
        Self::Login,
        Self::Signup,
        Self::Dashboard,
        Self::Products,
        Self::Orders,
        Self::Suppliers,
        Self::Analytics,
        Self::Settings,
    ];

    /// Resolves a URL path. Unknown paths land on `NotFound`, which is
    /// protected like the rest of the catch-all area.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Dashboard,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/products" => Self::Products,
            "/orders" => Self::Orders,
            "/suppliers" => Self::Suppliers,
            "/analytics" => Self::Analytics,
            "/settings" => Self::Settings,
            _ => Self::NotFound,
        }
    }

    /// Canonical path of the route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Dashboard => "/",
            Self::Products => "/products",
            Self::Orders => "/orders",
            Self::Suppliers => "/suppliers",
            Self::Analytics => "/analytics",
            Self::Settings => "/settings",
            Self::NotFound => "/*",
        }
    }

    /// Whether the route needs a session.
    #[must_use]
    pub const fn access(self) -> Access {
        match self {
            Self::Login | Self::Signup => Access::Public,
            _ => Access::Protected,
        }
    }

    /// Human readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Signup => "Sign up",
            Self::Dashboard => "Dashboard",
            Self::Products => "Products",
            Self::Orders => "Orders",
            Self::Suppliers => "Suppliers",
            Self::Analytics => "Analytics",
            Self::Settings => "Settings",
            Self::NotFound => "Not found",
        }
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What the view layer should do for a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Show a neutral waiting indicator and nothing else.
    Wait,
    /// Send the user elsewhere.
    Redirect(AppRoute),
    /// Show the requested screen.
    Render(AppRoute),
}

impl Navigation {
    /// Returns the screen to render, if any.
    #[must_use]
    pub const fn rendered(self) -> Option<AppRoute> {
        match self {
            Self::Render(route) => Some(route),
            _ => None,
        }
    }
}
