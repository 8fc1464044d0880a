//! Authentication module for the Stockroom client.
//!
//! This module provides:
//! - The shared credential slot consulted by HTTP adapters
//! - The session store driving login, logout and startup verification
//! - Route protection built on session snapshots

mod credentials;
mod guard;
mod session_store;

pub use credentials::SessionCredentials;
pub use guard::{RouteGuard, Router};
pub use session_store::SessionStore;
