//! Stockroom Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: the reqwest backend client and
//! file-backed token and settings storage.

pub mod adapters;
pub mod persistence;

pub use adapters::ReqwestApiClient;
pub use persistence::{
    API_URL_ENV, FileTokenStorage, MemoryTokenStorage, SettingsError, SettingsRepository,
    TIMEOUT_ENV, apply_env_overrides,
};
