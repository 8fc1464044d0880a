//! File persistence for settings and the stored token.

mod settings_repository;
mod token_storage;

pub use settings_repository::{
    API_URL_ENV, SettingsError, SettingsRepository, TIMEOUT_ENV, apply_env_overrides,
};
pub use token_storage::{FileTokenStorage, MemoryTokenStorage};
