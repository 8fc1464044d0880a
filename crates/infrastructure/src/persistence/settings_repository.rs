//! Client settings persistence.
//!
//! Settings live in the platform-specific config directory:
//! - Linux: ~/.config/stockroom/settings.json
//! - macOS: ~/Library/Application Support/stockroom/settings.json
//! - Windows: %APPDATA%/stockroom/settings.json

use std::path::{Path, PathBuf};

use stockroom_domain::ClientSettings;
use tokio::fs;
use tracing::debug;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "STOCKROOM_API_URL";

/// Environment variable overriding the request timeout, in milliseconds.
pub const TIMEOUT_ENV: &str = "STOCKROOM_TIMEOUT_MS";

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// An override carried an unusable value.
    #[error("invalid value for {key}: {value}")]
    InvalidOverride {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Repository for client settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    path: Option<PathBuf>,
}

impl Default for SettingsRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsRepository {
    /// Repository over the default settings file.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    /// Repository over an explicit settings file.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Returns the default settings file, if a config directory exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stockroom").join("settings.json"))
    }

    /// Returns the settings file this repository reads.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads settings from disk.
    ///
    /// Returns default settings if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<ClientSettings, SettingsError> {
        let Some(path) = &self.path else {
            return Ok(ClientSettings::default());
        };

        if !fs::try_exists(path).await? {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(ClientSettings::default());
        }

        let content = fs::read(path).await?;
        Ok(serde_json::from_slice(&content)?)
    }

    /// Saves settings to disk, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no config directory or the write fails.
    pub async fn save(&self, settings: &ClientSettings) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Err(SettingsError::NoConfigDir);
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut content = serde_json::to_vec_pretty(settings)?;
        content.push(b'\n');
        fs::write(path, content).await?;
        Ok(())
    }
}

/// Applies `STOCKROOM_*` overrides to loaded settings.
///
/// `lookup` resolves a variable name, normally `std::env::var(..).ok()`.
/// Empty values are ignored.
///
/// # Errors
///
/// Returns `SettingsError::InvalidOverride` if the timeout is not a
/// positive integer.
pub fn apply_env_overrides(
    mut settings: ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, SettingsError> {
    let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = present(API_URL_ENV) {
        settings.api_base_url = url.trim().to_string();
    }

    if let Some(raw) = present(TIMEOUT_ENV) {
        settings.timeout_ms = raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or(SettingsError::InvalidOverride {
                key: TIMEOUT_ENV,
                value: raw,
            })?;
    }

    Ok(settings)
}
