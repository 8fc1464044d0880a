//! Token storage implementations.
//!
//! `FileTokenStorage` keeps a small key/value document on disk, in the
//! platform config directory by default:
//! - Linux: ~/.config/stockroom/storage.json
//! - macOS: ~/Library/Application Support/stockroom/storage.json
//! - Windows: %APPDATA%/stockroom/storage.json
//!
//! The bearer token lives under the `token` key. Other keys are kept
//! untouched.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use stockroom_application::ports::{StorageError, TOKEN_KEY, TokenStorage};
use stockroom_domain::BearerToken;
use tracing::debug;

type Document = BTreeMap<String, String>;

/// File-backed token storage.
#[derive(Debug)]
pub struct FileTokenStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTokenStorage {
    /// Storage backed by the given file.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Default storage file, if a config directory is available.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stockroom").join("storage.json"))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Document, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(Document::new()),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Document::new()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn write_document(&self, document: &Document) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut content = serde_json::to_vec_pretty(document)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        content.push(b'\n');
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<BearerToken>, StorageError> {
        let mut document = self.read_document()?;
        document
            .remove(TOKEN_KEY)
            .map(BearerToken::new)
            .transpose()
            .map_err(StorageError::from)
    }

    fn save(&self, token: &BearerToken) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let mut document = self.read_document()?;
        document.insert(TOKEN_KEY.to_string(), token.as_str().to_string());
        self.write_document(&document)?;
        debug!(path = %self.path.display(), "token stored");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let (mut document, corrupt) = match self.read_document() {
            Ok(document) => (document, false),
            // An unreadable file cannot hold a usable token; start over.
            Err(StorageError::Serialization(_)) => (Document::new(), true),
            Err(e) => return Err(e),
        };
        if document.remove(TOKEN_KEY).is_none() && !corrupt {
            return Ok(());
        }
        if document.is_empty() {
            match fs::remove_file(&self.path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(StorageError::Io(e)),
            }
        } else {
            self.write_document(&document)?;
        }
        debug!(path = %self.path.display(), "token removed");
        Ok(())
    }
}

/// Process-local token storage. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<BearerToken>>,
}

impl MemoryTokenStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-loaded with a token.
    #[must_use]
    pub fn with_token(token: BearerToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<BearerToken>, StorageError> {
        Ok(self.token.lock().clone())
    }

    fn save(&self, token: &BearerToken) -> Result<(), StorageError> {
        *self.token.lock() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.token.lock() = None;
        Ok(())
    }
}
