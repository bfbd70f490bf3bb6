//! Persisted session storage.
//!
//! The token and username are written and cleared together. The file-backed
//! store lives at `~/.config/library-client/session.json` (or
//! `$XDG_CONFIG_HOME/library-client/session.json`) and is replaced atomically.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "library-client";
const SESSION_FILE_NAME: &str = "session.json";

/// Errors for persisted session operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No suitable user config directory is available.
    #[error("unable to determine config directory (set XDG_CONFIG_HOME or HOME)")]
    ConfigDirUnavailable,
    /// Filesystem I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Token and username as kept at rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: String,
    pub username: String,
}

impl PersistedSession {
    #[must_use]
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }

    /// A pair is only usable when both halves are present.
    fn is_complete(&self) -> bool {
        !self.token.trim().is_empty() && !self.username.trim().is_empty()
    }
}

/// Read/write contract for the persisted token+username pair.
///
/// Implementations must never expose one half of the pair without the other.
pub trait SessionStore: Send + Sync {
    /// Loads the persisted pair, or `None` when nothing usable is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing storage cannot be read.
    fn load(&self) -> Result<Option<PersistedSession>, StorageError>;

    /// Replaces the persisted pair.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing storage cannot be written.
    fn save(&self, session: &PersistedSession) -> Result<(), StorageError>;

    /// Removes the persisted pair. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing storage cannot be modified.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Process-local store, used by tests and short-lived clients.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<PersistedSession>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `session`.
    #[must_use]
    pub fn with_session(session: PersistedSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slot.clone().filter(PersistedSession::is_complete))
    }

    fn save(&self, session: &PersistedSession) -> Result<(), StorageError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// JSON file store with owner-only permissions on unix.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default per-user location.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConfigDirUnavailable`] if no usable config dir is found.
    pub fn at_default_location() -> Result<Self, StorageError> {
        Ok(Self::new(default_session_path()?))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from(SESSION_FILE_NAME), OsString::from);
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let session: PersistedSession = serde_json::from_slice(&bytes)?;
        Ok(Some(session).filter(PersistedSession::is_complete))
    }

    fn save(&self, session: &PersistedSession) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_vec_pretty(session)?;
        let temp = self.temp_path();
        fs::write(&temp, payload)?;
        set_owner_only_permissions(&temp)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// Returns the per-user `library-client` directory holding both
/// `config.toml` and `session.json`.
///
/// Priority: `$XDG_CONFIG_HOME`, then `$HOME/.config`, then `%APPDATA%`.
///
/// # Errors
///
/// Returns [`StorageError::ConfigDirUnavailable`] if no usable config dir is found.
pub fn default_config_dir() -> Result<PathBuf, StorageError> {
    resolve_config_dir(
        sanitize_env_path(env::var_os("XDG_CONFIG_HOME")),
        sanitize_env_path(env::var_os("HOME")),
        sanitize_env_path(env::var_os("APPDATA")),
    )
}

/// Returns the default session file path.
///
/// # Errors
///
/// Returns [`StorageError::ConfigDirUnavailable`] if no usable config dir is found.
pub fn default_session_path() -> Result<PathBuf, StorageError> {
    Ok(default_config_dir()?.join(SESSION_FILE_NAME))
}

fn sanitize_env_path(value: Option<OsString>) -> Option<PathBuf> {
    let value = value?;
    if value.to_string_lossy().trim().is_empty() {
        return None;
    }

    Some(PathBuf::from(value))
}

fn resolve_config_dir(
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
    app_data: Option<PathBuf>,
) -> Result<PathBuf, StorageError> {
    if let Some(xdg) = xdg_config_home {
        return Ok(xdg.join(APP_DIR_NAME));
    }
    if let Some(home) = home {
        return Ok(home.join(".config").join(APP_DIR_NAME));
    }
    if let Some(app_data) = app_data {
        return Ok(app_data.join(APP_DIR_NAME));
    }

    Err(StorageError::ConfigDirUnavailable)
}

#[cfg(unix)]
fn set_owner_only_permissions(path: &Path) -> Result<(), StorageError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_owner_only_permissions(_path: &Path) -> Result<(), StorageError> {
    Ok(())
}
