//! Client-side token persistence. Holds the token between runs the way a
//! browser keeps it in local storage: set on login, read on boot, cleared on
//! logout.

use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::debug;

use super::error::TokenStorageError;

pub trait TokenStorage: Send + Sync {
    /// # Errors
    /// Returns an error if the token cannot be written.
    fn save(&self, token: &str) -> Result<(), TokenStorageError>;

    /// # Errors
    /// Returns an error if the storage exists but cannot be read.
    fn load(&self) -> Result<Option<String>, TokenStorageError>;

    /// # Errors
    /// Returns an error if an existing token cannot be removed.
    fn clear(&self) -> Result<(), TokenStorageError>;
}

/// Token kept in a single file, created with owner-only permissions on unix.
#[derive(Clone, Debug)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn save(&self, token: &str) -> Result<(), TokenStorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        // The mode above only applies to new files.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(token.as_bytes())?;
        debug!("token saved to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, TokenStorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn clear(&self) -> Result<(), TokenStorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Process-local storage, for tests and embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A poisoned slot still holds a valid Option.
        self.token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn save(&self, token: &str) -> Result<(), TokenStorageError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, TokenStorageError> {
        Ok(self.slot().clone())
    }

    fn clear(&self) -> Result<(), TokenStorageError> {
        *self.slot() = None;
        Ok(())
    }
}
