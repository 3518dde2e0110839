//! Persistence of the navigation selections across reloads.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::navigation::PersistedNavigation;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("navigation state in {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Storage for the persisted half of the navigation store.
pub trait NavigationPersistence: Send + Sync {
    /// Returns `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<PersistedNavigation>, PersistenceError>;
    fn save(&self, state: &PersistedNavigation) -> Result<(), PersistenceError>;
    fn clear(&self) -> Result<(), PersistenceError>;
}

/// Pretty-printed JSON file, parent directories created on save.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl NavigationPersistence for JsonFilePersistence {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Option<PersistedNavigation>, PersistenceError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No saved navigation state");
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let state = serde_json::from_str(&contents).map_err(|source| PersistenceError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(state))
    }

    #[instrument(skip(self, state), fields(path = %self.path.display(), nav_level = %state.current_level))]
    fn save(&self, state: &PersistedNavigation) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(state).map_err(|source| {
            PersistenceError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        debug!("Navigation state saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// In-memory persistence, e.g. for tests or a session that should not survive exit.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    slot: Mutex<Option<PersistedNavigation>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NavigationPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<PersistedNavigation>, PersistenceError> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, state: &PersistedNavigation) -> Result<(), PersistenceError> {
        *self.slot.lock() = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        *self.slot.lock() = None;
        Ok(())
    }
}
