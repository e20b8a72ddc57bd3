//! Persistence backends for the serialized history log.

use alloc::string::{String, ToString};
use alloc::sync::Arc;

use crate::error::HistoryError;
use crate::sync::Mutex;

/// Key-value slot holding the serialized history log.
pub trait HistoryStore: Send {
    /// Reads the stored log, `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Storage`] if the backend cannot be read.
    fn load(&self) -> Result<Option<String>, HistoryError>;

    /// Replaces the stored log.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Storage`] if the backend cannot be written.
    fn save(&mut self, data: &str) -> Result<(), HistoryError>;

    /// Removes the stored log.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Storage`] if the backend cannot be written.
    fn clear(&mut self) -> Result<(), HistoryError>;
}

/// In-memory slot. Clones share the same slot, so a caller can keep a
/// handle after passing one to a recorder.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `data`.
    #[must_use]
    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(data.into()))),
        }
    }

    /// Returns a copy of the stored data.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().clone()
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, HistoryError> {
        Ok(self.contents())
    }

    fn save(&mut self, data: &str) -> Result<(), HistoryError> {
        *self.slot.lock() = Some(data.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), HistoryError> {
        *self.slot.lock() = None;
        Ok(())
    }
}

/// A JSON file on disk.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(feature = "std")]
impl FileStore {
    /// Creates a store backed by the file at `path`. The file is created on
    /// the first save.
    #[must_use]
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(feature = "std")]
impl HistoryStore for FileStore {
    fn load(&self) -> Result<Option<String>, HistoryError> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(HistoryError::Storage(err.to_string())),
        }
    }

    fn save(&mut self, data: &str) -> Result<(), HistoryError> {
        std::fs::write(&self.path, data).map_err(|err| HistoryError::Storage(err.to_string()))
    }

    fn clear(&mut self) -> Result<(), HistoryError> {
        match std::fs::remove_file(&self.path) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => {
                Err(HistoryError::Storage(err.to_string()))
            }
            _ => Ok(()),
        }
    }
}
