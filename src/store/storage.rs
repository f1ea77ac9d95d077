//! Persistence backends for the feature store.
//!
//! The store talks to a single storage slot through the [`Storage`] trait and
//! never assumes where the slot lives. Two backends are provided:
//! [`JsonFileStorage`] (one JSON file, the production path) and
//! [`MemoryStorage`] (an in-process slot for tests and throwaway use).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::models::Feature;

/// The file name of the storage slot inside the data directory.
pub const SLOT_FILE: &str = "roadmap-features.json";

/// Storage failures surfaced by [`Storage`] implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Stored data is not a valid feature collection: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Could not determine the platform data directory")]
    NoDataDir,
}

/// A single keyed slot holding the serialized feature collection.
///
/// `load` distinguishes "slot is empty" (`Ok(None)`, the caller seeds) from
/// "slot holds unreadable data" (`Err(Corrupt)`, the caller must not
/// overwrite). `save` replaces the whole slot.
pub trait Storage: Send {
    fn load(&self) -> Result<Option<Vec<Feature>>, StorageError>;
    fn save(&self, features: &[Feature]) -> Result<(), StorageError>;
}

/// File-backed slot: the JSON array serialization of the collection.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The slot in the platform data directory (`roadmap-features.json`).
    pub fn default_path() -> Result<PathBuf, StorageError> {
        let dirs =
            directories::ProjectDirs::from("", "", "roadmap").ok_or(StorageError::NoDataDir)?;
        Ok(dirs.data_dir().join(SLOT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<Feature>>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let features = serde_json::from_str(&text)?;
        Ok(Some(features))
    }

    fn save(&self, features: &[Feature]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(features)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

/// In-process slot holding the serialized JSON text.
///
/// Clones share the slot, so a test can hand one clone to a store and keep
/// the other to inspect what was persisted or to inject raw contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw slot contents, as a save would leave them.
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().expect("storage lock poisoned").clone()
    }

    /// Replace the raw slot contents, bypassing serialization.
    pub fn set_contents(&self, text: impl Into<String>) {
        *self.slot.lock().expect("storage lock poisoned") = Some(text.into());
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<Feature>>, StorageError> {
        let slot = self.slot.lock().expect("storage lock poisoned");
        match slot.as_deref() {
            Some(text) => Ok(Some(serde_json::from_str(text)?)),
            None => Ok(None),
        }
    }

    fn save(&self, features: &[Feature]) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(features)?;
        *self.slot.lock().expect("storage lock poisoned") = Some(text);
        Ok(())
    }
}
