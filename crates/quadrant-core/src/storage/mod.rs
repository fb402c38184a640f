mod config;
pub mod database;

pub use config::AppConfig;
pub use database::Database;

use std::collections::HashMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;

use crate::error::StorageError;
use crate::matrix::{DisplayPrefs, TaskModel};

/// Storage entry holding the task model JSON.
pub const MODEL_KEY: &str = "tasks";
/// Storage entry holding the per-quadrant show-completed flags.
pub const PREFS_KEY: &str = "showCompletedPrefs";

/// Returns `~/.config/quadrant[-dev]/` based on QUADRANT_ENV.
///
/// Set QUADRANT_ENV=dev to use the development data directory, or
/// QUADRANT_DATA_DIR to point somewhere else entirely (tests and scripting).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = if let Ok(dir) = std::env::var("QUADRANT_DATA_DIR") {
        PathBuf::from(dir)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");

        let env = std::env::var("QUADRANT_ENV").unwrap_or_else(|_| "production".to_string());

        if env == "dev" {
            base_dir.join("quadrant-dev")
        } else {
            base_dir.join("quadrant")
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Persistence seam for the task model and display preferences.
///
/// Loads are tolerant: a missing entry yields the default value, and a
/// corrupt entry is cleared and also yields the default, so stored garbage
/// never prevents the application from starting. Saves are best-effort; the
/// in-memory state stays the source of truth whether or not the write lands.
pub trait StorageBackend {
    /// Read the task model, falling back to an empty model.
    fn load_model(&mut self) -> TaskModel;

    /// Write the full task model.
    fn save_model(&mut self, model: &TaskModel) -> Result<(), StorageError>;

    /// Read the display preferences, falling back to all-visible.
    fn load_prefs(&mut self) -> DisplayPrefs;

    /// Write the display preferences.
    fn save_prefs(&mut self, prefs: &DisplayPrefs) -> Result<(), StorageError>;
}

/// Strict JSON decode of one storage entry. `None` means the entry is
/// corrupt and should be cleared.
fn decode_entry<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_str(raw).ok()
}

/// In-memory backend for tests and storage-free construction.
///
/// Holds the same JSON entries a [`Database`] would, so encode/decode
/// behavior matches the real backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<&'static str, String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend::default()
    }

    /// Make every subsequent save fail, to exercise best-effort writes.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes across both entries.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Raw JSON currently stored under a key.
    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Seed a raw entry, valid or not.
    pub fn set_entry(&mut self, key: &'static str, raw: impl Into<String>) {
        self.entries.insert(key, raw.into());
    }

    fn save(&mut self, key: &'static str, raw: String) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::WriteFailed("writes disabled".to_string()));
        }
        self.entries.insert(key, raw);
        self.writes += 1;
        Ok(())
    }
}

impl StorageBackend for MemoryBackend {
    fn load_model(&mut self) -> TaskModel {
        match self.entries.get(MODEL_KEY) {
            Some(raw) => match decode_entry(raw) {
                Some(model) => model,
                None => {
                    self.entries.remove(MODEL_KEY);
                    TaskModel::default()
                }
            },
            None => TaskModel::default(),
        }
    }

    fn save_model(&mut self, model: &TaskModel) -> Result<(), StorageError> {
        let raw = serde_json::to_string(model).map_err(|source| StorageError::Encode {
            entry: MODEL_KEY,
            source,
        })?;
        self.save(MODEL_KEY, raw)
    }

    fn load_prefs(&mut self) -> DisplayPrefs {
        match self.entries.get(PREFS_KEY) {
            Some(raw) => match decode_entry(raw) {
                Some(prefs) => prefs,
                None => {
                    self.entries.remove(PREFS_KEY);
                    DisplayPrefs::default()
                }
            },
            None => DisplayPrefs::default(),
        }
    }

    fn save_prefs(&mut self, prefs: &DisplayPrefs) -> Result<(), StorageError> {
        let raw = serde_json::to_string(prefs).map_err(|source| StorageError::Encode {
            entry: PREFS_KEY,
            source,
        })?;
        self.save(PREFS_KEY, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Quadrant;

    #[test]
    fn memory_backend_starts_empty() {
        let mut backend = MemoryBackend::new();
        assert!(backend.load_model().is_empty());
        assert_eq!(backend.load_prefs(), DisplayPrefs::default());
    }

    #[test]
    fn memory_backend_round_trips_entries() {
        let mut backend = MemoryBackend::new();
        let mut prefs = DisplayPrefs::default();
        prefs.set_show_completed(Quadrant::ImportantUrgent, false);

        backend.save_prefs(&prefs).unwrap();
        assert_eq!(backend.load_prefs(), prefs);
        assert_eq!(backend.writes(), 1);
    }

    #[test]
    fn memory_backend_clears_corrupt_entries() {
        let mut backend = MemoryBackend::new();
        backend.set_entry(MODEL_KEY, "{not json");

        assert!(backend.load_model().is_empty());
        assert_eq!(backend.entry(MODEL_KEY), None);
    }

    #[test]
    fn memory_backend_reports_disabled_writes() {
        let mut backend = MemoryBackend::new();
        backend.set_fail_writes(true);
        let err = backend.save_model(&TaskModel::new()).unwrap_err();
        assert!(matches!(err, StorageError::WriteFailed(_)));
    }
}
