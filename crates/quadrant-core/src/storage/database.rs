//! SQLite-backed persistence.
//!
//! One kv table holds two independent JSON entries:
//! - `"tasks"`: the task model (four quadrant keys, each a task array)
//! - `"showCompletedPrefs"`: the per-quadrant show-completed flags
//!
//! Reads are tolerant (corrupt entries are cleared and replaced by
//! defaults); writes surface their errors to the caller and are never
//! retried here.

use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::matrix::{DisplayPrefs, TaskModel};

use super::{data_dir, decode_entry, StorageBackend, MODEL_KEY, PREFS_KEY};

/// SQLite database holding all persisted application state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/quadrant.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be prepared or the
    /// database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("quadrant.db");
        Self::open_at(&path)
    }

    /// Open a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a value from the kv store.
    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Tolerant read of one entry: missing yields the default, corrupt is
    /// cleared and yields the default.
    fn load_entry<T>(&mut self, key: &'static str, what: &str) -> T
    where
        T: serde::de::DeserializeOwned + Default,
    {
        match self.kv_get(key) {
            Ok(Some(raw)) => match decode_entry(&raw) {
                Some(value) => value,
                None => {
                    eprintln!("Warning: stored {what} entry is corrupt, resetting it");
                    if let Err(e) = self.kv_delete(key) {
                        eprintln!("Warning: failed to clear corrupt {what} entry: {e}");
                    }
                    T::default()
                }
            },
            Ok(None) => T::default(),
            Err(e) => {
                eprintln!("Warning: failed to read stored {what} entry: {e}");
                T::default()
            }
        }
    }
}

impl StorageBackend for Database {
    fn load_model(&mut self) -> TaskModel {
        self.load_entry(MODEL_KEY, "task")
    }

    fn save_model(&mut self, model: &TaskModel) -> Result<(), StorageError> {
        let raw = serde_json::to_string(model).map_err(|source| StorageError::Encode {
            entry: MODEL_KEY,
            source,
        })?;
        self.kv_set(MODEL_KEY, &raw)?;
        Ok(())
    }

    fn load_prefs(&mut self) -> DisplayPrefs {
        self.load_entry(PREFS_KEY, "preference")
    }

    fn save_prefs(&mut self, prefs: &DisplayPrefs) -> Result<(), StorageError> {
        let raw = serde_json::to_string(prefs).map_err(|source| StorageError::Encode {
            entry: PREFS_KEY,
            source,
        })?;
        self.kv_set(PREFS_KEY, &raw)?;
        Ok(())
    }
}
