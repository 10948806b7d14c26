//! File-backed key-value store: one pretty-printed JSON document per key

use super::{
    Repository, StoreError, DISCIPLINES_KEY, NOTES_KEY, PROFILE_KEY, SCHEDULE_KEY, TASKS_KEY,
};
use crate::core::models::{ClassSchedule, Discipline, Note, Profile, Task};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the documents
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for `key`
    #[must_use]
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read `key`, returning `fallback` when it has never been written
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the file exists but cannot be read or parsed
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> Result<T, StoreError> {
        let path = self.key_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(fallback),
            Err(source) => {
                return Err(StoreError::Io {
                    key: key.to_string(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(fallback);
        }
        serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        })
    }

    /// Write `value` under `key`, creating the store directory if needed
    ///
    /// # Errors
    /// Returns a [`StoreError`] if serialization or writing fails
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        })?;
        fs::write(self.key_path(key), json).map_err(io_err)?;
        logger::debug!("Saved '{key}' to {}", self.dir.display());
        Ok(())
    }

    /// Remove the document for `key`; missing documents are not an error
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the file exists but cannot be removed
    pub fn clear_key(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.key_path(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(StoreError::Io {
                key: key.to_string(),
                source: e,
            }),
            _ => Ok(()),
        }
    }
}

impl Repository for JsonStore {
    fn load_profile(&self) -> Result<Option<Profile>, StoreError> {
        self.load(PROFILE_KEY, None)
    }

    fn save_profile(&mut self, profile: Option<&Profile>) -> Result<(), StoreError> {
        self.save(PROFILE_KEY, &profile)
    }

    fn load_disciplines(&self) -> Result<Vec<Discipline>, StoreError> {
        self.load(DISCIPLINES_KEY, Vec::new())
    }

    fn save_disciplines(&mut self, disciplines: &[Discipline]) -> Result<(), StoreError> {
        self.save(DISCIPLINES_KEY, disciplines)
    }

    fn load_notes(&self) -> Result<Vec<Note>, StoreError> {
        self.load(NOTES_KEY, Vec::new())
    }

    fn save_notes(&mut self, notes: &[Note]) -> Result<(), StoreError> {
        self.save(NOTES_KEY, notes)
    }

    fn load_schedule(&self) -> Result<Vec<ClassSchedule>, StoreError> {
        self.load(SCHEDULE_KEY, Vec::new())
    }

    fn save_schedule(&mut self, schedule: &[ClassSchedule]) -> Result<(), StoreError> {
        self.save(SCHEDULE_KEY, schedule)
    }

    fn load_tasks(&self) -> Result<Vec<Task>, StoreError> {
        self.load(TASKS_KEY, Vec::new())
    }

    fn save_tasks(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        self.save(TASKS_KEY, tasks)
    }
}
