//! Local persistence behind a repository interface
//!
//! The organizer talks to a [`Repository`]; [`JsonStore`] keeps one JSON
//! document per key on disk and [`MemoryStore`] keeps everything in memory.

pub mod json;
pub mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

use crate::core::models::{ClassSchedule, Discipline, Note, Profile, Task};
use thiserror::Error;

/// Storage key of the student profile
pub const PROFILE_KEY: &str = "app.profile";
/// Storage key of the discipline list
pub const DISCIPLINES_KEY: &str = "app.disciplines";
/// Storage key of the note list
pub const NOTES_KEY: &str = "app.notes";
/// Storage key of the class schedule
pub const SCHEDULE_KEY: &str = "app.schedule";
/// Storage key of the task list
pub const TASKS_KEY: &str = "app.tasks";

/// Errors raised by repository implementations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a stored document failed
    #[error("storage I/O error for '{key}': {source}")]
    Io {
        /// Storage key being accessed
        key: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// A stored document is not valid JSON for its type
    #[error("malformed document for '{key}': {source}")]
    Json {
        /// Storage key being accessed
        key: String,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// Load/save access to every collection the organizer keeps.
///
/// Loads return the empty fallback when nothing has been stored yet.
pub trait Repository {
    /// Load the student profile
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the stored document cannot be read
    fn load_profile(&self) -> Result<Option<Profile>, StoreError>;

    /// Replace the student profile
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the document cannot be written
    fn save_profile(&mut self, profile: Option<&Profile>) -> Result<(), StoreError>;

    /// Load all disciplines
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the stored document cannot be read
    fn load_disciplines(&self) -> Result<Vec<Discipline>, StoreError>;

    /// Replace all disciplines
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the document cannot be written
    fn save_disciplines(&mut self, disciplines: &[Discipline]) -> Result<(), StoreError>;

    /// Load all notes
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the stored document cannot be read
    fn load_notes(&self) -> Result<Vec<Note>, StoreError>;

    /// Replace all notes
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the document cannot be written
    fn save_notes(&mut self, notes: &[Note]) -> Result<(), StoreError>;

    /// Load the weekly class schedule
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the stored document cannot be read
    fn load_schedule(&self) -> Result<Vec<ClassSchedule>, StoreError>;

    /// Replace the weekly class schedule
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the document cannot be written
    fn save_schedule(&mut self, schedule: &[ClassSchedule]) -> Result<(), StoreError>;

    /// Load all tasks
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the stored document cannot be read
    fn load_tasks(&self) -> Result<Vec<Task>, StoreError>;

    /// Replace all tasks
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the document cannot be written
    fn save_tasks(&mut self, tasks: &[Task]) -> Result<(), StoreError>;
}
