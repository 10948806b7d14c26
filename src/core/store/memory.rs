//! In-memory repository for tests and embedding

use super::{Repository, StoreError};
use crate::core::models::{ClassSchedule, Discipline, Note, Profile, Task};

/// Keeps every collection in memory; never fails
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    profile: Option<Profile>,
    disciplines: Vec<Discipline>,
    notes: Vec<Note>,
    schedule: Vec<ClassSchedule>,
    tasks: Vec<Task>,
    saves: usize,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of save calls received so far
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }
}

impl Repository for MemoryStore {
    fn load_profile(&self) -> Result<Option<Profile>, StoreError> {
        Ok(self.profile.clone())
    }

    fn save_profile(&mut self, profile: Option<&Profile>) -> Result<(), StoreError> {
        self.profile = profile.cloned();
        self.saves += 1;
        Ok(())
    }

    fn load_disciplines(&self) -> Result<Vec<Discipline>, StoreError> {
        Ok(self.disciplines.clone())
    }

    fn save_disciplines(&mut self, disciplines: &[Discipline]) -> Result<(), StoreError> {
        self.disciplines = disciplines.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn load_notes(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.notes.clone())
    }

    fn save_notes(&mut self, notes: &[Note]) -> Result<(), StoreError> {
        self.notes = notes.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn load_schedule(&self) -> Result<Vec<ClassSchedule>, StoreError> {
        Ok(self.schedule.clone())
    }

    fn save_schedule(&mut self, schedule: &[ClassSchedule]) -> Result<(), StoreError> {
        self.schedule = schedule.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn load_tasks(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.clone())
    }

    fn save_tasks(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        self.tasks = tasks.to_vec();
        self.saves += 1;
        Ok(())
    }
}
