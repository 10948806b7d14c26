//! Organizer service: the in-memory snapshot of every collection plus the
//! create/update/delete operations, persisted through a [`Repository`].
//!
//! Every mutation writes the affected collection to the repository first and
//! only then updates the snapshot, so a failed save leaves the snapshot as it
//! was.

use crate::core::models::{
    ClassSchedule, Discipline, GradingScheme, Note, NoteAttachment, Profile, Task, TaskKind,
};
use crate::core::overview::{self, DisciplineReport, SearchHit};
use crate::core::store::{Repository, StoreError};
use crate::core::validation::{
    validate_grade_fields, validate_grading_scheme, validate_task_grade, GradingError,
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by organizer operations
#[derive(Debug, Error)]
pub enum OrganizerError {
    /// The repository failed
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A grading scheme or grade entry was rejected
    #[error(transparent)]
    Grading(#[from] GradingError),
    /// No entity of that kind has the given id
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// Entity kind ("discipline", "task", ...)
        kind: &'static str,
        /// Requested id
        id: String,
    },
    /// Input failed a field check
    #[error("{0}")]
    Invalid(String),
}

/// Fields of a discipline to create
#[derive(Debug, Clone, Default)]
pub struct NewDiscipline {
    /// Display name
    pub name: String,
    /// Professor name
    pub professor: Option<String>,
    /// Course code
    pub code: Option<String>,
    /// Grading formula
    pub grading: Option<GradingScheme>,
}

/// Fields of a task to create
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Owning discipline
    pub discipline_id: String,
    /// Activity kind
    pub kind: TaskKind,
    /// Title
    pub title: String,
    /// Due date
    pub due_date: DateTime<Utc>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Raw grade
    pub grade: Option<f64>,
    /// Scale of the raw grade
    pub grade_max: Option<f64>,
    /// Grading component link
    pub component_id: Option<String>,
}

/// Fields of a note to create
#[derive(Debug, Clone, Default)]
pub struct NewNote {
    /// Owning discipline
    pub discipline_id: String,
    /// Title
    pub title: String,
    /// Body text
    pub content: Option<String>,
    /// Attached files
    pub attachments: Vec<NoteAttachment>,
}

/// Fields of a class slot to create
#[derive(Debug, Clone, Default)]
pub struct NewSchedule {
    /// Discipline taught
    pub discipline_id: String,
    /// Day of week, 0 = Sunday
    pub weekday: u8,
    /// Start time "HH:MM"
    pub start: String,
    /// End time "HH:MM"
    pub end: String,
    /// Room or building
    pub location: Option<String>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn not_found(kind: &'static str, id: &str) -> OrganizerError {
    OrganizerError::NotFound {
        kind,
        id: id.to_string(),
    }
}

/// Owns a repository and the current snapshot of its data
#[derive(Debug)]
pub struct Organizer<R: Repository> {
    repo: R,
    profile: Option<Profile>,
    disciplines: Vec<Discipline>,
    notes: Vec<Note>,
    schedule: Vec<ClassSchedule>,
    tasks: Vec<Task>,
}

impl<R: Repository> Organizer<R> {
    /// Load every collection from `repo`
    ///
    /// # Errors
    /// Returns an error if any collection cannot be loaded
    pub fn open(repo: R) -> Result<Self, OrganizerError> {
        let mut organizer = Self {
            repo,
            profile: None,
            disciplines: Vec::new(),
            notes: Vec::new(),
            schedule: Vec::new(),
            tasks: Vec::new(),
        };
        organizer.refresh()?;
        Ok(organizer)
    }

    /// Reload the snapshot from the repository
    ///
    /// # Errors
    /// Returns an error if any collection cannot be loaded
    pub fn refresh(&mut self) -> Result<(), OrganizerError> {
        self.profile = self.repo.load_profile()?;
        self.disciplines = self.repo.load_disciplines()?;
        self.notes = self.repo.load_notes()?;
        self.tasks = self.repo.load_tasks()?;
        self.schedule = self.repo.load_schedule()?;
        logger::debug!(
            "Loaded {} disciplines, {} tasks, {} notes, {} schedule entries",
            self.disciplines.len(),
            self.tasks.len(),
            self.notes.len(),
            self.schedule.len()
        );
        Ok(())
    }

    /// Underlying repository
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repo
    }

    /// Student profile
    #[must_use]
    pub const fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// All disciplines, newest first
    #[must_use]
    pub fn disciplines(&self) -> &[Discipline] {
        &self.disciplines
    }

    /// All notes, newest first
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// All class slots in insertion order
    #[must_use]
    pub fn schedule(&self) -> &[ClassSchedule] {
        &self.schedule
    }

    /// All tasks in insertion order
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a discipline
    #[must_use]
    pub fn discipline(&self, id: &str) -> Option<&Discipline> {
        self.disciplines.iter().find(|d| d.id == id)
    }

    /// Look up a task
    #[must_use]
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn require_discipline(&self, id: &str) -> Result<&Discipline, OrganizerError> {
        self.discipline(id).ok_or_else(|| not_found("discipline", id))
    }

    // --- profile ---------------------------------------------------------

    /// Replace (or clear) the student profile
    ///
    /// # Errors
    /// Returns an error if the profile cannot be saved
    pub fn set_profile(&mut self, profile: Option<Profile>) -> Result<(), OrganizerError> {
        self.repo.save_profile(profile.as_ref())?;
        self.profile = profile;
        Ok(())
    }

    // --- disciplines -----------------------------------------------------

    /// Create a discipline; it is placed first in the list
    ///
    /// # Errors
    /// Returns an error if the name is blank, the grading scheme is invalid or
    /// saving fails
    pub fn add_discipline(&mut self, draft: NewDiscipline) -> Result<&Discipline, OrganizerError> {
        if draft.name.trim().is_empty() {
            return Err(OrganizerError::Invalid(
                "discipline name cannot be empty".to_string(),
            ));
        }
        if let Some(grading) = &draft.grading {
            validate_grading_scheme(grading)?;
        }
        let discipline = Discipline {
            id: new_id(),
            name: draft.name.trim().to_string(),
            professor: draft.professor,
            code: draft.code,
            created_at: now_millis(),
            grading: draft.grading,
        };

        let mut next = Vec::with_capacity(self.disciplines.len() + 1);
        next.push(discipline);
        next.extend(self.disciplines.iter().cloned());
        self.repo.save_disciplines(&next)?;
        self.disciplines = next;
        logger::info!("Added discipline '{}'", self.disciplines[0].name);
        Ok(&self.disciplines[0])
    }

    /// Apply `patch` to a discipline. The id and creation time are kept.
    ///
    /// # Errors
    /// Returns an error if the discipline does not exist, the patched grading
    /// scheme is invalid or saving fails
    pub fn update_discipline<F>(&mut self, id: &str, patch: F) -> Result<(), OrganizerError>
    where
        F: FnOnce(&mut Discipline),
    {
        let idx = self
            .disciplines
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| not_found("discipline", id))?;

        let mut updated = self.disciplines[idx].clone();
        patch(&mut updated);
        updated.id.clone_from(&self.disciplines[idx].id);
        updated.created_at = self.disciplines[idx].created_at;
        if let Some(grading) = &updated.grading {
            validate_grading_scheme(grading)?;
        }

        let mut next = self.disciplines.clone();
        next[idx] = updated;
        self.repo.save_disciplines(&next)?;
        self.disciplines = next;
        Ok(())
    }

    /// Replace a discipline's grading scheme
    ///
    /// # Errors
    /// See [`update_discipline`](Self::update_discipline)
    pub fn set_grading(
        &mut self,
        id: &str,
        grading: Option<GradingScheme>,
    ) -> Result<(), OrganizerError> {
        self.update_discipline(id, |d| d.grading = grading)
    }

    /// Delete a discipline and its notes. Tasks and class slots are kept.
    ///
    /// Disciplines are saved before notes. If the notes save fails the
    /// discipline is already gone and its notes stay behind as orphans, which
    /// every reader tolerates.
    ///
    /// # Errors
    /// Returns an error if the discipline does not exist or saving fails
    pub fn remove_discipline(&mut self, id: &str) -> Result<(), OrganizerError> {
        self.require_discipline(id)?;

        let next: Vec<Discipline> = self
            .disciplines
            .iter()
            .filter(|d| d.id != id)
            .cloned()
            .collect();
        self.repo.save_disciplines(&next)?;
        self.disciplines = next;

        let next_notes: Vec<Note> = self
            .notes
            .iter()
            .filter(|n| n.discipline_id != id)
            .cloned()
            .collect();
        self.repo.save_notes(&next_notes)?;
        self.notes = next_notes;
        logger::info!("Removed discipline {id}");
        Ok(())
    }

    // --- tasks -----------------------------------------------------------

    /// Validate a new or patched task. Links to the discipline and component
    /// are only checked when they are new, so tasks left behind by a removed
    /// discipline or component stay editable.
    fn check_task(&self, task: &Task, previous: Option<&Task>) -> Result<(), OrganizerError> {
        if task.title.trim().is_empty() {
            return Err(OrganizerError::Invalid(
                "task title cannot be empty".to_string(),
            ));
        }
        let relinked = previous.map_or(true, |p| {
            p.discipline_id != task.discipline_id || p.component_id != task.component_id
        });
        if relinked {
            let discipline = self.require_discipline(&task.discipline_id)?;
            validate_task_grade(task, discipline)?;
        } else {
            validate_grade_fields(task)?;
        }
        Ok(())
    }

    /// Create a task; it is appended to the list
    ///
    /// # Errors
    /// Returns an error if the discipline does not exist, the grade fields are
    /// invalid or saving fails
    pub fn add_task(&mut self, draft: NewTask) -> Result<&Task, OrganizerError> {
        let task = Task {
            id: new_id(),
            discipline_id: draft.discipline_id,
            kind: draft.kind,
            title: draft.title.trim().to_string(),
            due_date: draft.due_date,
            notes: draft.notes,
            created_at: now_millis(),
            grade: draft.grade,
            grade_max: draft.grade_max,
            component_id: draft.component_id,
        };
        self.check_task(&task, None)?;

        let mut next = self.tasks.clone();
        next.push(task);
        self.repo.save_tasks(&next)?;
        self.tasks = next;
        let added = &self.tasks[self.tasks.len() - 1];
        logger::info!("Added task '{}'", added.title);
        Ok(added)
    }

    /// Apply `patch` to a task. The id and creation time are kept.
    ///
    /// # Errors
    /// Returns an error if the task does not exist, the patched task fails
    /// validation or saving fails
    pub fn update_task<F>(&mut self, id: &str, patch: F) -> Result<(), OrganizerError>
    where
        F: FnOnce(&mut Task),
    {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| not_found("task", id))?;

        let mut updated = self.tasks[idx].clone();
        patch(&mut updated);
        updated.id.clone_from(&self.tasks[idx].id);
        updated.created_at = self.tasks[idx].created_at;
        self.check_task(&updated, Some(&self.tasks[idx]))?;

        let mut next = self.tasks.clone();
        next[idx] = updated;
        self.repo.save_tasks(&next)?;
        self.tasks = next;
        Ok(())
    }

    /// Record (or clear, with `None`) a task's grade
    ///
    /// # Errors
    /// See [`update_task`](Self::update_task)
    pub fn grade_task(
        &mut self,
        id: &str,
        grade: Option<f64>,
        grade_max: Option<f64>,
    ) -> Result<(), OrganizerError> {
        self.update_task(id, |t| {
            t.grade = grade;
            t.grade_max = grade_max;
        })
    }

    /// Delete a task
    ///
    /// # Errors
    /// Returns an error if the task does not exist or saving fails
    pub fn remove_task(&mut self, id: &str) -> Result<(), OrganizerError> {
        if self.task(id).is_none() {
            return Err(not_found("task", id));
        }
        let next: Vec<Task> = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        self.repo.save_tasks(&next)?;
        self.tasks = next;
        Ok(())
    }

    /// All tasks sorted by due date (stable for equal dates)
    #[must_use]
    pub fn tasks_by_due_date(&self) -> Vec<&Task> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        sorted.sort_by_key(|t| t.due_date);
        sorted
    }

    /// Up to `limit` tasks due strictly after `now`, soonest first
    #[must_use]
    pub fn upcoming_tasks(&self, now: DateTime<Utc>, limit: usize) -> Vec<&Task> {
        self.tasks_by_due_date()
            .into_iter()
            .filter(|t| t.due_date > now)
            .take(limit)
            .collect()
    }

    // --- notes -----------------------------------------------------------

    /// Create a note; it is placed first in the list
    ///
    /// # Errors
    /// Returns an error if the discipline does not exist or saving fails
    pub fn add_note(&mut self, draft: NewNote) -> Result<&Note, OrganizerError> {
        self.require_discipline(&draft.discipline_id)?;
        let note = Note {
            id: new_id(),
            discipline_id: draft.discipline_id,
            title: draft.title,
            content: draft.content,
            attachments: draft.attachments,
            created_at: now_millis(),
            updated_at: None,
        };

        let mut next = Vec::with_capacity(self.notes.len() + 1);
        next.push(note);
        next.extend(self.notes.iter().cloned());
        self.repo.save_notes(&next)?;
        self.notes = next;
        Ok(&self.notes[0])
    }

    /// Apply `patch` to a note and stamp `updated_at`
    ///
    /// # Errors
    /// Returns an error if the note does not exist or saving fails
    pub fn update_note<F>(&mut self, id: &str, patch: F) -> Result<(), OrganizerError>
    where
        F: FnOnce(&mut Note),
    {
        let idx = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| not_found("note", id))?;

        let mut updated = self.notes[idx].clone();
        patch(&mut updated);
        updated.id.clone_from(&self.notes[idx].id);
        updated.created_at = self.notes[idx].created_at;
        updated.updated_at = Some(now_millis());

        let mut next = self.notes.clone();
        next[idx] = updated;
        self.repo.save_notes(&next)?;
        self.notes = next;
        Ok(())
    }

    /// Delete a note
    ///
    /// # Errors
    /// Returns an error if the note does not exist or saving fails
    pub fn remove_note(&mut self, id: &str) -> Result<(), OrganizerError> {
        if !self.notes.iter().any(|n| n.id == id) {
            return Err(not_found("note", id));
        }
        let next: Vec<Note> = self.notes.iter().filter(|n| n.id != id).cloned().collect();
        self.repo.save_notes(&next)?;
        self.notes = next;
        Ok(())
    }

    // --- schedule --------------------------------------------------------

    fn check_slot(slot: &ClassSchedule) -> Result<(), OrganizerError> {
        if slot.weekday > 6 {
            return Err(OrganizerError::Invalid(format!(
                "weekday must be 0 (Sunday) to 6 (Saturday), got {}",
                slot.weekday
            )));
        }
        let start = slot
            .start_minutes()
            .ok_or_else(|| OrganizerError::Invalid(format!("invalid start time '{}'", slot.start)))?;
        let end = slot
            .end_minutes()
            .ok_or_else(|| OrganizerError::Invalid(format!("invalid end time '{}'", slot.end)))?;
        if start >= end {
            return Err(OrganizerError::Invalid(format!(
                "class must end after it starts ({} - {})",
                slot.start, slot.end
            )));
        }
        Ok(())
    }

    /// Create a class slot; it is appended to the schedule
    ///
    /// # Errors
    /// Returns an error if the discipline does not exist, the times are
    /// invalid or saving fails
    pub fn add_schedule(&mut self, draft: NewSchedule) -> Result<&ClassSchedule, OrganizerError> {
        self.require_discipline(&draft.discipline_id)?;
        let slot = ClassSchedule {
            id: new_id(),
            discipline_id: draft.discipline_id,
            weekday: draft.weekday,
            start: draft.start,
            end: draft.end,
            location: draft.location,
        };
        Self::check_slot(&slot)?;

        let mut next = self.schedule.clone();
        next.push(slot);
        self.repo.save_schedule(&next)?;
        self.schedule = next;
        Ok(&self.schedule[self.schedule.len() - 1])
    }

    /// Apply `patch` to a class slot. The id is kept.
    ///
    /// # Errors
    /// Returns an error if the slot does not exist, the patched times are
    /// invalid or saving fails
    pub fn update_schedule<F>(&mut self, id: &str, patch: F) -> Result<(), OrganizerError>
    where
        F: FnOnce(&mut ClassSchedule),
    {
        let idx = self
            .schedule
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| not_found("schedule entry", id))?;

        let mut updated = self.schedule[idx].clone();
        patch(&mut updated);
        updated.id.clone_from(&self.schedule[idx].id);
        Self::check_slot(&updated)?;

        let mut next = self.schedule.clone();
        next[idx] = updated;
        self.repo.save_schedule(&next)?;
        self.schedule = next;
        Ok(())
    }

    /// Delete a class slot
    ///
    /// # Errors
    /// Returns an error if the slot does not exist or saving fails
    pub fn remove_schedule(&mut self, id: &str) -> Result<(), OrganizerError> {
        if !self.schedule.iter().any(|s| s.id == id) {
            return Err(not_found("schedule entry", id));
        }
        let next: Vec<ClassSchedule> = self
            .schedule
            .iter()
            .filter(|s| s.id != id)
            .cloned()
            .collect();
        self.repo.save_schedule(&next)?;
        self.schedule = next;
        Ok(())
    }

    /// Class slots ordered by weekday, then start time
    #[must_use]
    pub fn weekly_schedule(&self) -> Vec<&ClassSchedule> {
        let mut sorted: Vec<&ClassSchedule> = self.schedule.iter().collect();
        sorted.sort_by(|a, b| a.weekday.cmp(&b.weekday).then_with(|| a.start.cmp(&b.start)));
        sorted
    }

    // --- read models -----------------------------------------------------

    /// Averages for every discipline, using `default_threshold` where a
    /// discipline defines none
    #[must_use]
    pub fn averages_overview(&self, default_threshold: f64) -> Vec<DisciplineReport> {
        overview::build_overview(&self.disciplines, &self.tasks, default_threshold)
    }

    /// Search disciplines, tasks and notes
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<SearchHit> {
        overview::search(term, &self.disciplines, &self.tasks, &self.notes)
    }
}
