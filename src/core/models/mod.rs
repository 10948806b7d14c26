//! Data models for `noto`

pub mod discipline;
pub mod note;
pub mod profile;
pub mod schedule;
pub mod task;

pub use discipline::{
    AssessmentComponent, Discipline, GradingScheme, DEFAULT_APPROVAL_THRESHOLD,
    DEFAULT_SCALE_MAX,
};
pub use note::{Note, NoteAttachment};
pub use profile::Profile;
pub use schedule::ClassSchedule;
pub use task::{Task, TaskKind};
