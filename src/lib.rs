//! `noto` library: the weighted grade-averaging core plus the organizer
//! plumbing (models, local store, exports, configuration) used by the CLI.

pub mod core;

pub use core::averages::{
    compute_discipline_average, normalize_grade, ComponentAverage, DisciplineAverage,
};
pub use core::config;
pub use core::organizer::{Organizer, OrganizerError};
pub use core::store::{JsonStore, MemoryStore, Repository};
