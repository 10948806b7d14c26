//! Task model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::discipline::DEFAULT_SCALE_MAX;

/// Kind of gradeable activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Exam
    Prova,
    /// Assignment
    Trabalho,
    /// Project
    Projeto,
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prova" | "exam" => Ok(Self::Prova),
            "trabalho" | "assignment" => Ok(Self::Trabalho),
            "projeto" | "project" => Ok(Self::Projeto),
            _ => Err(format!("Unknown task type: {s}")),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prova => write!(f, "prova"),
            Self::Trabalho => write!(f, "trabalho"),
            Self::Projeto => write!(f, "projeto"),
        }
    }
}

/// A gradeable activity belonging to exactly one discipline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: String,

    /// Owning discipline (reference, not ownership)
    pub discipline_id: String,

    /// Activity kind
    #[serde(rename = "type")]
    pub kind: TaskKind,

    /// Title shown in lists
    pub title: String,

    /// Due date (UTC)
    pub due_date: DateTime<Utc>,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Creation time, milliseconds since the Unix epoch
    pub created_at: i64,

    /// Raw score; `None` means not graded yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<f64>,

    /// Scale the raw grade was entered on (default 10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_max: Option<f64>,

    /// Grading component this task counts towards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
}

impl Task {
    /// Create an ungraded task with no component link
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        discipline_id: impl Into<String>,
        kind: TaskKind,
        title: impl Into<String>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            discipline_id: discipline_id.into(),
            kind,
            title: title.into(),
            due_date,
            notes: None,
            created_at: 0,
            grade: None,
            grade_max: None,
            component_id: None,
        }
    }

    /// Link to a grading component
    #[must_use]
    pub fn with_component(mut self, component_id: impl Into<String>) -> Self {
        self.component_id = Some(component_id.into());
        self
    }

    /// Record a grade on the given scale
    #[must_use]
    pub const fn with_grade(mut self, grade: f64, grade_max: f64) -> Self {
        self.grade = Some(grade);
        self.grade_max = Some(grade_max);
        self
    }

    /// Scale the raw grade was entered on, falling back to 10
    #[must_use]
    pub fn effective_grade_max(&self) -> f64 {
        self.grade_max.unwrap_or(DEFAULT_SCALE_MAX)
    }

    /// Whether a grade has been recorded
    #[must_use]
    pub const fn is_graded(&self) -> bool {
        self.grade.is_some()
    }
}
