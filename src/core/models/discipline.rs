//! Discipline and grading-scheme models

use serde::{Deserialize, Serialize};

/// Grade ceiling used when a scheme or a task does not carry one
pub const DEFAULT_SCALE_MAX: f64 = 10.0;

/// Approval threshold shown when a discipline does not define one
pub const DEFAULT_APPROVAL_THRESHOLD: f64 = 6.0;

/// One weighted piece of a discipline's grading formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentComponent {
    /// Stable reference key used by tasks (`Task::component_id`)
    pub id: String,

    /// Display name (e.g., "Provas", "Trabalhos")
    pub label: String,

    /// Percentage points (0..=100)
    pub weight: f64,
}

impl AssessmentComponent {
    /// Create a new component
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            weight,
        }
    }
}

/// The weighted formula a discipline's final average is computed with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingScheme {
    /// Components in declared order; this order drives report output
    #[serde(default)]
    pub components: Vec<AssessmentComponent>,

    /// Minimum average required to pass (display only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_threshold: Option<f64>,

    /// Numeric ceiling of grades for this discipline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_max: Option<f64>,
}

impl GradingScheme {
    /// Create a scheme from its components, with default scale and threshold
    #[must_use]
    pub const fn new(components: Vec<AssessmentComponent>) -> Self {
        Self {
            components,
            approval_threshold: None,
            scale_max: None,
        }
    }

    /// Set the grade ceiling
    #[must_use]
    pub const fn with_scale_max(mut self, scale_max: f64) -> Self {
        self.scale_max = Some(scale_max);
        self
    }

    /// Set the approval threshold
    #[must_use]
    pub const fn with_approval_threshold(mut self, threshold: f64) -> Self {
        self.approval_threshold = Some(threshold);
        self
    }

    /// Grade ceiling, falling back to [`DEFAULT_SCALE_MAX`]
    #[must_use]
    pub fn effective_scale_max(&self) -> f64 {
        self.scale_max.unwrap_or(DEFAULT_SCALE_MAX)
    }

    /// Look up a component by id
    #[must_use]
    pub fn component(&self, id: &str) -> Option<&AssessmentComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Sum of all component weights
    #[must_use]
    pub fn weight_sum(&self) -> f64 {
        self.components.iter().map(|c| c.weight).sum()
    }
}

/// A course/subject the student is enrolled in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discipline {
    /// Unique identifier
    pub id: String,

    /// Display name (e.g., "Cálculo I")
    pub name: String,

    /// Professor name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor: Option<String>,

    /// Course code (e.g., "MAT101")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Creation time, milliseconds since the Unix epoch
    pub created_at: i64,

    /// Grading formula; `None` means the discipline is not graded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grading: Option<GradingScheme>,
}

impl Discipline {
    /// Create a discipline without professor, code or grading
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            professor: None,
            code: None,
            created_at,
            grading: None,
        }
    }

    /// Attach a grading scheme
    #[must_use]
    pub fn with_grading(mut self, grading: GradingScheme) -> Self {
        self.grading = Some(grading);
        self
    }

    /// Grade ceiling of this discipline (default 10)
    #[must_use]
    pub fn scale_max(&self) -> f64 {
        self.grading
            .as_ref()
            .map_or(DEFAULT_SCALE_MAX, GradingScheme::effective_scale_max)
    }

    /// Approval threshold, or `default` when the scheme has none
    #[must_use]
    pub fn approval_threshold_or(&self, default: f64) -> f64 {
        self.grading
            .as_ref()
            .and_then(|g| g.approval_threshold)
            .unwrap_or(default)
    }
}
