//! Data-entry checks for grading schemes and task grades
//!
//! The averaging core accepts any scheme and degrades gracefully; these
//! checks run where data is entered so stored schemes stay well formed.

use crate::core::models::{Discipline, GradingScheme, Task};
use std::collections::HashSet;
use thiserror::Error;

/// Tolerance used when checking that weights add up to 100
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Reasons a grading scheme or grade entry is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradingError {
    /// Component weights must add up to exactly 100
    #[error("component weights must sum to 100% (got {0}%)")]
    WeightSum(f64),
    /// A single weight is negative, above 100 or not finite
    #[error("weight of component '{id}' must be between 0 and 100 (got {weight})")]
    WeightOutOfRange {
        /// Offending component id
        id: String,
        /// Offending weight
        weight: f64,
    },
    /// A component has an empty label
    #[error("component '{0}' needs a label")]
    BlankLabel(String),
    /// Two components share an id
    #[error("component id '{0}' is used more than once")]
    DuplicateComponent(String),
    /// The scale ceiling is not a positive finite number
    #[error("grade scale must be a positive number (got {0})")]
    InvalidScale(f64),
    /// The approval threshold is outside `0..=scale_max`
    #[error("approval threshold {threshold} must be between 0 and {scale_max}")]
    ThresholdOutOfRange {
        /// Offending threshold
        threshold: f64,
        /// Scale it was checked against
        scale_max: f64,
    },
    /// A grade is negative or not finite
    #[error("grade must be a non-negative number (got {0})")]
    InvalidGrade(f64),
    /// A task links to a component its discipline does not declare
    #[error("discipline has no grading component '{0}'")]
    UnknownComponent(String),
}

/// Check a grading scheme before it is stored.
///
/// An empty component list is accepted and means "not graded".
///
/// # Errors
///
/// Returns the first [`GradingError`] found.
pub fn validate_grading_scheme(scheme: &GradingScheme) -> Result<(), GradingError> {
    let scale_max = match scheme.scale_max {
        Some(s) if !s.is_finite() || s <= 0.0 => return Err(GradingError::InvalidScale(s)),
        _ => scheme.effective_scale_max(),
    };

    if let Some(threshold) = scheme.approval_threshold {
        if !threshold.is_finite() || threshold < 0.0 || threshold > scale_max {
            return Err(GradingError::ThresholdOutOfRange {
                threshold,
                scale_max,
            });
        }
    }

    let mut seen = HashSet::new();
    for component in &scheme.components {
        if !seen.insert(component.id.as_str()) {
            return Err(GradingError::DuplicateComponent(component.id.clone()));
        }
        if component.label.trim().is_empty() {
            return Err(GradingError::BlankLabel(component.id.clone()));
        }
        if !component.weight.is_finite() || !(0.0..=100.0).contains(&component.weight) {
            return Err(GradingError::WeightOutOfRange {
                id: component.id.clone(),
                weight: component.weight,
            });
        }
    }

    if !scheme.components.is_empty() {
        let sum = scheme.weight_sum();
        if (sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(GradingError::WeightSum(sum));
        }
    }

    Ok(())
}

/// Check a task's `grade` and `grade_max` on their own.
///
/// # Errors
///
/// Returns [`GradingError::InvalidScale`] for a bad `grade_max` and
/// [`GradingError::InvalidGrade`] for a bad grade.
pub fn validate_grade_fields(task: &Task) -> Result<(), GradingError> {
    if let Some(max) = task.grade_max {
        if !max.is_finite() || max <= 0.0 {
            return Err(GradingError::InvalidScale(max));
        }
    }
    if let Some(grade) = task.grade {
        if !grade.is_finite() || grade < 0.0 {
            return Err(GradingError::InvalidGrade(grade));
        }
    }
    Ok(())
}

/// Check a task's grade fields against its discipline.
///
/// # Errors
///
/// Returns [`GradingError::InvalidScale`] for a bad `grade_max`,
/// [`GradingError::InvalidGrade`] for a bad grade and
/// [`GradingError::UnknownComponent`] when `component_id` is not declared by
/// the discipline's scheme.
pub fn validate_task_grade(task: &Task, discipline: &Discipline) -> Result<(), GradingError> {
    validate_grade_fields(task)?;
    if let Some(component_id) = task.component_id.as_deref() {
        let known = discipline
            .grading
            .as_ref()
            .is_some_and(|g| g.component(component_id).is_some());
        if !known {
            return Err(GradingError::UnknownComponent(component_id.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{AssessmentComponent, TaskKind};
    use chrono::Utc;

    fn components(weights: &[f64]) -> Vec<AssessmentComponent> {
        weights
            .iter()
            .enumerate()
            .map(|(i, w)| AssessmentComponent::new(format!("c{i}"), format!("Parte {i}"), *w))
            .collect()
    }

    #[test]
    fn accepts_weights_summing_to_100() {
        let scheme = GradingScheme::new(components(&[60.0, 40.0]))
            .with_scale_max(10.0)
            .with_approval_threshold(6.0);
        assert_eq!(validate_grading_scheme(&scheme), Ok(()));
    }

    #[test]
    fn accepts_empty_scheme() {
        assert_eq!(validate_grading_scheme(&GradingScheme::default()), Ok(()));
    }

    #[test]
    fn rejects_bad_weight_sum() {
        let scheme = GradingScheme::new(components(&[60.0, 30.0]));
        assert_eq!(
            validate_grading_scheme(&scheme),
            Err(GradingError::WeightSum(90.0))
        );
    }

    #[test]
    fn rejects_weight_out_of_range() {
        let scheme = GradingScheme::new(components(&[120.0, -20.0]));
        assert!(matches!(
            validate_grading_scheme(&scheme),
            Err(GradingError::WeightOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_and_blank_components() {
        let mut parts = components(&[50.0, 50.0]);
        parts[1].id = "c0".to_string();
        assert_eq!(
            validate_grading_scheme(&GradingScheme::new(parts)),
            Err(GradingError::DuplicateComponent("c0".to_string()))
        );

        let mut parts = components(&[100.0]);
        parts[0].label = "  ".to_string();
        assert_eq!(
            validate_grading_scheme(&GradingScheme::new(parts)),
            Err(GradingError::BlankLabel("c0".to_string()))
        );
    }

    #[test]
    fn rejects_bad_scale_and_threshold() {
        let scheme = GradingScheme::new(components(&[100.0])).with_scale_max(0.0);
        assert_eq!(
            validate_grading_scheme(&scheme),
            Err(GradingError::InvalidScale(0.0))
        );

        let scheme = GradingScheme::new(components(&[100.0])).with_approval_threshold(11.0);
        assert!(matches!(
            validate_grading_scheme(&scheme),
            Err(GradingError::ThresholdOutOfRange { .. })
        ));
    }

    #[test]
    fn validates_task_grades() {
        let discipline = Discipline::new("d1", "Física", 0)
            .with_grading(GradingScheme::new(components(&[100.0])));
        let task = Task::new("t1", "d1", TaskKind::Prova, "P1", Utc::now());

        assert_eq!(validate_task_grade(&task, &discipline), Ok(()));
        assert_eq!(
            validate_task_grade(&task.clone().with_grade(8.0, 0.0), &discipline),
            Err(GradingError::InvalidScale(0.0))
        );
        assert_eq!(
            validate_task_grade(&task.clone().with_grade(-1.0, 10.0), &discipline),
            Err(GradingError::InvalidGrade(-1.0))
        );
        assert_eq!(
            validate_task_grade(&task.clone().with_component("c9"), &discipline),
            Err(GradingError::UnknownComponent("c9".to_string()))
        );
        assert_eq!(
            validate_task_grade(&task.with_component("c0").with_grade(9.0, 10.0), &discipline),
            Ok(())
        );
    }
}
