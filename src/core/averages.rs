//! Weighted grade averaging
//!
//! Turns a discipline's grading scheme and its tasks into per-component
//! averages and an overall weighted average, all on the discipline's scale.
//! Both functions are pure: they never fail, never mutate their inputs and
//! represent missing data as `None`.

use crate::core::models::{Discipline, Task, DEFAULT_SCALE_MAX};
use serde::Serialize;

/// Average of one grading component
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentAverage {
    /// Component id from the grading scheme
    pub component_id: String,
    /// Component label
    pub label: String,
    /// Component weight (percentage points)
    pub weight: f64,
    /// Mean of the normalized grades, rounded to 2 decimals; `None` when no
    /// task on this component has a grade
    pub media: Option<f64>,
}

/// Result of averaging one discipline
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineAverage {
    /// Weighted average on the discipline's scale, rounded to 2 decimals
    pub media: Option<f64>,
    /// One entry per component, in the scheme's declared order
    pub per_component: Vec<ComponentAverage>,
}

impl DisciplineAverage {
    /// Result for a discipline without a usable grading scheme
    #[must_use]
    pub const fn ungraded() -> Self {
        Self {
            media: None,
            per_component: Vec::new(),
        }
    }
}

/// Rescale `value` from a `0..=from_max` scale to a `0..=to_max` scale.
///
/// Returns `0.0` when `value` or `from_max` is not finite, or when
/// `from_max <= 0`. No rounding is applied.
#[must_use]
pub fn normalize_grade(value: f64, from_max: f64, to_max: f64) -> f64 {
    if !value.is_finite() || !from_max.is_finite() || from_max <= 0.0 {
        return 0.0;
    }
    (value / from_max) * to_max
}

/// Round to 2 decimal places, half away from zero.
///
/// The value is scaled by 100 before rounding, so a binary value sitting just
/// below a half (`1.525` is stored as `1.52499…`) still rounds up to `1.53`.
/// Shared by component and overall averages so both round identically.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

struct Bucket<'a> {
    id: &'a str,
    label: &'a str,
    weight: f64,
    grades: Vec<f64>,
}

/// Compute a discipline's component averages and weighted overall average.
///
/// Tasks without a grade, without a component id, or pointing at a component
/// the scheme does not declare are ignored. Each grade is normalized from the
/// task's own `grade_max` (default 10) to the discipline's `scale_max`
/// (default 10) before averaging.
///
/// The overall average is `(Σ (avg / scale_max) * weight) / 100 * scale_max`
/// over the components that received at least one grade. The divisor is the
/// constant 100: a discipline where only a 60% component is graded reports
/// at most 60% of the scale. When no component has a grade the overall
/// average is `None` but the per-component entries are still returned.
#[must_use]
pub fn compute_discipline_average<'a, I>(discipline: &Discipline, tasks: I) -> DisciplineAverage
where
    I: IntoIterator<Item = &'a Task>,
{
    let Some(scheme) = discipline
        .grading
        .as_ref()
        .filter(|g| !g.components.is_empty())
    else {
        return DisciplineAverage::ungraded();
    };
    let scale_max = scheme.scale_max.unwrap_or(DEFAULT_SCALE_MAX);

    // A repeated id keeps its first position and takes the later label/weight.
    let mut buckets: Vec<Bucket> = Vec::with_capacity(scheme.components.len());
    for component in &scheme.components {
        if let Some(existing) = buckets.iter_mut().find(|b| b.id == component.id) {
            existing.label = &component.label;
            existing.weight = component.weight;
        } else {
            buckets.push(Bucket {
                id: &component.id,
                label: &component.label,
                weight: component.weight,
                grades: Vec::new(),
            });
        }
    }

    for task in tasks {
        let Some(grade) = task.grade else {
            continue;
        };
        let Some(component_id) = task.component_id.as_deref().filter(|id| !id.is_empty())
        else {
            continue;
        };
        let Some(bucket) = buckets.iter_mut().find(|b| b.id == component_id) else {
            continue;
        };
        bucket
            .grades
            .push(normalize_grade(grade, task.effective_grade_max(), scale_max));
    }

    let mut weighted_percent = 0.0;
    let mut total_weight = 0.0;

    let per_component: Vec<ComponentAverage> = buckets
        .into_iter()
        .map(|bucket| {
            let media = mean(&bucket.grades).map(round2);
            if let Some(avg) = media {
                weighted_percent += (avg / scale_max) * bucket.weight;
                total_weight += bucket.weight;
            }
            ComponentAverage {
                component_id: bucket.id.to_string(),
                label: bucket.label.to_string(),
                weight: bucket.weight,
                media,
            }
        })
        .collect();

    #[allow(clippy::float_cmp)]
    let media = if total_weight == 0.0 {
        None
    } else {
        Some(round2((weighted_percent / 100.0) * scale_max))
    };

    DisciplineAverage {
        media,
        per_component,
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
