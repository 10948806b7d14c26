//! Per-discipline averages overview and text search over a data snapshot

use crate::core::averages::{compute_discipline_average, ComponentAverage, DisciplineAverage};
use crate::core::models::{Discipline, Note, Task};
use serde::Serialize;
use std::fmt;

/// Pass/fail standing of a discipline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    /// No overall average could be formed
    Ungraded,
    /// Average is at or above the approval threshold
    Passing,
    /// Average is below the approval threshold
    Failing,
}

impl Standing {
    /// Classify an average against a threshold
    #[must_use]
    pub fn classify(media: Option<f64>, min_required: f64) -> Self {
        match media {
            None => Self::Ungraded,
            Some(m) if m >= min_required => Self::Passing,
            Some(_) => Self::Failing,
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ungraded => write!(f, "ungraded"),
            Self::Passing => write!(f, "passing"),
            Self::Failing => write!(f, "failing"),
        }
    }
}

/// One row of the averages overview
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineReport {
    /// Discipline id
    pub discipline_id: String,
    /// Discipline name
    pub name: String,
    /// Weighted average on the discipline's scale
    pub media: Option<f64>,
    /// Approval threshold in effect
    pub min_required: f64,
    /// Discipline scale ceiling
    pub scale_max: f64,
    /// Component breakdown
    pub per_component: Vec<ComponentAverage>,
    /// Pass/fail standing
    pub standing: Standing,
}

impl DisciplineReport {
    /// Build a row from a discipline and its computed average
    #[must_use]
    pub fn new(discipline: &Discipline, average: DisciplineAverage, default_threshold: f64) -> Self {
        let min_required = discipline.approval_threshold_or(default_threshold);
        Self {
            discipline_id: discipline.id.clone(),
            name: discipline.name.clone(),
            media: average.media,
            min_required,
            scale_max: discipline.scale_max(),
            per_component: average.per_component,
            standing: Standing::classify(average.media, min_required),
        }
    }

    /// `"8.4/10"`, or `"—"` when there is no average
    #[must_use]
    pub fn media_label(&self) -> String {
        format_on_scale(self.media, self.scale_max)
    }
}

/// Format a value as `value/scale`, or `—` when absent
#[must_use]
pub fn format_on_scale(value: Option<f64>, scale_max: f64) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{v}/{scale_max}"))
}

/// Average every discipline against its own tasks, in discipline order
#[must_use]
pub fn build_overview(
    disciplines: &[Discipline],
    tasks: &[Task],
    default_threshold: f64,
) -> Vec<DisciplineReport> {
    disciplines
        .iter()
        .map(|d| {
            let average =
                compute_discipline_average(d, tasks.iter().filter(|t| t.discipline_id == d.id));
            logger::debug!("Average for '{}': {:?}", d.name, average.media);
            DisciplineReport::new(d, average, default_threshold)
        })
        .collect()
}

/// Kind of entity a search hit points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HitKind {
    /// A discipline matched by name or professor
    Discipline,
    /// A task matched by title or notes
    Task,
    /// A note matched by title or content
    Note,
}

impl fmt::Display for HitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discipline => write!(f, "discipline"),
            Self::Task => write!(f, "task"),
            Self::Note => write!(f, "note"),
        }
    }
}

/// A single search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// What matched
    pub kind: HitKind,
    /// Id of the matched entity
    pub id: String,
    /// Title to display
    pub title: String,
    /// Secondary line (professor, discipline name, due date)
    pub subtitle: Option<String>,
}

/// Case-insensitive substring search. Disciplines come first, then tasks,
/// then notes. A blank term yields no hits.
#[must_use]
pub fn search(
    term: &str,
    disciplines: &[Discipline],
    tasks: &[Task],
    notes: &[Note],
) -> Vec<SearchHit> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }
    let discipline_name = |id: &str| {
        disciplines
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.name.clone())
    };

    let mut hits = Vec::new();

    for d in disciplines {
        let by_name = d.name.to_lowercase().contains(&term);
        let by_professor = d
            .professor
            .as_deref()
            .is_some_and(|p| p.to_lowercase().contains(&term));
        if by_name || by_professor {
            hits.push(SearchHit {
                kind: HitKind::Discipline,
                id: d.id.clone(),
                title: d.name.clone(),
                subtitle: d.professor.clone(),
            });
        }
    }

    for t in tasks {
        let text = format!("{} {}", t.title, t.notes.as_deref().unwrap_or(""));
        if text.to_lowercase().contains(&term) {
            let disc = discipline_name(&t.discipline_id).unwrap_or_else(|| "—".to_string());
            hits.push(SearchHit {
                kind: HitKind::Task,
                id: t.id.clone(),
                title: t.title.clone(),
                subtitle: Some(format!("{disc} • {}", t.due_date.format("%d/%m/%Y %H:%M"))),
            });
        }
    }

    for n in notes {
        if n.matches(&term) {
            let title = if n.title.trim().is_empty() {
                "(sem título)".to_string()
            } else {
                n.title.clone()
            };
            hits.push(SearchHit {
                kind: HitKind::Note,
                id: n.id.clone(),
                title,
                subtitle: discipline_name(&n.discipline_id),
            });
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{AssessmentComponent, GradingScheme, TaskKind};
    use chrono::{TimeZone, Utc};

    fn sample() -> (Vec<Discipline>, Vec<Task>, Vec<Note>) {
        let mut calc = Discipline::new("d1", "Cálculo I", 0).with_grading(
            GradingScheme::new(vec![AssessmentComponent::new("c1", "Provas", 100.0)])
                .with_approval_threshold(7.0),
        );
        calc.professor = Some("Ana Souza".to_string());
        let hist = Discipline::new("d2", "História", 0);

        let due = Utc.with_ymd_and_hms(2025, 5, 2, 14, 30, 0).unwrap();
        let mut p1 = Task::new("t1", "d1", TaskKind::Prova, "P1 limites", due)
            .with_component("c1")
            .with_grade(6.5, 10.0);
        p1.notes = Some("capítulos 1 a 3".to_string());
        let other = Task::new("t2", "d2", TaskKind::Trabalho, "Resenha", due)
            .with_component("c1")
            .with_grade(10.0, 10.0);

        let mut note = Note::new("n1", "d1", "Resumo de limites", 0);
        note.content = Some("Teorema do confronto".to_string());

        (vec![calc, hist], vec![p1, other], vec![note])
    }

    #[test]
    fn overview_filters_tasks_by_discipline() {
        let (disciplines, tasks, _) = sample();
        let rows = build_overview(&disciplines, &tasks, 6.0);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].media, Some(6.5));
        assert!((rows[0].min_required - 7.0).abs() < f64::EPSILON);
        assert_eq!(rows[0].standing, Standing::Failing);
        assert_eq!(rows[0].media_label(), "6.5/10");

        assert_eq!(rows[1].media, None);
        assert!(rows[1].per_component.is_empty());
        assert!((rows[1].min_required - 6.0).abs() < f64::EPSILON);
        assert_eq!(rows[1].standing, Standing::Ungraded);
        assert_eq!(rows[1].media_label(), "—");
    }

    #[test]
    fn standing_threshold_is_inclusive() {
        assert_eq!(Standing::classify(Some(6.0), 6.0), Standing::Passing);
        assert_eq!(Standing::classify(Some(5.99), 6.0), Standing::Failing);
        assert_eq!(Standing::classify(None, 6.0), Standing::Ungraded);
    }

    #[test]
    fn search_matches_every_kind() {
        let (disciplines, tasks, notes) = sample();

        let hits = search("LIMITES", &disciplines, &tasks, &notes);
        let kinds: Vec<HitKind> = hits.iter().map(|h| h.kind).collect();
        assert_eq!(kinds, [HitKind::Task, HitKind::Note]);
        assert_eq!(
            hits[0].subtitle.as_deref(),
            Some("Cálculo I • 02/05/2025 14:30")
        );
        assert_eq!(hits[1].subtitle.as_deref(), Some("Cálculo I"));

        let hits = search("souza", &disciplines, &tasks, &notes);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, HitKind::Discipline);

        assert!(search("   ", &disciplines, &tasks, &notes).is_empty());
    }
}
