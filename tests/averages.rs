//! Integration tests for the weighted averaging core

use chrono::{TimeZone, Utc};
use noto::core::models::{AssessmentComponent, Discipline, GradingScheme, Task, TaskKind};
use noto::{compute_discipline_average, normalize_grade, DisciplineAverage};

fn calculus() -> Discipline {
    Discipline::new("d1", "Cálculo I", 0).with_grading(
        GradingScheme::new(vec![
            AssessmentComponent::new("c1", "Provas", 60.0),
            AssessmentComponent::new("c2", "Trabalhos", 40.0),
        ])
        .with_scale_max(10.0),
    )
}

fn task(id: &str, component: Option<&str>, grade: Option<f64>, grade_max: Option<f64>) -> Task {
    let due = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
    let mut t = Task::new(id, "d1", TaskKind::Prova, id, due);
    t.component_id = component.map(str::to_string);
    t.grade = grade;
    t.grade_max = grade_max;
    t
}

fn medias(result: &DisciplineAverage) -> Vec<Option<f64>> {
    result.per_component.iter().map(|c| c.media).collect()
}

#[test]
fn test_scenario_two_components_graded() {
    let tasks = vec![
        task("t1", Some("c1"), Some(8.0), Some(10.0)),
        task("t2", Some("c2"), Some(9.0), Some(10.0)),
    ];
    let result = compute_discipline_average(&calculus(), &tasks);

    assert_eq!(medias(&result), [Some(8.0), Some(9.0)]);
    assert_eq!(result.media, Some(8.4));
}

#[test]
fn test_scenario_partial_grading_uses_constant_divisor() {
    let tasks = vec![task("t1", Some("c1"), Some(8.0), Some(10.0))];
    let result = compute_discipline_average(&calculus(), &tasks);

    assert_eq!(medias(&result), [Some(8.0), None]);
    assert_eq!(result.media, Some(4.8));
}

#[test]
fn test_scenario_unknown_component_is_ignored() {
    let tasks = vec![
        task("t1", Some("c1"), Some(8.0), Some(10.0)),
        task("t2", Some("c2"), Some(9.0), Some(10.0)),
        task("t3", Some("c9"), Some(0.0), Some(10.0)),
    ];
    let result = compute_discipline_average(&calculus(), &tasks);

    assert_eq!(result.media, Some(8.4));
    assert_eq!(result.per_component.len(), 2);
}

#[test]
fn test_scenario_grade_on_other_scale() {
    let tasks = vec![task("t1", Some("c1"), Some(15.0), Some(20.0))];
    let result = compute_discipline_average(&calculus(), &tasks);

    assert_eq!(result.per_component[0].media, Some(7.5));
    assert_eq!(result.media, Some(4.5));
}

#[test]
fn test_scenario_no_grades() {
    let tasks = vec![
        task("t1", Some("c1"), None, None),
        task("t2", Some("c2"), None, Some(10.0)),
    ];
    let result = compute_discipline_average(&calculus(), &tasks);

    assert_eq!(result.media, None);
    assert_eq!(medias(&result), [None, None]);
    assert_eq!(result.per_component[1].label, "Trabalhos");
}

#[test]
fn test_ungraded_and_unlinked_tasks_do_not_matter() {
    let base = vec![task("t1", Some("c1"), Some(7.0), Some(10.0))];
    let mut noisy = base.clone();
    noisy.push(task("t2", None, Some(0.0), Some(10.0)));
    noisy.push(task("t3", Some(""), Some(0.0), Some(10.0)));
    noisy.push(task("t4", Some("c1"), None, Some(10.0)));

    assert_eq!(
        compute_discipline_average(&calculus(), &base),
        compute_discipline_average(&calculus(), &noisy)
    );
}

#[test]
fn test_no_scheme_yields_empty_result() {
    let tasks = vec![task("t1", Some("c1"), Some(8.0), Some(10.0))];

    let bare = Discipline::new("d1", "Livre", 0);
    assert_eq!(compute_discipline_average(&bare, &tasks), DisciplineAverage::default());

    let empty = bare.with_grading(GradingScheme::new(Vec::new()).with_scale_max(20.0));
    let result = compute_discipline_average(&empty, &tasks);
    assert!(result.media.is_none());
    assert!(result.per_component.is_empty());
}

#[test]
fn test_idempotent_and_order_independent() {
    let d = calculus();
    let tasks = vec![
        task("t1", Some("c1"), Some(6.0), Some(10.0)),
        task("t2", Some("c1"), Some(7.5), Some(10.0)),
        task("t3", Some("c2"), Some(18.0), Some(20.0)),
        task("t4", Some("c1"), Some(9.0), Some(10.0)),
    ];
    let first = compute_discipline_average(&d, &tasks);
    assert_eq!(first, compute_discipline_average(&d, &tasks));

    let mut reversed = tasks.clone();
    reversed.reverse();
    assert_eq!(first, compute_discipline_average(&d, &reversed));
}

#[test]
fn test_inputs_are_not_mutated() {
    let d = calculus();
    let tasks = vec![task("t1", Some("c1"), Some(15.0), Some(20.0))];
    let (d_before, tasks_before) = (d.clone(), tasks.clone());

    let _ = compute_discipline_average(&d, &tasks);

    assert_eq!(d, d_before);
    assert_eq!(tasks, tasks_before);
}

#[test]
fn test_normalize_round_trip() {
    for (v, a, b) in [(7.0, 10.0, 100.0), (13.5, 20.0, 10.0), (0.3, 1.0, 7.0)] {
        let back = normalize_grade(normalize_grade(v, a, b), b, a);
        assert!((back - v).abs() < 1e-9, "{v} on {a}->{b} came back as {back}");
    }
}

#[test]
fn test_normalize_invalid_scale_is_zero() {
    assert!(normalize_grade(8.0, 0.0, 10.0).abs() < f64::EPSILON);
    assert!(normalize_grade(8.0, f64::NAN, 10.0).abs() < f64::EPSILON);
    assert!(normalize_grade(f64::NEG_INFINITY, 10.0, 10.0).abs() < f64::EPSILON);
}

#[test]
fn test_result_serializes_camel_case() {
    let tasks = vec![task("t1", Some("c1"), Some(8.0), Some(10.0))];
    let json = serde_json::to_value(compute_discipline_average(&calculus(), &tasks)).unwrap();

    assert_eq!(json["media"], 4.8);
    assert_eq!(json["perComponent"][0]["componentId"], "c1");
    assert!(json["perComponent"][1]["media"].is_null());
}
