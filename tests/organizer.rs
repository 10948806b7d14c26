//! Integration tests for the organizer over the on-disk JSON store

use chrono::{TimeZone, Utc};
use noto::core::models::{AssessmentComponent, GradingScheme, Profile, TaskKind};
use noto::core::organizer::{NewDiscipline, NewNote, NewSchedule, NewTask};
use noto::core::overview::{HitKind, Standing};
use noto::core::store::{DISCIPLINES_KEY, TASKS_KEY};
use noto::{JsonStore, Organizer, OrganizerError, Repository};
use std::fs;
use tempfile::TempDir;

fn open(dir: &TempDir) -> Organizer<JsonStore> {
    Organizer::open(JsonStore::new(dir.path())).expect("Failed to open organizer")
}

fn draft_task(discipline_id: &str, title: &str, component: &str, grade: Option<f64>) -> NewTask {
    NewTask {
        discipline_id: discipline_id.to_string(),
        kind: TaskKind::Prova,
        title: title.to_string(),
        due_date: Utc.with_ymd_and_hms(2025, 4, 15, 10, 0, 0).unwrap(),
        notes: None,
        grade,
        grade_max: Some(10.0),
        component_id: Some(component.to_string()),
    }
}

#[test]
fn test_empty_directory_opens_empty() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let org = open(&dir);

    assert!(org.profile().is_none());
    assert!(org.disciplines().is_empty());
    assert!(org.tasks().is_empty());
    assert!(org.averages_overview(6.0).is_empty());
}

#[test]
fn test_data_survives_reopen() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let discipline_id = {
        let mut org = open(&dir);
        let id = org
            .add_discipline(NewDiscipline {
                name: "Cálculo I".to_string(),
                professor: Some("Ana".to_string()),
                grading: Some(GradingScheme::new(vec![
                    AssessmentComponent::new("c1", "Provas", 60.0),
                    AssessmentComponent::new("c2", "Trabalhos", 40.0),
                ])),
                ..NewDiscipline::default()
            })
            .expect("Failed to add discipline")
            .id
            .clone();
        org.add_task(draft_task(&id, "P1", "c1", Some(8.0)))
            .expect("Failed to add task");
        org.add_task(draft_task(&id, "T1", "c2", Some(9.0)))
            .expect("Failed to add task");
        org.set_profile(Some(Profile {
            id: "p1".to_string(),
            name: "Maria Silva".to_string(),
            course: "Engenharia".to_string(),
            institution: "UF".to_string(),
            semester: "2025.1".to_string(),
            created_at: 0,
        }))
        .expect("Failed to save profile");
        id
    };

    let org = open(&dir);
    assert_eq!(org.disciplines().len(), 1);
    assert_eq!(org.tasks().len(), 2);
    assert_eq!(org.profile().map(|p| p.first_name()), Some("Maria"));

    let rows = org.averages_overview(6.0);
    assert_eq!(rows[0].discipline_id, discipline_id);
    assert_eq!(rows[0].media, Some(8.4));
    assert_eq!(rows[0].standing, Standing::Passing);
}

#[test]
fn test_documents_use_app_keys_and_camel_case() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut org = open(&dir);
    let id = org
        .add_discipline(NewDiscipline {
            name: "Física".to_string(),
            grading: Some(
                GradingScheme::new(vec![AssessmentComponent::new("c1", "Provas", 100.0)])
                    .with_scale_max(100.0),
            ),
            ..NewDiscipline::default()
        })
        .expect("Failed to add discipline")
        .id
        .clone();
    org.add_task(draft_task(&id, "P1", "c1", Some(7.0)))
        .expect("Failed to add task");

    let disciplines =
        fs::read_to_string(dir.path().join(format!("{DISCIPLINES_KEY}.json"))).expect("read");
    assert!(disciplines.contains("\"createdAt\""));
    assert!(disciplines.contains("\"scaleMax\": 100.0"));

    let tasks = fs::read_to_string(dir.path().join(format!("{TASKS_KEY}.json"))).expect("read");
    assert!(tasks.contains("\"type\": \"prova\""));
    assert!(tasks.contains("\"componentId\": \"c1\""));
    assert!(tasks.contains("\"dueDate\": \"2025-04-15T10:00:00Z\""));
}

#[test]
fn test_malformed_document_is_reported() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join(format!("{TASKS_KEY}.json")), "{ not json").expect("write");

    let err = Organizer::open(JsonStore::new(dir.path())).expect_err("should fail");
    assert!(matches!(err, OrganizerError::Store(_)));
    assert!(err.to_string().contains(TASKS_KEY));
}

#[test]
fn test_removing_discipline_removes_its_notes_on_disk() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut org = open(&dir);
    let keep = org
        .add_discipline(NewDiscipline {
            name: "História".to_string(),
            ..NewDiscipline::default()
        })
        .expect("add")
        .id
        .clone();
    let gone = org
        .add_discipline(NewDiscipline {
            name: "Química".to_string(),
            ..NewDiscipline::default()
        })
        .expect("add")
        .id
        .clone();
    for (discipline_id, title) in [(&keep, "Revolução"), (&gone, "Ligações")] {
        org.add_note(NewNote {
            discipline_id: discipline_id.clone(),
            title: title.to_string(),
            ..NewNote::default()
        })
        .expect("note");
    }
    org.add_schedule(NewSchedule {
        discipline_id: gone.clone(),
        weekday: 2,
        start: "08:00".to_string(),
        end: "09:40".to_string(),
        location: Some("Bloco B".to_string()),
    })
    .expect("schedule");

    org.remove_discipline(&gone).expect("remove");

    let store = JsonStore::new(dir.path());
    let notes = store.load_notes().expect("load notes");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Revolução");
    assert_eq!(store.load_schedule().expect("load schedule").len(), 1);
    assert!(matches!(
        org.remove_discipline(&gone),
        Err(OrganizerError::NotFound { .. })
    ));
}

#[test]
fn test_search_across_collections() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut org = open(&dir);
    let id = org
        .add_discipline(NewDiscipline {
            name: "Álgebra Linear".to_string(),
            grading: Some(GradingScheme::new(vec![AssessmentComponent::new(
                "c1", "Listas", 100.0,
            )])),
            ..NewDiscipline::default()
        })
        .expect("add")
        .id
        .clone();
    org.add_task(draft_task(&id, "Lista de matrizes", "c1", None))
        .expect("task");
    org.add_note(NewNote {
        discipline_id: id,
        title: String::new(),
        content: Some("Matrizes inversas".to_string()),
        ..NewNote::default()
    })
    .expect("note");

    let hits = org.search("matrizes");
    let kinds: Vec<HitKind> = hits.iter().map(|h| h.kind).collect();
    assert_eq!(kinds, [HitKind::Task, HitKind::Note]);
    assert_eq!(hits[1].title, "(sem título)");
    assert_eq!(hits[1].subtitle.as_deref(), Some("Álgebra Linear"));
}
