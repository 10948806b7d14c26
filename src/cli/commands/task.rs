//! `noto task` handlers

use super::{discipline_name, resolve, resolve_discipline, short_id, App, CommandResult};
use crate::args::TaskCommand;
use chrono::Utc;
use noto::core::models::{Discipline, Task};
use noto::core::organizer::NewTask;

/// Dispatch task subcommands
pub fn run(action: TaskCommand, app: &mut App) -> CommandResult {
    match action {
        TaskCommand::Add {
            discipline,
            title,
            due,
            kind,
            notes,
            component,
            grade,
            grade_max,
        } => {
            let discipline_id = resolve_discipline(app.disciplines(), &discipline)?.id.clone();
            let added = app.add_task(NewTask {
                discipline_id,
                kind,
                title,
                due_date: due,
                notes,
                grade,
                grade_max,
                component_id: component,
            })?;
            println!("✓ Added {} '{}' ({})", added.kind, added.title, short_id(&added.id));
        }
        TaskCommand::List { discipline } => {
            let filter = discipline
                .map(|q| resolve_discipline(app.disciplines(), &q).map(|d| d.id.clone()))
                .transpose()?;
            let tasks: Vec<&Task> = app
                .tasks_by_due_date()
                .into_iter()
                .filter(|t| filter.as_deref().map_or(true, |id| t.discipline_id == id))
                .collect();
            if tasks.is_empty() {
                println!("No tasks.");
            }
            for task in tasks {
                println!("{}", task_line(task, app.disciplines()));
            }
        }
        TaskCommand::Grade {
            id,
            grade,
            max,
            clear,
        } => {
            let task = resolve(app.tasks(), &id, "task", |t| t.id.as_str())?.clone();
            if clear {
                app.grade_task(&task.id, None, None)?;
                println!("✓ Cleared grade of '{}'", task.title);
            } else {
                app.grade_task(&task.id, grade, max.or(task.grade_max))?;
                let shown = app.task(&task.id).map(grade_label).unwrap_or_default();
                println!("✓ Graded '{}': {shown}", task.title);
            }
        }
        TaskCommand::Remove { id } => {
            let task = resolve(app.tasks(), &id, "task", |t| t.id.as_str())?.clone();
            app.remove_task(&task.id)?;
            println!("✓ Removed task '{}'", task.title);
        }
        TaskCommand::Upcoming { limit } => {
            let upcoming = app.upcoming_tasks(Utc::now(), limit);
            if upcoming.is_empty() {
                println!("Nothing due.");
            }
            for task in upcoming {
                println!("{}", task_line(task, app.disciplines()));
            }
        }
    }
    Ok(())
}

/// `8/10`, or `—` when ungraded
fn grade_label(task: &Task) -> String {
    task.grade.map_or_else(
        || "—".to_string(),
        |g| format!("{g}/{}", task.effective_grade_max()),
    )
}

fn task_line(task: &Task, disciplines: &[Discipline]) -> String {
    format!(
        "{}  {}  {:<8} {}  [{}]  {}",
        short_id(&task.id),
        task.due_date.format("%d/%m/%Y %H:%M"),
        task.kind.to_string(),
        task.title,
        discipline_name(disciplines, &task.discipline_id),
        grade_label(task)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use noto::core::models::TaskKind;

    #[test]
    fn test_task_line() {
        let due = Utc.with_ymd_and_hms(2025, 3, 10, 9, 5, 0).unwrap();
        let disciplines = vec![Discipline::new("d1", "Física", 0)];
        let task = Task::new("0123456789", "d1", TaskKind::Prova, "P1", due).with_grade(7.5, 10.0);

        assert_eq!(
            task_line(&task, &disciplines),
            "01234567  10/03/2025 09:05  prova    P1  [Física]  7.5/10"
        );

        let orphan = Task::new("abc", "gone", TaskKind::Trabalho, "Lista", due);
        assert!(task_line(&orphan, &disciplines).ends_with("[—]  —"));
    }
}
