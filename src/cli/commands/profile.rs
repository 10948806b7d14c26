//! `noto profile` handlers

use super::{App, CommandResult};
use crate::args::ProfileCommand;
use chrono::Utc;
use noto::core::models::Profile;
use uuid::Uuid;

/// Dispatch profile subcommands
pub fn run(action: ProfileCommand, app: &mut App) -> CommandResult {
    match action {
        ProfileCommand::Set {
            name,
            course,
            institution,
            semester,
        } => {
            let mut profile = app.profile().cloned().unwrap_or_else(|| Profile {
                id: Uuid::new_v4().to_string(),
                name: String::new(),
                course: String::new(),
                institution: String::new(),
                semester: String::new(),
                created_at: Utc::now().timestamp_millis(),
            });
            if let Some(name) = name {
                profile.name = name;
            }
            if let Some(course) = course {
                profile.course = course;
            }
            if let Some(institution) = institution {
                profile.institution = institution;
            }
            if let Some(semester) = semester {
                profile.semester = semester;
            }
            if profile.name.trim().is_empty() {
                return Err("profile needs a name (--name)".into());
            }
            app.set_profile(Some(profile))?;
            println!("✓ Profile saved");
        }
        ProfileCommand::Show => match app.profile() {
            None => println!("No profile yet. Create one with `noto profile set --name <NAME>`."),
            Some(p) => {
                println!("Olá, {}!", p.first_name());
                println!("  Name:        {}", p.name);
                println!("  Course:      {}", p.course);
                println!("  Institution: {}", p.institution);
                println!("  Semester:    {}", p.semester);
            }
        },
    }
    Ok(())
}
