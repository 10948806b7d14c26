//! `noto schedule` handlers

use super::{discipline_name, resolve, resolve_discipline, short_id, App, CommandResult};
use crate::args::ScheduleCommand;
use noto::core::organizer::NewSchedule;

/// Dispatch schedule subcommands
pub fn run(action: ScheduleCommand, app: &mut App) -> CommandResult {
    match action {
        ScheduleCommand::Add {
            discipline,
            weekday,
            start,
            end,
            location,
        } => {
            let discipline_id = resolve_discipline(app.disciplines(), &discipline)?.id.clone();
            let added = app.add_schedule(NewSchedule {
                discipline_id,
                weekday,
                start,
                end,
                location,
            })?;
            println!(
                "✓ Added class on {} {}-{} ({})",
                added.weekday_label(),
                added.start,
                added.end,
                short_id(&added.id)
            );
        }
        ScheduleCommand::List => {
            let week = app.weekly_schedule();
            if week.is_empty() {
                println!("No classes scheduled.");
            }
            let mut current_day = None;
            for slot in week {
                if current_day != Some(slot.weekday) {
                    current_day = Some(slot.weekday);
                    println!("{}", slot.weekday_label());
                }
                let location = slot
                    .location
                    .as_deref()
                    .map(|l| format!(" @ {l}"))
                    .unwrap_or_default();
                println!(
                    "  {}-{}  {}{location}  ({})",
                    slot.start,
                    slot.end,
                    discipline_name(app.disciplines(), &slot.discipline_id),
                    short_id(&slot.id)
                );
            }
        }
        ScheduleCommand::Remove { id } => {
            let slot = resolve(app.schedule(), &id, "class slot", |s| s.id.as_str())?.clone();
            app.remove_schedule(&slot.id)?;
            println!("✓ Removed class on {} {}", slot.weekday_label(), slot.start);
        }
    }
    Ok(())
}
