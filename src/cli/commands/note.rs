//! `noto note` handlers

use super::{discipline_name, resolve, resolve_discipline, short_id, App, CommandResult};
use crate::args::NoteCommand;
use chrono::DateTime;
use noto::core::models::NoteAttachment;
use noto::core::organizer::NewNote;

/// Dispatch note subcommands
pub fn run(action: NoteCommand, app: &mut App) -> CommandResult {
    match action {
        NoteCommand::Add {
            discipline,
            title,
            content,
            attachments,
        } => {
            let discipline_id = resolve_discipline(app.disciplines(), &discipline)?.id.clone();
            let attachments = attachments
                .into_iter()
                .map(|uri| NoteAttachment {
                    name: uri.rsplit(['/', '\\']).next().map(str::to_string),
                    uri,
                    mime_type: None,
                })
                .collect();
            let added = app.add_note(NewNote {
                discipline_id,
                title,
                content,
                attachments,
            })?;
            println!("✓ Added note '{}' ({})", added.title, short_id(&added.id));
        }
        NoteCommand::List { discipline } => {
            let filter = discipline
                .map(|q| resolve_discipline(app.disciplines(), &q).map(|d| d.id.clone()))
                .transpose()?;
            let mut shown = 0;
            for note in app
                .notes()
                .iter()
                .filter(|n| filter.as_deref().map_or(true, |id| n.discipline_id == id))
            {
                shown += 1;
                let created = DateTime::from_timestamp_millis(note.created_at)
                    .map(|dt| dt.format("%d/%m/%Y").to_string())
                    .unwrap_or_default();
                println!(
                    "{}  {}  {}  [{}]",
                    short_id(&note.id),
                    created,
                    note.title,
                    discipline_name(app.disciplines(), &note.discipline_id)
                );
                if let Some(content) = note.content.as_deref() {
                    logger::verbose!("    {content}");
                }
                for attachment in &note.attachments {
                    logger::verbose!("    attachment: {}", attachment.uri);
                }
            }
            if shown == 0 {
                println!("No notes.");
            }
        }
        NoteCommand::Remove { id } => {
            let note = resolve(app.notes(), &id, "note", |n| n.id.as_str())?.clone();
            app.remove_note(&note.id)?;
            println!("✓ Removed note '{}'", note.title);
        }
    }
    Ok(())
}
