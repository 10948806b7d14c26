//! iCalendar task export: one all-at-due-time event per task

use super::{ExportContext, Exporter};
use chrono::{DateTime, Utc};
use std::error::Error;

/// Product identifier written to every calendar
pub const PRODID: &str = "-//noto//pt-BR";

/// Writes a `VCALENDAR` with one `VEVENT` per task
#[derive(Debug, Default, Clone, Copy)]
pub struct IcsExporter;

impl IcsExporter {
    /// Create a new ICS exporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Escape text for an iCalendar property value
#[must_use]
pub fn escape_text(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}

/// UTC timestamp as `YYYYMMDDTHHMMSSZ`
fn stamp(at: &DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

impl Exporter for IcsExporter {
    fn render(&self, ctx: &ExportContext) -> Result<String, Box<dyn Error>> {
        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{PRODID}"),
        ];
        for task in ctx.tasks {
            let at = stamp(&task.due_date);
            lines.push("BEGIN:VEVENT".to_string());
            lines.push(format!("UID:{}@noto", task.id));
            lines.push(format!("DTSTAMP:{at}"));
            lines.push(format!("DTSTART:{at}"));
            lines.push(format!("SUMMARY:{}", escape_text(&task.title)));
            lines.push(format!(
                "DESCRIPTION:{}",
                escape_text(task.notes.as_deref().unwrap_or(""))
            ));
            lines.push("END:VEVENT".to_string());
        }
        lines.push("END:VCALENDAR".to_string());
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Task, TaskKind};
    use chrono::TimeZone;

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape_text("a\\b"), "a\\\\b");
        assert_eq!(escape_text("um;dois,três\nquatro"), "um\\;dois\\,três\\nquatro");
    }

    #[test]
    fn renders_one_event_per_task() {
        let due = Utc.with_ymd_and_hms(2025, 3, 10, 12, 30, 5).unwrap();
        let mut task = Task::new("abc", "d1", TaskKind::Projeto, "Entrega; v2", due);
        task.notes = Some("levar pendrive, cabo".to_string());
        let tasks = [&task];

        let ics = IcsExporter::new()
            .render(&ExportContext::new(&[], &tasks, &[]))
            .unwrap();
        let lines: Vec<&str> = ics.split('\n').collect();

        assert_eq!(
            lines,
            [
                "BEGIN:VCALENDAR",
                "VERSION:2.0",
                "PRODID:-//noto//pt-BR",
                "BEGIN:VEVENT",
                "UID:abc@noto",
                "DTSTAMP:20250310T123005Z",
                "DTSTART:20250310T123005Z",
                "SUMMARY:Entrega\\; v2",
                "DESCRIPTION:levar pendrive\\, cabo",
                "END:VEVENT",
                "END:VCALENDAR",
            ]
        );
    }

    #[test]
    fn empty_calendar_has_header_and_footer() {
        let ics = IcsExporter::new()
            .render(&ExportContext::new(&[], &[], &[]))
            .unwrap();
        assert_eq!(ics, "BEGIN:VCALENDAR\nVERSION:2.0\nPRODID:-//noto//pt-BR\nEND:VCALENDAR");
    }
}
