//! CSV task export, readable by spreadsheet tools

use super::{ExportContext, Exporter};
use chrono::SecondsFormat;
use std::error::Error;

/// Column headers, in output order
pub const CSV_HEADER: [&str; 6] = ["Tipo", "Título", "Disciplina", "Data", "Nota", "Max"];

/// Writes one row per task; every field is quoted
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExporter;

impl CsvExporter {
    /// Create a new CSV exporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Quote a field, doubling embedded quotes
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn join_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| quote(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

impl Exporter for CsvExporter {
    fn render(&self, ctx: &ExportContext) -> Result<String, Box<dyn Error>> {
        let mut lines = Vec::with_capacity(ctx.tasks.len() + 1);
        lines.push(join_row(&CSV_HEADER));
        for task in ctx.tasks {
            let row = [
                task.kind.to_string(),
                task.title.clone(),
                ctx.discipline_name(&task.discipline_id).to_string(),
                task.due_date.to_rfc3339_opts(SecondsFormat::Millis, true),
                task.grade.map(|g| g.to_string()).unwrap_or_default(),
                task.grade_max.map(|m| m.to_string()).unwrap_or_default(),
            ];
            lines.push(join_row(&row));
        }
        Ok(lines.join("\n"))
    }
}
