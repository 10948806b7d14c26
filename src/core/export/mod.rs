//! Export of organizer data to files other tools understand
//!
//! Tasks go out as CSV (spreadsheets) or ICS (calendars); the averages
//! overview goes out as a self-contained HTML summary.

pub mod csv;
pub mod html;
pub mod ics;

pub use csv::CsvExporter;
pub use html::HtmlExporter;
pub use ics::IcsExporter;

use crate::core::models::{Discipline, Task};
use crate::core::overview::DisciplineReport;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated task list
    Csv,
    /// iCalendar task list
    Ics,
    /// HTML averages summary
    Html,
}

impl ExportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Ics => "ics",
            Self::Html => "html",
        }
    }

    /// File name used when no output path is given
    #[must_use]
    pub const fn default_file_name(&self) -> &'static str {
        match self {
            Self::Csv => "tarefas.csv",
            Self::Ics => "tarefas.ics",
            Self::Html => "resumo.html",
        }
    }

    /// Exporter for this format
    #[must_use]
    pub fn exporter(&self) -> Box<dyn Exporter> {
        match self {
            Self::Csv => Box::new(CsvExporter::new()),
            Self::Ics => Box::new(IcsExporter::new()),
            Self::Html => Box::new(HtmlExporter::new()),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "ics" | "ical" | "calendar" => Ok(Self::Ics),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(format!("Unknown export format: {s}")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Ics => write!(f, "ics"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// Data handed to every exporter
#[derive(Debug, Clone, Copy)]
pub struct ExportContext<'a> {
    /// All disciplines, used to resolve task discipline names
    pub disciplines: &'a [Discipline],
    /// Tasks to export, in output order
    pub tasks: &'a [&'a Task],
    /// Averages overview, one row per discipline
    pub overview: &'a [DisciplineReport],
}

impl<'a> ExportContext<'a> {
    /// Create a new export context
    #[must_use]
    pub const fn new(
        disciplines: &'a [Discipline],
        tasks: &'a [&'a Task],
        overview: &'a [DisciplineReport],
    ) -> Self {
        Self {
            disciplines,
            tasks,
            overview,
        }
    }

    /// Name of a discipline, or an empty string when it no longer exists
    #[must_use]
    pub fn discipline_name(&self, id: &str) -> &str {
        self.disciplines
            .iter()
            .find(|d| d.id == id)
            .map_or("", |d| d.name.as_str())
    }
}

/// Trait for exporters
pub trait Exporter {
    /// Render the export as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &ExportContext) -> Result<String, Box<dyn Error>>;

    /// Render the export and write it to `output_path`
    ///
    /// # Errors
    /// Returns an error if rendering or file writing fails
    fn export(&self, ctx: &ExportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output_path, content)?;
        logger::debug!("Wrote export to {}", output_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formats() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("ical".parse::<ExportFormat>(), Ok(ExportFormat::Ics));
        assert_eq!("htm".parse::<ExportFormat>(), Ok(ExportFormat::Html));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn extensions_match_default_names() {
        for format in [ExportFormat::Csv, ExportFormat::Ics, ExportFormat::Html] {
            assert!(format.default_file_name().ends_with(format.extension()));
            assert_eq!(format.to_string(), format.extension());
        }
    }
}
