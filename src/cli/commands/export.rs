//! `noto export` handler

use super::{App, CommandResult};
use noto::config::Config;
use noto::core::export::{ExportContext, ExportFormat, Exporter, HtmlExporter};
use std::path::{Path, PathBuf};

/// Export tasks or the averages summary to `output`, or to the exports
/// directory under the format's default file name
pub fn run(app: &App, config: &Config, format: ExportFormat, output: Option<PathBuf>) -> CommandResult {
    let path = output.unwrap_or_else(|| default_output(&config.exports_dir(), format));

    let tasks = app.tasks_by_due_date();
    let overview = app.averages_overview(config.approval_threshold());
    let ctx = ExportContext::new(app.disciplines(), &tasks, &overview);

    let exporter: Box<dyn Exporter> = match (format, app.profile()) {
        (ExportFormat::Html, Some(profile)) => Box::new(
            HtmlExporter::new().with_subtitle(format!("{} • {}", profile.name, profile.semester)),
        ),
        _ => format.exporter(),
    };
    exporter.export(&ctx, &path)?;

    logger::info!("Exported {format} to {}", path.display());
    println!("✓ Exported {format}: {}", path.display());
    Ok(())
}

fn default_output(exports_dir: &Path, format: ExportFormat) -> PathBuf {
    exports_dir.join(format.default_file_name())
}
