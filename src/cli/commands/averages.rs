//! `noto averages` handler

use super::{App, CommandResult};
use noto::config::Config;
use noto::core::overview::{format_on_scale, DisciplineReport};

/// Print the averages overview as a table, or as JSON with `json`
pub fn run(app: &App, config: &Config, json: bool) -> CommandResult {
    let rows = app.averages_overview(config.approval_threshold());
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("No disciplines yet.");
        return Ok(());
    }
    for row in &rows {
        print!("{}", render_row(row));
    }
    Ok(())
}

fn render_row(row: &DisciplineReport) -> String {
    let mut out = format!(
        "{:<28} {:>10}  min {}  {}\n",
        row.name,
        row.media_label(),
        row.min_required,
        row.standing
    );
    for c in &row.per_component {
        out.push_str(&format!(
            "    {:<22} {:>5}%  {}\n",
            c.label,
            c.weight,
            format_on_scale(c.media, row.scale_max)
        ));
    }
    out
}
