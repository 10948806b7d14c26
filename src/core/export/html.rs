//! HTML averages summary
//!
//! Renders the averages overview into a self-contained HTML page by
//! substituting `{{placeholder}}` markers in an embedded template.

use super::{ExportContext, Exporter};
use crate::core::overview::{format_on_scale, DisciplineReport, Standing};
use std::error::Error;
use std::fmt::Write;

/// Embedded summary template
const SUMMARY_TEMPLATE: &str = include_str!("templates/summary.html");

/// HTML summary generator
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    title: String,
    subtitle: String,
}

impl HtmlExporter {
    /// Create an exporter with the default heading
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "Resumo de médias".to_string(),
            subtitle: String::new(),
        }
    }

    /// Set the page heading
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the line under the heading (e.g. student and semester)
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    fn render_template(&self, ctx: &ExportContext) -> String {
        let mut output = SUMMARY_TEMPLATE.to_string();
        output = output.replace("{{title}}", &escape_html(&self.title));
        output = output.replace("{{subtitle}}", &escape_html(&self.subtitle));
        output = output.replace("{{rows}}", &Self::generate_rows(ctx.overview));
        output = output.replace("{{discipline_count}}", &ctx.overview.len().to_string());
        output
    }

    fn generate_rows(rows: &[DisciplineReport]) -> String {
        let mut html = String::new();
        for row in rows {
            let status = match row.standing {
                Standing::Passing => "Aprovado",
                Standing::Failing => "Abaixo da média",
                Standing::Ungraded => "Sem notas",
            };
            let _ = writeln!(
                html,
                "    <tr><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td></tr>",
                escape_html(&row.name),
                escape_html(&row.media_label()),
                row.min_required,
                row.standing,
                status,
                Self::generate_components(row)
            );
        }
        html
    }

    fn generate_components(row: &DisciplineReport) -> String {
        if row.per_component.is_empty() {
            return "—".to_string();
        }
        let mut html = String::from("<ul class=\"components\">");
        for component in &row.per_component {
            let _ = write!(
                html,
                "<li>{} ({}%): {}</li>",
                escape_html(&component.label),
                component.weight,
                escape_html(&format_on_scale(component.media, row.scale_max))
            );
        }
        html.push_str("</ul>");
        html
    }
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for HtmlExporter {
    fn render(&self, ctx: &ExportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

/// Escape text for HTML element content and attribute values
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
