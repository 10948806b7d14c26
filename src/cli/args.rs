//! CLI argument definitions for `noto`

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use logger::Level;
use noto::config::ConfigOverrides;
use noto::core::export::ExportFormat;
use noto::core::models::{AssessmentComponent, TaskKind};

/// CLI log level argument
///
/// Converts to a lowercase string for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Parse `id:label:weight`. The label may itself contain colons.
pub fn parse_component(value: &str) -> Result<AssessmentComponent, String> {
    let usage = || format!("Invalid component '{value}' (expected ID:LABEL:WEIGHT)");
    let (id, rest) = value.split_once(':').ok_or_else(usage)?;
    let (label, weight) = rest.rsplit_once(':').ok_or_else(usage)?;
    if id.trim().is_empty() {
        return Err(usage());
    }
    let weight = weight
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .map_err(|_| format!("Invalid weight '{weight}' in component '{value}'"))?;
    Ok(AssessmentComponent::new(id.trim(), label.trim(), weight))
}

/// Parse a due date: RFC 3339, `YYYY-MM-DD HH:MM` (UTC) or `YYYY-MM-DD`
/// (end of that day, UTC)
pub fn parse_due(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default();
        return Ok(date.and_time(end_of_day).and_utc());
    }
    Err(format!(
        "Invalid date '{value}' (expected YYYY-MM-DD, 'YYYY-MM-DD HH:MM' or RFC 3339)"
    ))
}

/// Parse a weekday as 0..=6 (0 = Sunday) or a Portuguese/English name
pub fn parse_weekday(value: &str) -> Result<u8, String> {
    let lowered = value.trim().to_lowercase();
    if let Ok(n) = lowered.parse::<u8>() {
        return if n <= 6 {
            Ok(n)
        } else {
            Err(format!("Weekday must be 0 (Sunday) to 6 (Saturday), got {n}"))
        };
    }
    let prefix: String = lowered.chars().take(3).collect();
    let day = match prefix.as_str() {
        "dom" | "sun" => 0,
        "seg" | "mon" => 1,
        "ter" | "tue" => 2,
        "qua" | "wed" => 3,
        "qui" | "thu" => 4,
        "sex" | "fri" => 5,
        "sáb" | "sab" | "sat" => 6,
        _ => return Err(format!("Unknown weekday: '{value}'")),
    };
    Ok(day)
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Configuration key (e.g., `level`, `data_dir`, `approval_threshold`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Grading formula flags shared by `discipline add` and `discipline grading`
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GradingArgs {
    /// Grading component as ID:LABEL:WEIGHT (repeatable; weights sum to 100)
    #[arg(long = "component", value_name = "ID:LABEL:WEIGHT", value_parser = parse_component)]
    pub components: Vec<AssessmentComponent>,

    /// Top of the discipline's grade scale (default 10)
    #[arg(long, value_name = "MAX")]
    pub scale: Option<f64>,

    /// Minimum average to pass
    #[arg(long, value_name = "GRADE")]
    pub threshold: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum DisciplineCommand {
    /// Add a discipline.
    Add {
        /// Discipline name
        name: String,
        /// Professor name
        #[arg(long)]
        professor: Option<String>,
        /// Course code
        #[arg(long)]
        code: Option<String>,
        #[command(flatten)]
        grading: GradingArgs,
    },
    /// List disciplines.
    List,
    /// Remove a discipline and its notes.
    Remove {
        /// Discipline id (or unique prefix)
        id: String,
    },
    /// Show or replace a discipline's grading formula.
    ///
    /// Without flags, prints the current formula.
    Grading {
        /// Discipline id (or unique prefix)
        id: String,
        #[command(flatten)]
        grading: GradingArgs,
        /// Remove the grading formula
        #[arg(long, conflicts_with_all = ["components", "scale", "threshold"])]
        clear: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Add a task.
    Add {
        /// Discipline id, id prefix or name
        discipline: String,
        /// Task title
        title: String,
        /// Due date (YYYY-MM-DD, "YYYY-MM-DD HH:MM" or RFC 3339)
        #[arg(long, value_parser = parse_due)]
        due: DateTime<Utc>,
        /// Task kind: prova, trabalho or projeto
        #[arg(long, default_value = "prova")]
        kind: TaskKind,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
        /// Grading component id this task counts towards
        #[arg(long)]
        component: Option<String>,
        /// Grade already received
        #[arg(long)]
        grade: Option<f64>,
        /// Scale of the grade (default 10)
        #[arg(long, value_name = "MAX")]
        grade_max: Option<f64>,
    },
    /// List tasks by due date.
    List {
        /// Only tasks of this discipline
        #[arg(long)]
        discipline: Option<String>,
    },
    /// Record or clear a task's grade.
    Grade {
        /// Task id (or unique prefix)
        id: String,
        /// Grade received
        #[arg(required_unless_present = "clear")]
        grade: Option<f64>,
        /// Scale of the grade (default 10)
        #[arg(long, value_name = "MAX")]
        max: Option<f64>,
        /// Remove the grade
        #[arg(long, conflicts_with = "grade")]
        clear: bool,
    },
    /// Remove a task.
    Remove {
        /// Task id (or unique prefix)
        id: String,
    },
    /// Show the next tasks due.
    Upcoming {
        /// Number of tasks to show
        #[arg(short = 'n', long, default_value_t = 5)]
        limit: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    /// Add a note.
    Add {
        /// Discipline id, id prefix or name
        discipline: String,
        /// Note title
        title: String,
        /// Note body
        #[arg(long)]
        content: Option<String>,
        /// Attached file URI (repeatable)
        #[arg(long = "attach", value_name = "URI")]
        attachments: Vec<String>,
    },
    /// List notes.
    List {
        /// Only notes of this discipline
        #[arg(long)]
        discipline: Option<String>,
    },
    /// Remove a note.
    Remove {
        /// Note id (or unique prefix)
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ScheduleCommand {
    /// Add a weekly class slot.
    Add {
        /// Discipline id, id prefix or name
        discipline: String,
        /// Weekday: 0-6 (0 = Sunday) or a name such as "seg" or "monday"
        #[arg(value_parser = parse_weekday)]
        weekday: u8,
        /// Start time, HH:MM
        start: String,
        /// End time, HH:MM
        end: String,
        /// Room or building
        #[arg(long)]
        location: Option<String>,
    },
    /// Show the weekly schedule.
    List,
    /// Remove a class slot.
    Remove {
        /// Slot id (or unique prefix)
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Create or update the student profile.
    Set {
        /// Student name
        #[arg(long)]
        name: Option<String>,
        /// Degree program
        #[arg(long)]
        course: Option<String>,
        /// Institution
        #[arg(long)]
        institution: Option<String>,
        /// Current semester (e.g., 2025.1)
        #[arg(long)]
        semester: Option<String>,
    },
    /// Show the student profile.
    Show,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Manage disciplines and their grading formulas.
    Discipline {
        #[command(subcommand)]
        action: DisciplineCommand,
    },
    /// Manage tasks (exams, assignments, projects).
    Task {
        #[command(subcommand)]
        action: TaskCommand,
    },
    /// Manage notes.
    Note {
        #[command(subcommand)]
        action: NoteCommand,
    },
    /// Manage the weekly class schedule.
    Schedule {
        #[command(subcommand)]
        action: ScheduleCommand,
    },
    /// Manage the student profile.
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },
    /// Show the weighted average of every discipline.
    Averages {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Search disciplines, tasks and notes.
    Search {
        /// Text to look for (case-insensitive)
        #[arg(value_name = "TERM")]
        term: String,
    },
    /// Export tasks (csv, ics) or the averages summary (html).
    Export {
        /// Export format: csv, ics or html
        #[arg(value_name = "FORMAT")]
        format: ExportFormat,
        /// Output file (defaults to the exports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "noto",
    about = "Student organizer: disciplines, tasks, notes and weighted grade averages",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override the data directory for this run
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the exports directory for this run
    #[arg(long = "exports-dir", value_name = "DIR")]
    pub exports_dir: Option<PathBuf>,

    /// Override the default approval threshold for this run
    #[arg(long = "threshold", value_name = "GRADE")]
    pub threshold: Option<f64>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means the config file value is kept.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.log_level.map(|lvl| lvl.to_string()),
            file: self.log_file.as_ref().map(path_string),
            verbose: self.verbose.then_some(true),
            data_dir: self.data_dir.as_ref().map(path_string),
            exports_dir: self.exports_dir.as_ref().map(path_string),
            approval_threshold: self.threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("noto").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = parse(&["averages"]).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.data_dir.is_none());
        assert!(overrides.exports_dir.is_none());
        assert!(overrides.approval_threshold.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = parse(&[
            "--log-level",
            "debug",
            "--log-file",
            "/tmp/test.log",
            "-v",
            "--data-dir",
            "/data",
            "--exports-dir",
            "/out",
            "--threshold",
            "7",
            "averages",
        ]);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.data_dir, Some("/data".to_string()));
        assert_eq!(overrides.exports_dir, Some("/out".to_string()));
        assert_eq!(overrides.approval_threshold, Some(7.0));
    }

    #[test]
    fn test_parse_component() {
        let c = parse_component("c1:Provas:60").unwrap();
        assert_eq!(c.id, "c1");
        assert_eq!(c.label, "Provas");
        assert!((c.weight - 60.0).abs() < f64::EPSILON);

        let c = parse_component("t: Listas: parte 1 : 40%").unwrap();
        assert_eq!(c.label, "Listas: parte 1");
        assert!((c.weight - 40.0).abs() < f64::EPSILON);

        assert!(parse_component("c1:Provas").is_err());
        assert!(parse_component(":Provas:60").is_err());
        assert!(parse_component("c1:Provas:sixty").is_err());
    }

    #[test]
    fn test_parse_due() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 10, 14, 30, 0).unwrap();
        assert_eq!(parse_due("2025-03-10 14:30"), Ok(expected));
        assert_eq!(parse_due("2025-03-10T14:30"), Ok(expected));
        assert_eq!(parse_due("2025-03-10T11:30:00-03:00"), Ok(expected));
        assert_eq!(
            parse_due("2025-03-10"),
            Ok(Utc.with_ymd_and_hms(2025, 3, 10, 23, 59, 0).unwrap())
        );
        assert!(parse_due("10/03/2025").is_err());
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("0"), Ok(0));
        assert_eq!(parse_weekday("Seg"), Ok(1));
        assert_eq!(parse_weekday("wednesday"), Ok(3));
        assert_eq!(parse_weekday("sábado"), Ok(6));
        assert!(parse_weekday("7").is_err());
        assert!(parse_weekday("someday").is_err());
    }

    #[test]
    fn test_discipline_grading_flags() {
        let cli = parse(&[
            "discipline",
            "add",
            "Cálculo I",
            "--component",
            "p:Provas:60",
            "--component",
            "t:Trabalhos:40",
            "--threshold",
            "6",
        ]);
        match cli.command {
            Command::Discipline {
                action: DisciplineCommand::Add { name, grading, .. },
            } => {
                assert_eq!(name, "Cálculo I");
                assert_eq!(grading.components.len(), 2);
                assert_eq!(grading.threshold, Some(6.0));
                assert!(grading.scale.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_task_grade_requires_value_or_clear() {
        assert!(Cli::try_parse_from(["noto", "task", "grade", "abc"]).is_err());
        assert!(Cli::try_parse_from(["noto", "task", "grade", "abc", "--clear"]).is_ok());
        assert!(Cli::try_parse_from(["noto", "task", "grade", "abc", "8.5", "--max", "10"]).is_ok());
    }

    #[test]
    fn test_export_format_argument() {
        let cli = parse(&["export", "ics", "-o", "/tmp/tarefas.ics"]);
        match cli.command {
            Command::Export { format, output } => {
                assert_eq!(format, ExportFormat::Ics);
                assert_eq!(output, Some(PathBuf::from("/tmp/tarefas.ics")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["noto", "export", "pdf"]).is_err());
    }
}
