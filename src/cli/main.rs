//! Command-line interface entry point for `noto`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::{App, CommandResult};
use logger::{enable_debug, enable_verbose, info, init_file_logging, set_level, Level};
use noto::config::Config;
use noto::core::organizer::Organizer;
use noto::core::store::JsonStore;
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    let mut level = Level::parse(&config.logging.level).unwrap_or(Level::Warn);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }
    if config.logging.verbose {
        enable_verbose();
    }
    set_level(level);

    if !config.logging.file.is_empty() {
        let log_path = PathBuf::from(&config.logging.file);
        if init_file_logging(&log_path) {
            info!("File logging initialized at: {}", log_path.display());
        } else {
            eprintln!("✗ Failed to initialize file logging at: {}", log_path.display());
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults)
        }
        command => open_app(&config).and_then(|mut app| dispatch(command, &mut app, &config)),
    };

    if let Err(e) = result {
        logger::error!("{e}");
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

fn open_app(config: &Config) -> Result<App, Box<dyn std::error::Error>> {
    let data_dir = config.data_dir();
    logger::debug!("Using data directory {}", data_dir.display());
    Ok(Organizer::open(JsonStore::new(data_dir))?)
}

fn dispatch(command: Command, app: &mut App, config: &Config) -> CommandResult {
    match command {
        Command::Config { .. } => Ok(()),
        Command::Discipline { action } => commands::discipline::run(action, app, config),
        Command::Task { action } => commands::task::run(action, app),
        Command::Note { action } => commands::note::run(action, app),
        Command::Schedule { action } => commands::schedule::run(action, app),
        Command::Profile { action } => commands::profile::run(action, app),
        Command::Averages { json } => commands::averages::run(app, config, json),
        Command::Search { term } => commands::search::run(app, &term),
        Command::Export { format, output } => commands::export::run(app, config, format, output),
    }
}
