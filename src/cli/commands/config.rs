//! `noto config` handler

use super::CommandResult;
use crate::args::ConfigSubcommand;
use noto::config::Config;
use std::io::{self, BufRead, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) -> CommandResult {
    match subcommand {
        None => {
            show(config, None);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key }) => {
            show(config, key.as_deref());
            Ok(())
        }
        Some(ConfigSubcommand::Set { key, value }) => {
            config.set(&key, &value)?;
            config.save()?;
            logger::info!("Config '{key}' set to '{value}'");
            println!("✓ Set {key} = {value}");
            Ok(())
        }
        Some(ConfigSubcommand::Unset { key }) => {
            config.unset(&key, defaults)?;
            config.save()?;
            println!("✓ Reset {key} to default");
            Ok(())
        }
        Some(ConfigSubcommand::Reset) => reset(&mut io::stdin().lock()),
    }
}

fn show(config: &Config, key: Option<&str>) {
    match key {
        Some(k) => match config.get(k) {
            Some(value) => println!("{value}"),
            None => eprintln!("Unknown config key: '{k}'"),
        },
        None => {
            println!("# {}\n", Config::get_config_file_path().display());
            print!("{config}");
        }
    }
}

fn reset(input: &mut impl BufRead) -> CommandResult {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Reset config to defaults? (y/n): ");
    io::stdout().flush()?;

    let mut response = String::new();
    input.read_line(&mut response)?;

    if confirmed(&response) {
        Config::reset()?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}

fn confirmed(response: &str) -> bool {
    let answer = response.trim();
    ["y", "yes", "s", "sim"]
        .iter()
        .any(|ok| answer.eq_ignore_ascii_case(ok))
}
