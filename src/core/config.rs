//! Configuration for `noto`
//!
//! Settings live in a TOML file under the platform config directory. The
//! compiled-in defaults differ between debug and release builds, and any
//! value may reference the config directory as `$NOTO`.

use crate::core::models::DEFAULT_APPROVAL_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default configuration, picked by build profile
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory
const DIR_VARIABLE: &str = "$NOTO";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path; empty logs to the terminal
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the `app.*.json` data files
    #[serde(default)]
    pub data_dir: String,
    /// Directory exports are written to when no output path is given
    #[serde(default)]
    pub exports_dir: String,
}

/// Grading display settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Approval threshold used for disciplines that define none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_threshold: Option<f64>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Grading settings
    #[serde(default)]
    pub grading: GradingConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override data directory
    pub data_dir: Option<String>,
    /// Override exports directory
    pub exports_dir: Option<String>,
    /// Override default approval threshold
    pub approval_threshold: Option<f64>,
}

fn parse_threshold(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(t) if t.is_finite() && t >= 0.0 => Ok(t),
        _ => Err(format!(
            "Invalid value for 'approval_threshold': '{value}' (expected a non-negative number)"
        )),
    }
}

impl Config {
    /// Get the `$NOTO` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/noto`
    /// - macOS: `~/Library/Application Support/noto`
    /// - Windows: `%APPDATA%\noto`
    #[must_use]
    pub fn get_noto_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("noto")
    }

    /// Fill fields that are empty here but set in `defaults`.
    ///
    /// Used on load so settings added in newer versions show up in old
    /// config files. Returns `true` if anything changed.
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.paths.data_dir.is_empty() && !defaults.paths.data_dir.is_empty() {
            self.paths.data_dir.clone_from(&defaults.paths.data_dir);
            changed = true;
        }
        if self.paths.exports_dir.is_empty() && !defaults.paths.exports_dir.is_empty() {
            self.paths
                .exports_dir
                .clone_from(&defaults.paths.exports_dir);
            changed = true;
        }

        if self.grading.approval_threshold.is_none() && defaults.grading.approval_threshold.is_some()
        {
            self.grading.approval_threshold = defaults.grading.approval_threshold;
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides for this run only. `None` fields leave
    /// the loaded value untouched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(data_dir) = &overrides.data_dir {
            self.paths.data_dir = Self::expand_variables(data_dir);
        }
        if let Some(exports_dir) = &overrides.exports_dir {
            self.paths.exports_dir = Self::expand_variables(exports_dir);
        }

        if let Some(threshold) = overrides.approval_threshold {
            self.grading.approval_threshold = Some(threshold);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds and `dconfig.toml` for debug builds,
    /// inside [`get_noto_dir`](Self::get_noto_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_noto_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$NOTO` to the config directory
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let noto_dir = Self::get_noto_dir();
            value.replace(DIR_VARIABLE, noto_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing sections and fields take their serde defaults. `$NOTO` is
    /// expanded in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.data_dir = Self::expand_variables(&config.paths.data_dir);
        config.paths.exports_dir = Self::expand_variables(&config.paths.exports_dir);

        Ok(config)
    }

    /// Load the compiled-in defaults for this build profile
    #[must_use]
    pub fn from_defaults() -> Self {
        match Self::from_toml(CONFIG_DEFAULTS) {
            Ok(config) => config,
            Err(e) => {
                logger::error!("Compiled-in default configuration is invalid: {e}");
                Self {
                    grading: GradingConfig {
                        approval_threshold: Some(DEFAULT_APPROVAL_THRESHOLD),
                    },
                    ..Self::default()
                }
            }
        }
    }

    /// Load configuration from file, or create it from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields from
    ///   defaults and save it back when something was added
    /// - On first run: create the config directory and write the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            match fs::read_to_string(&config_file).map(|content| Self::from_toml(&content)) {
                Ok(Ok(mut config)) => {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
                Ok(Err(e)) => {
                    logger::warn!("Ignoring malformed {}: {e}", config_file.display());
                }
                Err(e) => {
                    logger::warn!("Cannot read {}: {e}", config_file.display());
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the config file, creating its directory
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, the directory
    /// cannot be created or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Directory holding the data files
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        if self.paths.data_dir.is_empty() {
            Self::get_noto_dir().join("data")
        } else {
            PathBuf::from(&self.paths.data_dir)
        }
    }

    /// Directory exports are written to by default
    #[must_use]
    pub fn exports_dir(&self) -> PathBuf {
        if self.paths.exports_dir.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.paths.exports_dir)
        }
    }

    /// Approval threshold for disciplines that define none
    #[must_use]
    pub fn approval_threshold(&self) -> f64 {
        self.grading
            .approval_threshold
            .unwrap_or(DEFAULT_APPROVAL_THRESHOLD)
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `data_dir`, `exports_dir`
    /// and `approval_threshold`. Underscores may be written as dashes.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "data_dir" | "data-dir" => Some(self.paths.data_dir.clone()),
            "exports_dir" | "exports-dir" => Some(self.paths.exports_dir.clone()),
            "approval_threshold" | "approval-threshold" | "threshold" => {
                Some(self.approval_threshold().to_string())
            }
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Only the in-memory config changes; call [`save`](Config::save) to
    /// persist it.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed (e.g. "maybe" for `verbose`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                if logger::Level::parse(value).is_none() {
                    return Err(format!("Invalid log level: '{value}'"));
                }
                self.logging.level = value.to_lowercase();
            }
            "file" => self.logging.file = Self::expand_variables(value),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "data_dir" | "data-dir" => self.paths.data_dir = Self::expand_variables(value),
            "exports_dir" | "exports-dir" => self.paths.exports_dir = Self::expand_variables(value),
            "approval_threshold" | "approval-threshold" | "threshold" => {
                self.grading.approval_threshold = Some(parse_threshold(value)?);
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset one value to its default
    ///
    /// # Errors
    /// Returns an error if the key is not recognized
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "data_dir" | "data-dir" => self.paths.data_dir.clone_from(&defaults.paths.data_dir),
            "exports_dir" | "exports-dir" => self
                .paths
                .exports_dir
                .clone_from(&defaults.paths.exports_dir),
            "approval_threshold" | "approval-threshold" | "threshold" => {
                self.grading.approval_threshold = defaults.grading.approval_threshold;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Delete the config file so the next [`load`](Config::load) recreates
    /// it from defaults. Succeeds when there is no file.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  data_dir = \"{}\"", self.paths.data_dir)?;
        writeln!(f, "  exports_dir = \"{}\"", self.paths.exports_dir)?;

        writeln!(f, "\n[grading]")?;
        writeln!(f, "  approval_threshold = {}", self.approval_threshold())?;

        Ok(())
    }
}
