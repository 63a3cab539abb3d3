use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::DEFAULT_INPUT_FORMATS;
use crate::view::{try_format_scheduled, DEFAULT_DISPLAY_FORMAT};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV_VAR: &str = "TASKPAD_CONFIG";

/// User settings for the presentation layers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// `strftime` layout used to show schedules.
    pub display_format: String,
    /// Layouts tried, in order, when reading a schedule typed by the user.
    pub input_formats: Vec<String>,
    /// Whether rejected input is reported back instead of silently dropped.
    pub report_validation_errors: bool,
    /// Whether completed tasks are listed.
    pub show_completed: bool,
    /// Default `env_logger` filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            display_format: DEFAULT_DISPLAY_FORMAT.to_string(),
            input_formats: DEFAULT_INPUT_FORMATS.iter().map(|f| f.to_string()).collect(),
            report_validation_errors: false,
            show_completed: true,
            log_filter: "warn".to_string(),
        }
    }
}

/// Returns the path to the config file.
///
/// The path is determined in the following order:
/// 1. `TASKPAD_CONFIG` environment variable.
/// 2. `~/.config/taskpad/config.json` (on Linux).
/// 3. `./config.json` (fallback).
pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_ENV_VAR).map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("taskpad");
        p.push("config.json");
        p
    })
}

impl Config {
    /// Loads the config from [`config_path`].
    pub fn load() -> Result<Config, ConfigError> {
        Config::load_from(&config_path())
    }

    /// Loads the config from `path`, falling back to defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&s).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.check_layouts()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Rejects layouts that cannot render a wall-clock time, and input
    /// layouts that cannot read back what they render.
    fn check_layouts(&self) -> Result<(), ConfigError> {
        let sample = sample_schedule();
        try_format_scheduled(sample, &self.display_format)
            .map_err(|_| ConfigError::InvalidLayout(self.display_format.clone()))?;

        for layout in &self.input_formats {
            let round_trip = try_format_scheduled(sample, layout)
                .ok()
                .and_then(|s| NaiveDateTime::parse_from_str(&s, layout).ok());
            if round_trip != Some(sample) {
                return Err(ConfigError::InvalidLayout(layout.clone()));
            }
        }
        Ok(())
    }
}

// Minute-aligned, so layouts without seconds still read it back unchanged.
fn sample_schedule() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 5)
        .and_then(|d| d.and_hms_opt(14, 30, 0))
        .unwrap_or_default()
}
