use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::system::collector::{CollectorOptions, DEFAULT_MAX_PROCESSES};
use crate::system::process::DEFAULT_MAX_NAME_LEN;
use crate::system::snapshot::ParseMode;

pub const MIN_INTERVAL_SECS: u64 = 1;
pub const MAX_INTERVAL_SECS: u64 = 3600;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub processes: ProcessesConfig,
    pub activity: ActivityConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub top_n: usize,
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            top_n: 5,
            log_level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProcessesConfig {
    pub max_processes: usize,
    pub max_name_len: usize,
    pub lenient: bool,
}

impl Default for ProcessesConfig {
    fn default() -> Self {
        ProcessesConfig {
            max_processes: DEFAULT_MAX_PROCESSES,
            max_name_len: DEFAULT_MAX_NAME_LEN,
            lenient: true,
        }
    }
}

impl ProcessesConfig {
    pub fn collector_options(&self) -> CollectorOptions {
        CollectorOptions {
            max_processes: self.max_processes,
            max_name_len: self.max_name_len,
            mode: ParseMode::from_lenient(self.lenient),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        ActivityConfig {
            enabled: true,
            path: PathBuf::from("syslog.txt"),
        }
    }
}

/// Parses a refresh interval in whole seconds, accepting `1..=3600`.
pub fn parse_interval(input: &str) -> Result<u64, String> {
    let secs: u64 = input
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a whole number of seconds", input.trim()))?;
    if (MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS).contains(&secs) {
        Ok(secs)
    } else {
        Err(format!(
            "interval must be between {MIN_INTERVAL_SECS} and {MAX_INTERVAL_SECS} seconds"
        ))
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sysmon").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
