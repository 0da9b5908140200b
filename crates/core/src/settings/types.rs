use std::path::PathBuf;

use serde::Deserialize;

use crate::graph::DEFAULT_CONFIG_FILE;
use crate::report::OutputFormat;

#[derive(Debug, Deserialize)]
pub struct SettingsFile {
    pub version: u32,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Fallbacks for command-line flags that were not given.
#[derive(Debug, Deserialize, Clone)]
pub struct DefaultsConfig {
    /// Main configuration file.
    #[serde(default = "default_filename")]
    pub filename: String,
    /// Error record format, `json` or `text`.
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { filename: default_filename(), format: default_format() }
    }
}

fn default_filename() -> String {
    DEFAULT_CONFIG_FILE.to_string()
}

fn default_format() -> String {
    "json".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    /// Settings file that was read, if any.
    pub source: Option<PathBuf>,
    pub config_file: PathBuf,
    pub format: OutputFormat,
    pub logging: LoggingConfig,
}

impl Default for ResolvedSettings {
    fn default() -> Self {
        Self {
            source: None,
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            format: OutputFormat::default(),
            logging: LoggingConfig::default(),
        }
    }
}
