use crate::report::OutputFormat;
use crate::settings::types::{LoggingConfig, ResolvedSettings, SettingsFile};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file not found at {0}")]
    NotFound(String),

    #[error("failed to read settings file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("{0}")]
    BadFormat(String),

    #[error("home directory not available to expand '~'")]
    NoHome,
}

pub struct SettingsLoader;

impl SettingsLoader {
    /// Load tool settings.
    ///
    /// An explicit `settings_path` must exist. Without one, the default
    /// location is tried and a missing file yields the built-in defaults.
    pub fn load(settings_path: Option<&Path>) -> Result<ResolvedSettings, SettingsError> {
        let path = match settings_path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = default_settings_path();
                if !p.exists() {
                    return Ok(ResolvedSettings::default());
                }
                p
            }
        };

        if !path.exists() {
            return Err(SettingsError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| SettingsError::ReadError(path.display().to_string(), e))?;

        let sf: SettingsFile = toml::from_str(&s)
            .map_err(|e| SettingsError::ParseError(path.display().to_string(), e))?;

        if sf.version != 1 {
            return Err(SettingsError::BadVersion(sf.version));
        }

        Self::resolve(path, &sf)
    }

    fn resolve(path: PathBuf, sf: &SettingsFile) -> Result<ResolvedSettings, SettingsError> {
        let format: OutputFormat = sf.defaults.format.parse().map_err(SettingsError::BadFormat)?;
        let config_file = expand_path(&sf.defaults.filename)?;

        let logging = if let Some(ref file) = sf.logging.file {
            LoggingConfig {
                level: sf.logging.level.clone(),
                file_level: sf.logging.file_level.clone(),
                file: Some(expand_path(&file.to_string_lossy())?),
            }
        } else {
            sf.logging.clone()
        };

        Ok(ResolvedSettings { source: Some(path), config_file, format, logging })
    }
}

pub fn default_settings_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("buildenv").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("buildenv").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, SettingsError> {
    let expanded = full(input).map_err(|_| SettingsError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
