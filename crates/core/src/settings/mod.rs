//! Tool settings: defaults for command-line flags and logging.

pub mod loader;
pub mod types;

pub use loader::{SettingsError, SettingsLoader, default_settings_path};
pub use types::{DefaultsConfig, LoggingConfig, ResolvedSettings, SettingsFile};
