//! Loading the configuration graph.
//!
//! The build-env commands only depend on the [`ConfigLoader`] trait; the
//! filesystem implementation lives in [`fs`].

pub mod fs;

use std::path::PathBuf;

use thiserror::Error;

use crate::graph::{ConfigGraph, DEFAULT_CONFIG_FILE};

pub use fs::FsConfigLoader;

/// What to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Main configuration file.
    pub config_file: PathBuf,
    /// Module names to keep (plus everything they require). Empty keeps all.
    pub modules: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { config_file: PathBuf::from(DEFAULT_CONFIG_FILE), modules: Vec::new() }
    }
}

/// Errors that can occur while loading the configuration graph.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to find configuration file \"{}\": {reason}", .path.display())]
    MainConfigNotFound { path: PathBuf, reason: String },

    #[error(
        "unable to find configuration file \"{}\" required by \"{}\": {reason}",
        .path.display(),
        .required_by.display()
    )]
    DependencyNotFound { path: PathBuf, required_by: PathBuf, reason: String },

    #[error("failed to parse document {index} of \"{}\": {source}", .path.display())]
    Parse {
        path: PathBuf,
        index: usize,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("no configs found for module selection {}", .modules.join(", "))]
    BadFilter { modules: Vec<String> },

    #[error("multiple documents in \"{}\" are named '{name}'", .path.display())]
    DuplicateNameSameFile { name: String, path: PathBuf },

    #[error(
        "module '{name}' is defined in both \"{}\" and \"{}\"",
        .first.display(),
        .second.display()
    )]
    DuplicateNameAcrossFiles { name: String, first: PathBuf, second: PathBuf },

    #[error("failed to read file \"{}\": {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

/// Source of the configuration graph.
pub trait ConfigLoader {
    fn load(&self, opts: &LoadOptions) -> Result<ConfigGraph, LoadError>;
}

impl<F> ConfigLoader for F
where
    F: Fn(&LoadOptions) -> Result<ConfigGraph, LoadError>,
{
    fn load(&self, opts: &LoadOptions) -> Result<ConfigGraph, LoadError> {
        self(opts)
    }
}
