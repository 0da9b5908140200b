#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

//! Injects build environments into multi-document pipeline configurations.

pub mod build_env;
pub mod graph;
pub mod io;
pub mod loader;
pub mod report;
pub mod schema;
pub mod settings;
pub mod yaml;

pub use build_env::{AddOptions, AddOutcome, AddSummary, BuildEnvError, add_build_env};
pub use graph::{ConfigEntry, ConfigGraph, DEFAULT_CONFIG_FILE, DocId};
pub use loader::{ConfigLoader, FsConfigLoader, LoadError, LoadOptions};
pub use report::{ErrorCode, ErrorRecord, OutputFormat};
