//! Adding build environments to pipeline configurations.
//!
//! [`add_build_env`] loads the configuration graph, writes the new executor
//! into the selected documents (see [`driver`]), pushes profile activations
//! one hop down `requires` edges (see [`propagate`]) and rewrites every file
//! that holds a changed document (see [`planner`]).

pub mod driver;
pub mod list;
pub mod planner;
pub mod propagate;
pub mod scope;

use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::graph::DEFAULT_CONFIG_FILE;
use crate::io::{FileReader, FileWriter};
use crate::loader::{ConfigLoader, LoadOptions};
use crate::report::{ErrorRecord, OutputFormat, write_record};
use crate::schema::BuildType;

pub use driver::{apply, select_targets};
pub use list::{BuildEnvEntry, list_build_envs};
pub use planner::{PlannedFile, plan, render};
pub use propagate::propagate;
pub use scope::resolve;

/// Errors that can occur after the configuration graph has been loaded.
#[derive(Debug, Error)]
pub enum BuildEnvError {
    #[error("failed to read file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("document {index} of {path} no longer exists on disk")]
    StaleSource { path: PathBuf, index: usize },

    #[error("failed to serialize module '{module}': {source}")]
    Serialize {
        module: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to write error report: {0}")]
    Report(#[source] io::Error),
}

/// Parameters of one build-env addition.
#[derive(Debug, Clone)]
pub struct AddOptions {
    pub format: OutputFormat,
    pub config_file: PathBuf,
    /// Restrict targets to these module names. Empty means all.
    pub modules: Vec<String>,
    /// Profile to add the environment to; `None` targets the default pipeline.
    pub profile: Option<String>,
    pub build_type: BuildType,
}

impl AddOptions {
    pub fn new(build_type: BuildType) -> Self {
        Self {
            format: OutputFormat::default(),
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            modules: Vec::new(),
            profile: None,
            build_type,
        }
    }
}

/// Files touched by a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddSummary {
    /// Names of every module written to, in graph order.
    pub modules: Vec<String>,
    pub files_written: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Applied(AddSummary),
    /// The graph could not be loaded; the record was written to the output
    /// stream and nothing was written to disk.
    Reported(ErrorRecord),
}

/// Add `opts.build_type` to the configuration rooted at `opts.config_file`.
///
/// Nothing is written to `out` on success. A load failure is rendered to `out`
/// as an [`ErrorRecord`] before any file is touched. Every planned file is read
/// and rendered before the first write, so read and render failures leave the
/// disk untouched. A write failure stops the run without undoing earlier writes.
pub fn add_build_env(
    loader: &dyn ConfigLoader,
    reader: &dyn FileReader,
    writer: &mut dyn FileWriter,
    out: &mut dyn Write,
    opts: &AddOptions,
) -> Result<AddOutcome, BuildEnvError> {
    let load_opts =
        LoadOptions { config_file: opts.config_file.clone(), modules: opts.modules.clone() };

    let mut graph = match loader.load(&load_opts) {
        Ok(graph) => graph,
        Err(err) => {
            let record = ErrorRecord::from_load_error(&err);
            write_record(out, opts.format, &record).map_err(BuildEnvError::Report)?;
            return Ok(AddOutcome::Reported(record));
        }
    };

    let changed = apply(&mut graph, &opts.modules, &opts.build_type, opts.profile.as_deref());

    let mut summary = AddSummary {
        modules: changed.iter().map(|id| graph[*id].name().to_string()).collect(),
        files_written: Vec::new(),
    };

    let mut staged: Vec<(PathBuf, String)> = Vec::new();
    for file in plan(&graph, &changed) {
        let original = reader
            .read(&file.path)
            .map_err(|source| BuildEnvError::Read { path: file.path.clone(), source })?;
        let contents = render(&original, &graph, &file, &changed)?;
        staged.push((file.path, contents));
    }

    for (path, contents) in staged {
        writer
            .write(&path, &contents)
            .map_err(|source| BuildEnvError::Write { path: path.clone(), source })?;

        info!(path = %path.display(), "updated configuration file");
        summary.files_written.push(path);
    }

    Ok(AddOutcome::Applied(summary))
}
