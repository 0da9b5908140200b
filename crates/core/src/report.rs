//! Structured error records for load failures.
//!
//! Load errors are classified into a stable error code plus an actionable
//! message and written to the command's output stream, one record per line.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use serde::Serialize;

use crate::loader::LoadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ConfigFileNotFoundErr,
    ConfigDependencyNotFoundErr,
    ConfigFileParsingFailedErr,
    ConfigBadFilterErr,
    ConfigDuplicateNamesSameFileErr,
    ConfigDuplicateNamesAcrossFilesErr,
    InspectUnknownErr,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ConfigFileNotFoundErr => "CONFIG_FILE_NOT_FOUND_ERR",
            ErrorCode::ConfigDependencyNotFoundErr => "CONFIG_DEPENDENCY_NOT_FOUND_ERR",
            ErrorCode::ConfigFileParsingFailedErr => "CONFIG_FILE_PARSING_FAILED_ERR",
            ErrorCode::ConfigBadFilterErr => "CONFIG_BAD_FILTER_ERR",
            ErrorCode::ConfigDuplicateNamesSameFileErr => "CONFIG_DUPLICATE_NAMES_SAME_FILE_ERR",
            ErrorCode::ConfigDuplicateNamesAcrossFilesErr => {
                "CONFIG_DUPLICATE_NAMES_ACROSS_FILES_ERR"
            }
            ErrorCode::InspectUnknownErr => "INSPECT_UNKNOWN_ERR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub error_code: ErrorCode,
    pub error_message: String,
}

impl ErrorRecord {
    /// Classify a load failure. Unrecognised failures keep their raw message.
    pub fn from_load_error(err: &LoadError) -> Self {
        let (error_code, error_message) = match err {
            LoadError::MainConfigNotFound { path, .. } => (
                ErrorCode::ConfigFileNotFoundErr,
                format!(
                    "{err}. Check that the specified configuration file exists at \"{}\".",
                    path.display()
                ),
            ),
            LoadError::DependencyNotFound { required_by, .. } => (
                ErrorCode::ConfigDependencyNotFoundErr,
                format!(
                    "{err}. Check the `requires` stanza in \"{}\" points at an existing file or directory.",
                    required_by.display()
                ),
            ),
            LoadError::Parse { path, .. } => (
                ErrorCode::ConfigFileParsingFailedErr,
                format!("{err}. Check that \"{}\" is valid YAML.", path.display()),
            ),
            LoadError::BadFilter { .. } => (
                ErrorCode::ConfigBadFilterErr,
                format!(
                    "{err}. Check that the requested modules match the `metadata.name` of a configuration document."
                ),
            ),
            LoadError::DuplicateNameSameFile { .. } => (
                ErrorCode::ConfigDuplicateNamesSameFileErr,
                format!("{err}. {}", RENAME_HINT),
            ),
            LoadError::DuplicateNameAcrossFiles { .. } => (
                ErrorCode::ConfigDuplicateNamesAcrossFilesErr,
                format!("{err}. {}", RENAME_HINT),
            ),
            LoadError::Read { .. } | LoadError::Other(_) => {
                (ErrorCode::InspectUnknownErr, err.to_string())
            }
        };
        Self { error_code, error_message }
    }

    /// A failure that has no dedicated code.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self { error_code: ErrorCode::InspectUnknownErr, error_message: message.into() }
    }
}

const RENAME_HINT: &str =
    "Give each configuration document a unique `metadata.name` so modules can be told apart.";

/// How error records are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "plain" => Ok(OutputFormat::Text),
            other => Err(format!("unsupported output format '{other}'")),
        }
    }
}

/// Write one record, terminated by a newline.
pub fn write_record(
    out: &mut dyn Write,
    format: OutputFormat,
    record: &ErrorRecord,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => serde_json::to_writer(&mut *out, record)?,
        OutputFormat::Text => write!(out, "{}: {}", record.error_code, record.error_message)?,
    }
    writeln!(out)
}
