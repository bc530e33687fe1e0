//! Error types for the export CLI.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::error::ExportError;

/// Errors surfaced by the CLI parsing and export flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// Output path was not supplied.
    #[error("missing required flag: --output")]
    MissingOutputPath,
    /// A flag expected a value but none was provided.
    #[error("missing value for {flag}")]
    MissingValue {
        /// Flag that was missing its value.
        flag: &'static str,
    },
    /// An unsupported argument was supplied.
    #[error("unknown argument: {value}")]
    UnknownArgument {
        /// Argument value that was not recognised.
        value: String,
    },
    /// A numeric value failed to parse.
    #[error("invalid number for {flag}: '{value}' ({message})")]
    InvalidNumber {
        /// Flag associated with the invalid number.
        flag: &'static str,
        /// Raw value supplied for the flag.
        value: String,
        /// Parser error message.
        message: String,
    },
    /// The output path does not name a file.
    #[error("output path '{path}' must name a file")]
    InvalidOutputPath {
        /// Path supplied with `--output`.
        path: Utf8PathBuf,
    },
    /// The directory that should receive the export could not be opened.
    #[error("cannot open output directory '{path}': {message}")]
    OutputDirectory {
        /// Directory that failed to open.
        path: Utf8PathBuf,
        /// Description of the failure.
        message: String,
    },
    /// Generating or writing the export failed.
    #[error("export failed: {source}")]
    Export {
        /// Underlying export error.
        #[from]
        #[source]
        source: ExportError,
    },
}
