//! Error types for the CLI

use core_types::RuntimeError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Runtime execution error
    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    /// Unknown demonstration name
    #[error("unknown demonstration '{0}'")]
    UnknownDemo(String),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
