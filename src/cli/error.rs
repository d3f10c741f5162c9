//! CLI-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("configuration: {message}")]
    Config { message: String },
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Config { .. } => crate::exitcode::CONFIG,
            CliError::Tree(e) => match e {
                TreeError::Incomparable(_) => crate::exitcode::DATAERR,
                _ => crate::exitcode::SOFTWARE,
            },
        }
    }
}
