//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Argument out of range.
    #[error("Invalid {name}: {value}. {expected}")]
    InvalidArgument {
        /// Flag name.
        name: &'static str,
        /// Value given.
        value: f64,
        /// What a valid value looks like.
        expected: &'static str,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] arbor_config::ConfigError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
