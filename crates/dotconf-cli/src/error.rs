//! Application-wide error types using thiserror.

use dotconf_common::DotConfError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Store, loader, or settings error.
    #[error(transparent)]
    Config(#[from] DotConfError),

    /// Output could not be rendered.
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_yaml::Error),
}

/// Result type for the command line tool.
pub type CliResult<T> = Result<T, CliError>;
