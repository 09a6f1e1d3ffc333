use thiserror::Error;

use bgg_api::BggError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Request to BoardGameGeek failed
    #[error(transparent)]
    Api(#[from] BggError),

    /// Flags that parse but make no sense together
    #[error("Usage error: {0}")]
    Usage(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error (e.g., the `--logfile` could not be created)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
