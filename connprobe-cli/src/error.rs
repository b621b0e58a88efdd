//! CLI error types and result alias.

use connprobe_core::ConnectionError;
use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(connprobe::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(connprobe::config))]
    Config(String),

    /// The descriptor could not be read
    #[error("Input error: {0}")]
    #[diagnostic(code(connprobe::input))]
    Input(String),

    /// The descriptor was rejected or the database refused the connection
    #[error("{0}")]
    #[diagnostic(code(connprobe::connection))]
    Connection(#[from] ConnectionError),

    /// The HTTP server failed
    #[error("Server error: {0}")]
    #[diagnostic(code(connprobe::server))]
    Server(String),
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(format!("Failed to parse TOML: {}", err))
    }
}
