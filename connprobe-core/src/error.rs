//! Error taxonomy shared by every connprobe crate.

use thiserror::Error;

/// Errors that can occur while turning a request into a validated connection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// The payload is not a well-formed flat JSON object.
    #[error("Malformed request body: {0}")]
    MalformedInput(String),

    /// One of host, port or databaseName is empty and no connection string was supplied.
    #[error("Insufficient details to build JDBC connection string.")]
    InsufficientDetails,

    /// The database type does not name a supported dialect.
    #[error("Unsupported database type: {0}")]
    UnsupportedDialect(String),

    /// The connection string could not be read by the probe.
    #[error("Invalid connection URL: {0}")]
    InvalidUrl(String),

    /// The driver refused or failed to open the connection.
    #[error("{0}")]
    DriverRejected(String),
}

impl ConnectionError {
    /// Create a malformed input error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Create an invalid URL error.
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    /// Create a driver rejection.
    pub fn driver_rejected(msg: impl Into<String>) -> Self {
        Self::DriverRejected(msg.into())
    }

    /// Whether the caller supplied input that can never succeed as-is.
    ///
    /// Driver rejections and unreadable URLs depend on the remote side, so they
    /// are not client errors.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput(_) | Self::InsufficientDetails | Self::UnsupportedDialect(_)
        )
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) => "malformed_input",
            Self::InsufficientDetails => "insufficient_details",
            Self::UnsupportedDialect(_) => "unsupported_dialect",
            Self::InvalidUrl(_) => "invalid_url",
            Self::DriverRejected(_) => "driver_rejected",
        }
    }
}

/// Result type for connection operations.
pub type ConnectionResult<T> = Result<T, ConnectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ConnectionError::InsufficientDetails.to_string(),
            "Insufficient details to build JDBC connection string."
        );
        assert_eq!(
            ConnectionError::UnsupportedDialect("oracle9000".into()).to_string(),
            "Unsupported database type: oracle9000"
        );
        assert_eq!(
            ConnectionError::driver_rejected("Connection refused").to_string(),
            "Connection refused"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ConnectionError::malformed("eof").is_client_error());
        assert!(ConnectionError::InsufficientDetails.is_client_error());
        assert!(ConnectionError::UnsupportedDialect(String::new()).is_client_error());
        assert!(!ConnectionError::invalid_url("bad port").is_client_error());
        assert!(!ConnectionError::driver_rejected("refused").is_client_error());
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(ConnectionError::InsufficientDetails.kind(), "insufficient_details");
        assert_eq!(ConnectionError::driver_rejected("x").kind(), "driver_rejected");
    }
}
