//! Error types for probe drivers.

use std::error::Error as StdError;

use connprobe_core::ConnectionError;
use thiserror::Error;

/// Result type for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

/// Why a driver could not open (or cleanly close) a probe connection.
#[derive(Error, Debug)]
pub enum DriverError {
    /// No driver understands the connection string.
    #[error("No suitable driver found for {0}")]
    NoSuitableDriver(String),

    /// The connection string names a known driver but cannot be read.
    #[error("Invalid connection URL: {0}")]
    InvalidUrl(String),

    /// The driver was left out of this build.
    #[error("{0} support is not enabled in this build")]
    DriverUnavailable(&'static str),

    /// The database endpoint could not be reached.
    #[error("Could not connect to {addr}: {source}")]
    Unreachable {
        /// `host:port` that was dialed.
        addr: String,
        /// Transport failure.
        #[source]
        source: std::io::Error,
    },

    /// The database driver refused the connection.
    #[error("{}", describe(.source))]
    Driver {
        /// Driver that produced the error.
        driver: &'static str,
        /// Underlying driver error.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// I/O error outside of connection establishment.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl DriverError {
    /// Create an unreachable-endpoint error.
    pub fn unreachable(host: &str, port: u16, source: std::io::Error) -> Self {
        let addr = if host.contains(':') {
            format!("[{}]:{}", host, port)
        } else {
            format!("{}:{}", host, port)
        };
        Self::Unreachable { addr, source }
    }

    /// Wrap an error reported by a database driver.
    pub fn driver(driver: &'static str, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Driver {
            driver,
            source: Box::new(source),
        }
    }

    /// Name of the driver that reported the error, if one did.
    pub fn driver_name(&self) -> Option<&'static str> {
        match self {
            Self::Driver { driver, .. } => Some(*driver),
            _ => None,
        }
    }
}

#[cfg(feature = "postgres")]
impl From<tokio_postgres::Error> for DriverError {
    fn from(err: tokio_postgres::Error) -> Self {
        Self::driver("postgresql", err)
    }
}

#[cfg(feature = "mysql")]
impl From<mysql_async::Error> for DriverError {
    fn from(err: mysql_async::Error) -> Self {
        Self::driver("mysql", err)
    }
}

#[cfg(feature = "mssql")]
impl From<tiberius::error::Error> for DriverError {
    fn from(err: tiberius::error::Error) -> Self {
        Self::driver("sqlserver", err)
    }
}

#[cfg(feature = "oracle")]
impl From<oracle::Error> for DriverError {
    fn from(err: oracle::Error) -> Self {
        Self::driver("oracle", err)
    }
}

#[cfg(feature = "snowflake")]
impl From<snowflake_connector_rs::Error> for DriverError {
    fn from(err: snowflake_connector_rs::Error) -> Self {
        Self::driver("snowflake", err)
    }
}

impl From<ConnectionError> for DriverError {
    fn from(err: ConnectionError) -> Self {
        match err {
            ConnectionError::InvalidUrl(msg) => Self::InvalidUrl(msg),
            other => Self::InvalidUrl(other.to_string()),
        }
    }
}

impl From<DriverError> for ConnectionError {
    fn from(err: DriverError) -> Self {
        ConnectionError::DriverRejected(err.to_string())
    }
}

#[allow(clippy::borrowed_box)]
fn describe(err: &Box<dyn StdError + Send + Sync>) -> String {
    error_chain(err.as_ref())
}

/// Render an error with its source chain, skipping sources already quoted.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
