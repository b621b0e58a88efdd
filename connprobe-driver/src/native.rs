//! Connector backed by the native async drivers.

use async_trait::async_trait;
use connprobe_core::{Dialect, JdbcUrl, mask_password};
use tracing::debug;

use crate::connector::{Connector, ProbeConnection, ProbeRequest};
use crate::error::{DriverError, DriverResult};

/// Opens real connections, choosing the driver from the URL prefix.
///
/// | Prefix                | Driver            |
/// |-----------------------|-------------------|
/// | `jdbc:postgresql:`    | `tokio-postgres`  |
/// | `jdbc:mysql:`         | `mysql_async`     |
/// | `jdbc:sqlserver:`     | `tiberius`        |
/// | `jdbc:oracle:thin:`   | `oracle` (ODPI-C) |
/// | `jdbc:snowflake:`     | `snowflake-connector-rs` |
///
/// A driver left out of the build rejects its prefix with
/// [`DriverError::DriverUnavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeConnector;

impl NativeConnector {
    /// Create a connector.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for NativeConnector {
    async fn connect(&self, request: &ProbeRequest) -> DriverResult<Box<dyn ProbeConnection>> {
        let Some(dialect) = Dialect::from_url(request.url()) else {
            return Err(DriverError::NoSuitableDriver(mask_password(request.url())));
        };
        let url = JdbcUrl::parse(request.url())?;
        debug!(%dialect, host = url.host(), port = url.port_or_default(), "Dispatching probe");

        match dialect {
            Dialect::PostgreSql => connect_postgres(&url, request).await,
            Dialect::MySql => connect_mysql(&url, request).await,
            Dialect::SqlServer => connect_mssql(&url, request).await,
            Dialect::Oracle => connect_oracle(&url, request).await,
            Dialect::Snowflake => connect_snowflake(&url, request).await,
        }
    }
}

#[cfg(feature = "postgres")]
async fn connect_postgres(
    url: &JdbcUrl,
    request: &ProbeRequest,
) -> DriverResult<Box<dyn ProbeConnection>> {
    let conn = crate::postgres::connect(url, request.credentials(url)).await?;
    Ok(Box::new(conn))
}

#[cfg(not(feature = "postgres"))]
async fn connect_postgres(
    _url: &JdbcUrl,
    _request: &ProbeRequest,
) -> DriverResult<Box<dyn ProbeConnection>> {
    Err(DriverError::DriverUnavailable("PostgreSQL"))
}

#[cfg(feature = "mysql")]
async fn connect_mysql(
    url: &JdbcUrl,
    request: &ProbeRequest,
) -> DriverResult<Box<dyn ProbeConnection>> {
    let conn = crate::mysql::connect(url, request.credentials(url)).await?;
    Ok(Box::new(conn))
}

#[cfg(not(feature = "mysql"))]
async fn connect_mysql(
    _url: &JdbcUrl,
    _request: &ProbeRequest,
) -> DriverResult<Box<dyn ProbeConnection>> {
    Err(DriverError::DriverUnavailable("MySQL"))
}

#[cfg(feature = "mssql")]
async fn connect_mssql(
    url: &JdbcUrl,
    request: &ProbeRequest,
) -> DriverResult<Box<dyn ProbeConnection>> {
    let conn = crate::mssql::connect(url, request.credentials(url)).await?;
    Ok(Box::new(conn))
}

#[cfg(not(feature = "mssql"))]
async fn connect_mssql(
    _url: &JdbcUrl,
    _request: &ProbeRequest,
) -> DriverResult<Box<dyn ProbeConnection>> {
    Err(DriverError::DriverUnavailable("SQL Server"))
}

#[cfg(feature = "oracle")]
async fn connect_oracle(
    url: &JdbcUrl,
    request: &ProbeRequest,
) -> DriverResult<Box<dyn ProbeConnection>> {
    let conn = crate::oracle::connect(request.url(), url, request.credentials(url)).await?;
    Ok(Box::new(conn))
}

#[cfg(not(feature = "oracle"))]
async fn connect_oracle(
    _url: &JdbcUrl,
    _request: &ProbeRequest,
) -> DriverResult<Box<dyn ProbeConnection>> {
    Err(DriverError::DriverUnavailable("Oracle"))
}

#[cfg(feature = "snowflake")]
async fn connect_snowflake(
    url: &JdbcUrl,
    request: &ProbeRequest,
) -> DriverResult<Box<dyn ProbeConnection>> {
    let conn = crate::snowflake::connect(url, request.credentials(url)).await?;
    Ok(Box::new(conn))
}

#[cfg(not(feature = "snowflake"))]
async fn connect_snowflake(
    _url: &JdbcUrl,
    _request: &ProbeRequest,
) -> DriverResult<Box<dyn ProbeConnection>> {
    Err(DriverError::DriverUnavailable("Snowflake"))
}
