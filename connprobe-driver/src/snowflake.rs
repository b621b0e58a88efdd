//! Snowflake probe via `snowflake-connector-rs`.

use async_trait::async_trait;
use connprobe_core::{ConnectionError, JdbcUrl};
use snowflake_connector_rs::{
    SnowflakeAuthMethod, SnowflakeClient, SnowflakeClientConfig, SnowflakeSession,
};
use tracing::debug;

use crate::connector::{Credentials, ProbeConnection};
use crate::error::{DriverError, DriverResult};

const HOST_SUFFIX: &str = ".snowflakecomputing.com";

/// An open Snowflake session.
pub struct SnowflakeConnection {
    _session: SnowflakeSession,
}

/// Account identifier from a `<account>.snowflakecomputing.com` host.
pub fn account(url: &JdbcUrl) -> DriverResult<String> {
    let host = url.host();
    let split = host.len().checked_sub(HOST_SUFFIX.len());
    match split {
        Some(at)
            if at > 0
                && host.is_char_boundary(at)
                && host[at..].eq_ignore_ascii_case(HOST_SUFFIX) =>
        {
            Ok(host[..at].to_string())
        }
        _ => Err(ConnectionError::invalid_url(format!(
            "Snowflake host '{}' must end with '{}'",
            host, HOST_SUFFIX
        ))
        .into()),
    }
}

/// Build the client configuration for a parsed URL.
///
/// Recognized properties: `db`, `warehouse`, `schema`, `role`.
pub fn config(url: &JdbcUrl) -> DriverResult<SnowflakeClientConfig> {
    let property = |key: &str| url.property(key).filter(|v| !v.is_empty()).map(String::from);

    Ok(SnowflakeClientConfig {
        account: account(url)?,
        warehouse: property("warehouse"),
        database: url.database().map(String::from),
        schema: property("schema"),
        role: property("role"),
        timeout: None,
    })
}

/// Log in to Snowflake with a password.
pub async fn connect(
    url: &JdbcUrl,
    credentials: Credentials<'_>,
) -> DriverResult<SnowflakeConnection> {
    let config = config(url)?;
    let user = credentials.user.ok_or_else(|| {
        DriverError::from(ConnectionError::invalid_url(
            "Snowflake login requires a user name",
        ))
    })?;
    let auth = SnowflakeAuthMethod::Password(credentials.password.unwrap_or_default().to_string());

    let client = SnowflakeClient::new(user, auth, config)?;
    let session = client.create_session().await?;

    debug!(host = url.host(), "Snowflake session established");
    Ok(SnowflakeConnection { _session: session })
}

#[async_trait]
impl ProbeConnection for SnowflakeConnection {
    fn driver(&self) -> &'static str {
        "snowflake"
    }

    async fn close(self: Box<Self>) -> DriverResult<()> {
        // The session holds no socket; it is released when dropped here.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_from_host() {
        let url = JdbcUrl::parse("jdbc:snowflake://acme.snowflakecomputing.com/?db=sales").unwrap();
        assert_eq!(account(&url).unwrap(), "acme");

        let url =
            JdbcUrl::parse("jdbc:snowflake://xy123.eu-west-1.SnowflakeComputing.com/?db=d").unwrap();
        assert_eq!(account(&url).unwrap(), "xy123.eu-west-1");
    }

    #[test]
    fn test_foreign_host_rejected() {
        for raw in [
            "jdbc:snowflake://127.0.0.1:8443/?db=d",
            "jdbc:snowflake://.snowflakecomputing.com/?db=d",
        ] {
            let url = JdbcUrl::parse(raw).unwrap();
            let err = account(&url).unwrap_err();
            assert!(matches!(err, DriverError::InvalidUrl(_)), "{}", err);
        }
    }

    #[test]
    fn test_config_properties() {
        let url = JdbcUrl::parse(
            "jdbc:snowflake://acme.snowflakecomputing.com/?db=sales&warehouse=wh&role=&schema=public",
        )
        .unwrap();
        let config = config(&url).unwrap();

        assert_eq!(config.account, "acme");
        assert_eq!(config.database.as_deref(), Some("sales"));
        assert_eq!(config.warehouse.as_deref(), Some("wh"));
        assert_eq!(config.schema.as_deref(), Some("public"));
        assert_eq!(config.role, None);
    }

    #[tokio::test]
    async fn test_login_requires_user() {
        let url = JdbcUrl::parse("jdbc:snowflake://acme.snowflakecomputing.com/?db=d").unwrap();
        let err = connect(&url, Credentials::default()).await.err().unwrap();
        assert_eq!(
            err.to_string(),
            "Invalid connection URL: Snowflake login requires a user name"
        );
    }
}
