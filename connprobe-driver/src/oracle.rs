//! Oracle probe via the `oracle` crate (ODPI-C).
//!
//! ODPI-C calls block, so login and logoff run on the blocking pool. The
//! Oracle client libraries are loaded at first use; when they are missing the
//! driver error says so and the probe is rejected.

use async_trait::async_trait;
use connprobe_core::{Dialect, JdbcUrl};
use tokio::task;
use tracing::debug;

use crate::connector::{Credentials, ProbeConnection};
use crate::error::{DriverError, DriverResult};

/// An open Oracle session.
pub struct OracleConnection {
    conn: oracle::Connection,
}

/// Build the Oracle connect string for a parsed URL.
///
/// `@host:port:SID` becomes a connect descriptor naming the SID; the
/// `@//host:port/service` form becomes an Easy Connect string.
pub fn connect_string(raw: &str, url: &JdbcUrl) -> String {
    let host = url.host();
    let port = url.port_or_default();
    let target = url.database().unwrap_or_default();

    if names_sid(raw) {
        return format!(
            "(DESCRIPTION=(ADDRESS=(PROTOCOL=TCP)(HOST={})(PORT={}))(CONNECT_DATA=(SID={})))",
            host, port, target
        );
    }

    let host = if host.contains(':') {
        format!("[{}]", host)
    } else {
        host.to_string()
    };
    if target.is_empty() {
        format!("//{}:{}", host, port)
    } else {
        format!("//{}:{}/{}", host, port, target)
    }
}

fn names_sid(raw: &str) -> bool {
    raw.strip_prefix(Dialect::Oracle.jdbc_prefix())
        .and_then(|rest| rest.strip_prefix('@'))
        .is_some_and(|target| {
            let target = target.split('?').next().unwrap_or_default();
            !target.contains('/') && !target.starts_with('[') && target.matches(':').count() == 2
        })
}

/// Open an Oracle session.
pub async fn connect(
    raw: &str,
    url: &JdbcUrl,
    credentials: Credentials<'_>,
) -> DriverResult<OracleConnection> {
    let connect_string = connect_string(raw, url);
    let user = credentials.user.unwrap_or_default().to_string();
    let password = credentials.password.unwrap_or_default().to_string();

    let conn = task::spawn_blocking(move || {
        oracle::Connection::connect(user, password, connect_string)
    })
    .await
    .map_err(|e| DriverError::driver("oracle", e))??;

    debug!(host = url.host(), "Oracle session established");
    Ok(OracleConnection { conn })
}

#[async_trait]
impl ProbeConnection for OracleConnection {
    fn driver(&self) -> &'static str {
        "oracle"
    }

    async fn close(self: Box<Self>) -> DriverResult<()> {
        let conn = self.conn;
        task::spawn_blocking(move || conn.close())
            .await
            .map_err(|e| DriverError::driver("oracle", e))??;
        Ok(())
    }
}
