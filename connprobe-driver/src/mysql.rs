//! MySQL probe via `mysql_async`.

use async_trait::async_trait;
use connprobe_core::JdbcUrl;
use mysql_async::{Conn, Opts, OptsBuilder, SslOpts};
use tracing::debug;

use crate::connector::{Credentials, ProbeConnection};
use crate::error::DriverResult;

/// An open MySQL session.
pub struct MySqlConnection {
    conn: Conn,
}

/// Build `mysql_async` options for a parsed URL.
pub fn opts(url: &JdbcUrl, credentials: Credentials<'_>) -> Opts {
    OptsBuilder::default()
        .ip_or_hostname(url.host())
        .tcp_port(url.port_or_default())
        .db_name(url.database())
        .user(credentials.user)
        .pass(credentials.password)
        .prefer_socket(false)
        .ssl_opts(ssl_opts(url))
        .into()
}

/// TLS settings from Connector/J's `sslMode`, or the legacy `requireSSL=true`.
///
/// `REQUIRED` encrypts without checking the certificate, `VERIFY_CA` checks
/// the chain and `VERIFY_IDENTITY` also checks the host name. Other modes
/// connect in plaintext.
pub fn ssl_opts(url: &JdbcUrl) -> Option<SslOpts> {
    let mode = match url.property("sslMode") {
        Some(mode) => mode.to_ascii_uppercase(),
        None if url
            .property("requireSSL")
            .is_some_and(|v| v.eq_ignore_ascii_case("true")) =>
        {
            "REQUIRED".to_string()
        }
        None => return None,
    };

    match mode.as_str() {
        "REQUIRED" => Some(
            SslOpts::default()
                .with_danger_accept_invalid_certs(true)
                .with_danger_skip_domain_validation(true),
        ),
        "VERIFY_CA" => Some(SslOpts::default().with_danger_skip_domain_validation(true)),
        "VERIFY_IDENTITY" => Some(SslOpts::default()),
        _ => None,
    }
}

/// Open a MySQL session.
pub async fn connect(url: &JdbcUrl, credentials: Credentials<'_>) -> DriverResult<MySqlConnection> {
    let conn = Conn::new(opts(url, credentials)).await?;
    debug!(host = url.host(), "MySQL session established");
    Ok(MySqlConnection { conn })
}

#[async_trait]
impl ProbeConnection for MySqlConnection {
    fn driver(&self) -> &'static str {
        "mysql"
    }

    async fn close(self: Box<Self>) -> DriverResult<()> {
        self.conn.disconnect().await?;
        Ok(())
    }
}
