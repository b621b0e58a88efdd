//! PostgreSQL probe via `tokio-postgres`.

use async_trait::async_trait;
use connprobe_core::JdbcUrl;
use tokio::task::JoinHandle;
use tokio_postgres::NoTls;
use tokio_postgres::config::SslMode;
use tracing::{debug, warn};

use crate::connector::{Credentials, ProbeConnection};
use crate::error::DriverResult;

/// An open PostgreSQL session.
pub struct PgConnection {
    client: tokio_postgres::Client,
    task: JoinHandle<()>,
}

/// Build the `tokio-postgres` configuration for a parsed URL.
pub fn config(url: &JdbcUrl, credentials: Credentials<'_>) -> tokio_postgres::Config {
    let mut config = tokio_postgres::Config::new();
    config.host(url.host());
    config.port(url.port_or_default());
    config.application_name("connprobe");

    if let Some(database) = url.database() {
        config.dbname(database);
    }
    if let Some(user) = credentials.user {
        config.user(user);
    }
    if let Some(password) = credentials.password {
        config.password(password);
    }
    config.ssl_mode(ssl_mode(url));

    config
}

/// TLS mode from the `sslmode` property, or pgjdbc's `ssl=true`.
///
/// Any mode that demands TLS maps to [`SslMode::Require`]. The probe carries
/// no TLS connector, so such a URL is rejected instead of falling back to
/// plaintext.
pub fn ssl_mode(url: &JdbcUrl) -> SslMode {
    match url.property("sslmode").map(str::to_ascii_lowercase).as_deref() {
        Some("disable") => SslMode::Disable,
        Some("require" | "verify-ca" | "verify-full") => SslMode::Require,
        Some(_) => SslMode::Prefer,
        None if url
            .property("ssl")
            .is_some_and(|v| v.eq_ignore_ascii_case("true")) =>
        {
            SslMode::Require
        }
        None => SslMode::Prefer,
    }
}

/// Open a PostgreSQL session.
pub async fn connect(url: &JdbcUrl, credentials: Credentials<'_>) -> DriverResult<PgConnection> {
    let (client, connection) = config(url, credentials).connect(NoTls).await?;

    let task = tokio::spawn(async move {
        if let Err(e) = connection.await {
            warn!(error = %e, "PostgreSQL connection task ended with error");
        }
    });

    debug!(host = url.host(), "PostgreSQL session established");
    Ok(PgConnection { client, task })
}

#[async_trait]
impl ProbeConnection for PgConnection {
    fn driver(&self) -> &'static str {
        "postgresql"
    }

    async fn close(self: Box<Self>) -> DriverResult<()> {
        let Self { client, task } = *self;
        // Dropping the client ends the connection future.
        drop(client);
        task.await.map_err(std::io::Error::other)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_url() {
        let url = JdbcUrl::parse("jdbc:postgresql://db.internal:6543/sales").unwrap();
        let config = config(
            &url,
            Credentials {
                user: Some("app"),
                password: Some("secret"),
            },
        );

        assert_eq!(config.get_ports(), &[6543]);
        assert_eq!(config.get_dbname(), Some("sales"));
        assert_eq!(config.get_user(), Some("app"));
        assert_eq!(config.get_password(), Some(&b"secret"[..]));
        assert_eq!(config.get_application_name(), Some("connprobe"));
    }

    #[test]
    fn test_config_default_port_and_ssl() {
        let url = JdbcUrl::parse("jdbc:postgresql://db/sales?sslmode=disable").unwrap();
        let config = config(&url, Credentials::default());

        assert_eq!(config.get_ports(), &[5432]);
        assert_eq!(config.get_user(), None);
        assert_eq!(config.get_ssl_mode(), SslMode::Disable);
    }

    #[test]
    fn test_ssl_mode_mapping() {
        let mode = |raw: &str| ssl_mode(&JdbcUrl::parse(raw).unwrap());

        assert_eq!(mode("jdbc:postgresql://db/d"), SslMode::Prefer);
        assert_eq!(mode("jdbc:postgresql://db/d?sslmode=prefer"), SslMode::Prefer);
        assert_eq!(mode("jdbc:postgresql://db/d?sslmode=require"), SslMode::Require);
        assert_eq!(mode("jdbc:postgresql://db/d?sslmode=VERIFY-FULL"), SslMode::Require);
        assert_eq!(mode("jdbc:postgresql://db/d?ssl=true"), SslMode::Require);
        assert_eq!(mode("jdbc:postgresql://db/d?ssl=true&sslmode=disable"), SslMode::Disable);
    }

    #[tokio::test]
    async fn test_required_tls_never_downgrades() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        // Answer the SSLRequest with 'N' (TLS not supported).
        tokio::spawn(async move {
            use tokio::io::{AsyncReadExt, AsyncWriteExt};
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut request = [0u8; 8];
                let _ = socket.read_exact(&mut request).await;
                let _ = socket.write_all(b"N").await;
            }
        });

        let url = JdbcUrl::parse(&format!("jdbc:postgresql://127.0.0.1:{}/d?sslmode=require", port))
            .unwrap();
        let err = connect(&url, Credentials::default()).await.err().unwrap();
        assert!(err.to_string().contains("TLS"), "{}", err);
    }
}
