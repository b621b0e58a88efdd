//! SQL Server probe via `tiberius`.

use async_trait::async_trait;
use connprobe_core::{ConnectionError, JdbcUrl};
use tiberius::{AuthMethod, Client, Config, EncryptionLevel};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::debug;

use crate::connector::{Credentials, ProbeConnection};
use crate::error::{DriverError, DriverResult};

/// An open SQL Server session.
pub struct MssqlConnection {
    client: Client<Compat<TcpStream>>,
}

/// Build the `tiberius` configuration for a parsed URL.
///
/// Recognized properties: `instanceName`, `encrypt`, `trustServerCertificate`.
pub fn config(url: &JdbcUrl, credentials: Credentials<'_>) -> DriverResult<Config> {
    let mut config = Config::new();
    config.host(url.host());
    config.port(url.port_or_default());
    config.application_name("connprobe");

    if let Some(database) = url.database() {
        config.database(database);
    }
    if let Some(instance) = url.property("instanceName").filter(|i| !i.is_empty()) {
        config.instance_name(instance);
    }

    let user = credentials.user.ok_or_else(|| {
        DriverError::from(ConnectionError::invalid_url(
            "SQL Server login requires a user name",
        ))
    })?;
    config.authentication(AuthMethod::sql_server(
        user,
        credentials.password.unwrap_or_default(),
    ));

    let encryption = match url.property("encrypt").map(str::to_lowercase).as_deref() {
        None | Some("false") | Some("no") => EncryptionLevel::Off,
        Some(_) => EncryptionLevel::Required,
    };
    config.encryption(encryption);

    if url
        .property("trustServerCertificate")
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    {
        config.trust_cert();
    }

    Ok(config)
}

/// Open a SQL Server session.
pub async fn connect(url: &JdbcUrl, credentials: Credentials<'_>) -> DriverResult<MssqlConnection> {
    let config = config(url, credentials)?;

    let addr = config.get_addr();
    let tcp = TcpStream::connect(&addr)
        .await
        .map_err(|e| DriverError::unreachable(url.host(), url.port_or_default(), e))?;
    tcp.set_nodelay(true)?;

    let client = Client::connect(config, tcp.compat_write()).await?;
    debug!(host = url.host(), "SQL Server session established");
    Ok(MssqlConnection { client })
}

#[async_trait]
impl ProbeConnection for MssqlConnection {
    fn driver(&self) -> &'static str {
        "sqlserver"
    }

    async fn close(self: Box<Self>) -> DriverResult<()> {
        self.client.close().await?;
        Ok(())
    }
}
