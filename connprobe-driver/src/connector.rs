//! The probe seam: open one connection, release it, report the outcome.

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use connprobe_core::{JdbcUrl, mask_password};
use tracing::{debug, info, warn};

use crate::error::DriverResult;

/// What to probe: a connection string and the credentials to present.
#[derive(Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    url: String,
    username: String,
    password: String,
}

impl ProbeRequest {
    /// Create a probe request.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// The connection string.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Username supplied alongside the connection string.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password supplied alongside the connection string.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Credentials to present for a parsed URL.
    ///
    /// Non-empty request credentials win; otherwise the `user` and `password`
    /// URL properties are used.
    pub fn credentials<'a>(&'a self, url: &'a JdbcUrl) -> Credentials<'a> {
        let pick = |explicit: &'a str, embedded: Option<&'a str>| {
            if explicit.is_empty() { embedded } else { Some(explicit) }
        };
        Credentials {
            user: pick(&self.username, url.user()),
            password: pick(&self.password, url.password()),
        }
    }
}

impl fmt::Debug for ProbeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeRequest")
            .field("url", &mask_password(&self.url))
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Credentials resolved for a single probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Credentials<'a> {
    /// Username, if any.
    pub user: Option<&'a str>,
    /// Password, if any.
    pub password: Option<&'a str>,
}

/// An open connection owned by a probe.
///
/// `close` consumes the handle, so it can only be released once. A handle
/// dropped without `close` is released by the driver's own `Drop`.
#[async_trait]
pub trait ProbeConnection: Send {
    /// Name of the driver that opened the connection.
    fn driver(&self) -> &'static str;

    /// Release the connection.
    async fn close(self: Box<Self>) -> DriverResult<()>;
}

/// Opens probe connections.
///
/// Production code uses [`NativeConnector`](crate::NativeConnector); tests
/// substitute stubs to exercise failure paths without a database.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Attempt to open exactly one connection.
    async fn connect(&self, request: &ProbeRequest) -> DriverResult<Box<dyn ProbeConnection>>;
}

/// Result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The connection was opened (and released).
    Connected(Connected),
    /// The driver refused or failed to open the connection.
    DriverRejected(String),
}

impl ProbeOutcome {
    /// Whether the probe succeeded.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }
}

/// Details of a successful probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connected {
    /// Driver that opened the connection.
    pub driver: &'static str,
    /// Time spent opening and releasing the connection.
    pub elapsed: Duration,
}

/// Probe a connection string once.
///
/// Exactly one connection attempt is made. On success the handle is closed
/// before returning; a failed close is logged and does not change the outcome.
/// Driver errors are captured as text and never propagated as faults.
pub async fn probe(connector: &dyn Connector, request: &ProbeRequest) -> ProbeOutcome {
    let started = Instant::now();
    debug!(url = %mask_password(request.url()), "Probing connection");

    match connector.connect(request).await {
        Ok(connection) => {
            let driver = connection.driver();
            if let Err(e) = connection.close().await {
                warn!(driver, error = %e, "Probe connection did not close cleanly");
            }
            let elapsed = started.elapsed();
            info!(
                driver,
                elapsed_ms = elapsed.as_millis() as u64,
                "Connected to the database"
            );
            ProbeOutcome::Connected(Connected { driver, elapsed })
        }
        Err(e) => {
            let message = e.to_string();
            warn!(
                url = %mask_password(request.url()),
                driver = e.driver_name().unwrap_or("none"),
                error = %message,
                "Probe rejected by driver"
            );
            ProbeOutcome::DriverRejected(message)
        }
    }
}
