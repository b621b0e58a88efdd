//! End-to-end validation: descriptor in, probe outcome out.

use std::sync::Arc;

use connprobe_core::{ConnectionDescriptor, ConnectionError, ConnectionResult, synthesize};
use tracing::{info, instrument};

use crate::connector::{Connected, Connector, ProbeOutcome, ProbeRequest, probe};
use crate::native::NativeConnector;

/// Parses descriptors, synthesizes connection strings and probes them.
#[derive(Clone)]
pub struct Validator {
    connector: Arc<dyn Connector>,
}

impl Validator {
    /// Create a validator over a connector.
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }

    /// Create a validator over the native drivers.
    pub fn native() -> Self {
        Self::new(Arc::new(NativeConnector::new()))
    }

    /// The connector probes go through.
    pub fn connector(&self) -> &dyn Connector {
        self.connector.as_ref()
    }

    /// Validate a raw JSON request body.
    pub async fn validate(&self, body: &[u8]) -> ConnectionResult<Connected> {
        let descriptor = ConnectionDescriptor::from_json(body)?;
        self.validate_descriptor(&descriptor).await
    }

    /// Validate an already parsed descriptor.
    ///
    /// Client errors are returned before any connection attempt is made.
    #[instrument(skip_all, fields(name = descriptor.name(), database_type = descriptor.database_type()))]
    pub async fn validate_descriptor(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> ConnectionResult<Connected> {
        let url = synthesize(descriptor)?;
        let request = ProbeRequest::new(url, descriptor.username(), descriptor.password());

        match probe(self.connector.as_ref(), &request).await {
            ProbeOutcome::Connected(connected) => {
                info!(driver = connected.driver, "Descriptor validated");
                Ok(connected)
            }
            ProbeOutcome::DriverRejected(message) => Err(ConnectionError::DriverRejected(message)),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::native()
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::tests::StubConnector;
    use std::sync::atomic::Ordering;

    fn validator(stub: StubConnector) -> (Validator, Arc<StubConnector>) {
        let stub = Arc::new(stub);
        (Validator::new(stub.clone()), stub)
    }

    #[tokio::test]
    async fn test_valid_mysql_descriptor_connects() {
        let (validator, stub) = validator(StubConnector::default());
        let body = br#"{"host":"h","port":"3306","databaseName":"d","username":"u","password":"p","databaseType":"mysql"}"#;

        let connected = validator.validate(body).await.unwrap();
        assert_eq!(connected.driver, "stub");
        assert_eq!(stub.connects.load(Ordering::SeqCst), 1);
        assert_eq!(stub.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_endpoint_never_probes() {
        let (validator, stub) = validator(StubConnector::default());

        let err = validator
            .validate(br#"{"databaseType":"postgresql"}"#)
            .await
            .unwrap_err();
        assert_eq!(err, ConnectionError::InsufficientDetails);
        assert_eq!(stub.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unsupported_type_never_probes() {
        let (validator, stub) = validator(StubConnector::default());
        let body = br#"{"host":"h","port":"1","databaseName":"d","databaseType":"oracle9000"}"#;

        let err = validator.validate(body).await.unwrap_err();
        assert_eq!(err, ConnectionError::UnsupportedDialect("oracle9000".into()));
        assert_eq!(stub.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_supplied_string_is_probed() {
        let (validator, stub) = validator(StubConnector {
            fail_connect: Some("no route"),
            ..Default::default()
        });
        let body = br#"{"connectionString":"jdbc:custom://x"}"#;

        let err = validator.validate(body).await.unwrap_err();
        assert_eq!(
            err,
            ConnectionError::DriverRejected("Invalid connection URL: no route".into())
        );
        assert!(!err.is_client_error());
        assert_eq!(stub.connects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (validator, stub) = validator(StubConnector::default());

        let err = validator.validate(b"{not json").await.unwrap_err();
        assert!(matches!(err, ConnectionError::MalformedInput(_)));
        assert_eq!(stub.connects.load(Ordering::SeqCst), 0);
    }
}
