//! Connection descriptor and its parser.

use std::fmt;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ConnectionError, ConnectionResult};

/// The eight field names recognized in an inbound record.
pub const FIELD_NAMES: [&str; 8] = [
    "name",
    "host",
    "port",
    "databaseName",
    "username",
    "password",
    "connectionString",
    "databaseType",
];

/// Alternate spelling of `connectionString` sent by the web form.
pub const CONNECTION_STRING_ALIAS: &str = "jdbcString";

/// Normalized description of how to reach a database.
///
/// Every field defaults to the empty string. The value is immutable once built;
/// use [`ConnectionDescriptor::from_json`] for request bodies or
/// [`ConnectionDescriptor::builder`] in code.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    name: String,
    host: String,
    port: String,
    database_name: String,
    username: String,
    password: String,
    connection_string: String,
    database_type: String,
}

impl ConnectionDescriptor {
    /// Create a builder.
    pub fn builder() -> ConnectionDescriptorBuilder {
        ConnectionDescriptorBuilder::default()
    }

    /// Parse a raw request body.
    ///
    /// The body must be a JSON object; anything else is a
    /// [`ConnectionError::MalformedInput`]. Missing fields are not errors.
    ///
    /// ```rust
    /// use connprobe_core::ConnectionDescriptor;
    ///
    /// let d = ConnectionDescriptor::from_json(br#"{"host":"db1","port":5432}"#).unwrap();
    /// assert_eq!(d.host(), "db1");
    /// assert_eq!(d.port(), "5432");
    /// assert_eq!(d.database_name(), "");
    /// ```
    pub fn from_json(raw: &[u8]) -> ConnectionResult<Self> {
        let value: Value =
            serde_json::from_slice(raw).map_err(|e| ConnectionError::malformed(e.to_string()))?;

        match value {
            Value::Object(map) => Ok(Self::from_map(&map)),
            other => Err(ConnectionError::malformed(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Build a descriptor from an already parsed JSON object.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut connection_string = read_field(map, "connectionString");
        if connection_string.is_empty() {
            connection_string = read_field(map, CONNECTION_STRING_ALIAS);
        }

        let ignored = map
            .keys()
            .filter(|k| !FIELD_NAMES.contains(&k.as_str()) && k.as_str() != CONNECTION_STRING_ALIAS)
            .count();

        let descriptor = Self {
            name: read_field(map, "name"),
            host: read_field(map, "host"),
            port: read_field(map, "port"),
            database_name: read_field(map, "databaseName"),
            username: read_field(map, "username"),
            password: read_field(map, "password"),
            connection_string,
            database_type: read_field(map, "databaseType"),
        };

        debug!(
            name = %descriptor.name,
            host = %descriptor.host,
            database_type = %descriptor.database_type,
            ignored_keys = ignored,
            "Descriptor parsed"
        );

        descriptor
    }

    /// Display name of the connection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Database host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Database port, as supplied.
    pub fn port(&self) -> &str {
        &self.port
    }

    /// Database (or service) name.
    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Username for authentication.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password for authentication.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Pre-built connection string, if any.
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Database type as supplied (not normalized).
    pub fn database_type(&self) -> &str {
        &self.database_type
    }

    /// Whether a pre-built connection string was supplied.
    pub fn has_connection_string(&self) -> bool {
        !self.connection_string.is_empty()
    }

    /// Whether host, port and database name are all present.
    pub fn has_endpoint(&self) -> bool {
        !self.host.is_empty() && !self.port.is_empty() && !self.database_name.is_empty()
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "***" };
        f.debug_struct("ConnectionDescriptor")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_name", &self.database_name)
            .field("username", &self.username)
            .field("password", &password)
            .field(
                "connection_string",
                &crate::jdbc::mask_password(&self.connection_string),
            )
            .field("database_type", &self.database_type)
            .finish()
    }
}

/// Builder for [`ConnectionDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct ConnectionDescriptorBuilder {
    inner: ConnectionDescriptor,
}

impl ConnectionDescriptorBuilder {
    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = name.into();
        self
    }

    /// Set the host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.inner.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.inner.port = port.into();
        self
    }

    /// Set the database name.
    pub fn database_name(mut self, database_name: impl Into<String>) -> Self {
        self.inner.database_name = database_name.into();
        self
    }

    /// Set the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.inner.username = username.into();
        self
    }

    /// Set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.inner.password = password.into();
        self
    }

    /// Set a pre-built connection string.
    pub fn connection_string(mut self, connection_string: impl Into<String>) -> Self {
        self.inner.connection_string = connection_string.into();
        self
    }

    /// Set the database type.
    pub fn database_type(mut self, database_type: impl Into<String>) -> Self {
        self.inner.database_type = database_type.into();
        self
    }

    /// Finish building.
    pub fn build(self) -> ConnectionDescriptor {
        self.inner
    }
}

fn read_field(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_all_fields() {
        let d = ConnectionDescriptor::from_json(
            br#"{
                "name": "sales",
                "host": "db1",
                "port": "5432",
                "databaseName": "sales",
                "username": "u",
                "password": "p",
                "connectionString": "",
                "databaseType": "postgresql"
            }"#,
        )
        .unwrap();

        assert_eq!(d.name(), "sales");
        assert_eq!(d.host(), "db1");
        assert_eq!(d.port(), "5432");
        assert_eq!(d.database_name(), "sales");
        assert_eq!(d.username(), "u");
        assert_eq!(d.password(), "p");
        assert_eq!(d.connection_string(), "");
        assert_eq!(d.database_type(), "postgresql");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let d = ConnectionDescriptor::from_json(b"{}").unwrap();
        assert_eq!(d, ConnectionDescriptor::default());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let d = ConnectionDescriptor::from_json(br#"{"host":"h","schema":"public","ssl":true}"#)
            .unwrap();
        assert_eq!(d, ConnectionDescriptor::builder().host("h").build());
    }

    #[test]
    fn test_string_convertible_values() {
        let d = ConnectionDescriptor::from_json(br#"{"port":3306,"name":true}"#).unwrap();
        assert_eq!(d.port(), "3306");
        assert_eq!(d.name(), "true");
    }

    #[test]
    fn test_unreadable_values_become_empty() {
        let d = ConnectionDescriptor::from_json(br#"{"host":null,"port":[1],"databaseName":{}}"#)
            .unwrap();
        assert_eq!(d.host(), "");
        assert_eq!(d.port(), "");
        assert_eq!(d.database_name(), "");
    }

    #[test]
    fn test_jdbc_string_alias() {
        let d = ConnectionDescriptor::from_json(br#"{"jdbcString":"jdbc:custom://x"}"#).unwrap();
        assert_eq!(d.connection_string(), "jdbc:custom://x");

        let d = ConnectionDescriptor::from_json(
            br#"{"jdbcString":"jdbc:alias://x","connectionString":"jdbc:main://x"}"#,
        )
        .unwrap();
        assert_eq!(d.connection_string(), "jdbc:main://x");
    }

    #[test]
    fn test_malformed_json() {
        let err = ConnectionDescriptor::from_json(b"{\"host\":").unwrap_err();
        assert!(matches!(err, ConnectionError::MalformedInput(_)));

        let err = ConnectionDescriptor::from_json(b"").unwrap_err();
        assert!(matches!(err, ConnectionError::MalformedInput(_)));
    }

    #[test]
    fn test_non_object_payload() {
        let err = ConnectionDescriptor::from_json(b"[1,2]").unwrap_err();
        assert_eq!(
            err,
            ConnectionError::MalformedInput("expected a JSON object, found an array".into())
        );
    }

    #[test]
    fn test_has_endpoint() {
        let d = ConnectionDescriptor::builder()
            .host("h")
            .port("1")
            .database_name("d")
            .build();
        assert!(d.has_endpoint());
        assert!(!ConnectionDescriptor::builder().host("h").port("1").build().has_endpoint());
    }

    #[test]
    fn test_debug_redacts_password() {
        let d = ConnectionDescriptor::builder()
            .password("hunter2")
            .connection_string("jdbc:mysql://h:1/d?user=u&password=hunter2")
            .build();
        let dbg = format!("{:?}", d);
        assert!(!dbg.contains("hunter2"), "{}", dbg);
    }
}
