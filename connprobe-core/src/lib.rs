//! Connection descriptor normalization and JDBC connection string synthesis.
//!
//! This crate is the network-free half of connprobe: it turns a flat JSON
//! record into a [`ConnectionDescriptor`], derives a dialect-specific JDBC
//! connection string from it, and classifies everything that can go wrong in
//! a single [`ConnectionError`] taxonomy.
//!
//! # Synthesis Rules
//!
//! | `databaseType` | Template |
//! |----------------|----------|
//! | `oracle`       | `jdbc:oracle:thin:@//{host}:{port}/{databaseName}` |
//! | `mysql`        | `jdbc:mysql://{host}:{port}/{databaseName}?user={username}&password={password}` |
//! | `postgresql`   | `jdbc:postgresql://{host}:{port}/{databaseName}` |
//! | `sqlserver`    | `jdbc:sqlserver://{host}:{port};databaseName={databaseName}` |
//! | `snowflake`    | `jdbc:snowflake://{host}.snowflakecomputing.com/?db={databaseName}` |
//!
//! A non-empty `connectionString` bypasses every rule and is returned as-is.
//!
//! # Example
//!
//! ```rust
//! use connprobe_core::{ConnectionDescriptor, ConnectionError, synthesize};
//!
//! let d = ConnectionDescriptor::from_json(
//!     br#"{"host":"h","port":"3306","databaseName":"d","username":"u","password":"p","databaseType":"mysql"}"#,
//! ).unwrap();
//! assert_eq!(synthesize(&d).unwrap(), "jdbc:mysql://h:3306/d?user=u&password=p");
//!
//! let d = ConnectionDescriptor::from_json(br#"{"databaseType":"postgresql"}"#).unwrap();
//! assert_eq!(synthesize(&d), Err(ConnectionError::InsufficientDetails));
//! ```

pub mod descriptor;
pub mod dialect;
pub mod error;
pub mod jdbc;
pub mod logging;
pub mod synth;

pub use descriptor::{ConnectionDescriptor, ConnectionDescriptorBuilder, FIELD_NAMES};
pub use dialect::Dialect;
pub use error::{ConnectionError, ConnectionResult};
pub use jdbc::{JdbcUrl, mask_password};
pub use synth::synthesize;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ConnectionDescriptor, ConnectionError, ConnectionResult, Dialect, JdbcUrl, mask_password,
        synthesize,
    };
}
