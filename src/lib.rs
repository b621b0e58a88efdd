//! # connprobe
//!
//! Validate database connection details before anyone relies on them.
//!
//! connprobe accepts a flat JSON descriptor (host, port, database name,
//! credentials, database type, or a ready-made connection string), derives a
//! JDBC connection string for the database type, opens exactly one connection
//! with it, releases that connection, and reports the result.
//!
//! - [`core`]: descriptor parsing, connection string synthesis, error taxonomy
//! - [`driver`]: single-shot probes over the native async drivers
//! - [`http`]: the `/hello` HTTP endpoint (feature `server`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use connprobe::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ConnectionError> {
//!     let body = br#"{
//!         "host": "localhost",
//!         "port": "5432",
//!         "databaseName": "postgres",
//!         "username": "postgres",
//!         "password": "postgres",
//!         "databaseType": "postgresql"
//!     }"#;
//!
//!     let connected = Validator::native().validate(body).await?;
//!     println!("connected via {}", connected.driver);
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Descriptor parsing and connection string synthesis.
pub mod core {
    pub use connprobe_core::*;
}

/// Connectivity probes.
pub mod driver {
    pub use connprobe_driver::*;
}

/// HTTP endpoint.
#[cfg(feature = "server")]
#[cfg_attr(docsrs, doc(cfg(feature = "server")))]
pub mod http {
    pub use connprobe_axum::*;
}

pub use connprobe_core::{
    ConnectionDescriptor, ConnectionError, ConnectionResult, Dialect, JdbcUrl, mask_password,
    synthesize,
};
pub use connprobe_driver::{
    Connected, Connector, NativeConnector, ProbeConnection, ProbeOutcome, ProbeRequest, Validator,
    probe,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        ConnectionDescriptor, ConnectionError, ConnectionResult, Dialect, Validator, synthesize,
    };
}
