//! # connprobe-driver
//!
//! Single-shot connectivity probes for JDBC-style connection strings.
//!
//! A probe opens exactly one connection with the driver named by the URL
//! prefix, releases it, and reports [`ProbeOutcome`]. Driver failures are
//! captured as text; they never escape as panics or faults.
//!
//! ```rust,no_run
//! use connprobe_driver::Validator;
//!
//! # async fn run() {
//! let validator = Validator::native();
//! let body = br#"{"host":"localhost","port":"5432","databaseName":"postgres","databaseType":"postgresql"}"#;
//! match validator.validate(body).await {
//!     Ok(connected) => println!("connected via {}", connected.driver),
//!     Err(e) => eprintln!("{}", e),
//! }
//! # }
//! ```
//!
//! ## Features
//!
//! - `postgres` (default): PostgreSQL through `tokio-postgres`
//! - `mysql` (default): MySQL through `mysql_async`
//! - `mssql` (default): SQL Server through `tiberius`
//! - `oracle` (default): Oracle through `oracle`; needs the Oracle client
//!   libraries at run time
//! - `snowflake` (default): Snowflake password login through
//!   `snowflake-connector-rs`

pub mod connector;
pub mod error;
pub mod native;
pub mod validator;

#[cfg(feature = "mssql")]
pub mod mssql;
#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "oracle")]
pub mod oracle;
#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "snowflake")]
pub mod snowflake;

pub use connector::{
    Connected, Connector, Credentials, ProbeConnection, ProbeOutcome, ProbeRequest, probe,
};
pub use error::{DriverError, DriverResult, error_chain};
pub use native::NativeConnector;
pub use validator::Validator;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Connected, Connector, DriverError, NativeConnector, ProbeConnection, ProbeOutcome,
        ProbeRequest, Validator, probe,
    };
}
