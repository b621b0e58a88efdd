//! Structured fuzzing for connection string synthesis.
//!
//! Generates well-formed descriptors so that every synthesized string is fed
//! back through the URL reader and the password mask.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_descriptor_structured
//! ```

#![no_main]

use arbitrary::Arbitrary;
use connprobe_core::{ConnectionDescriptor, Dialect, JdbcUrl, mask_password, synthesize};
use libfuzzer_sys::fuzz_target;
use serde_json::json;

#[derive(Debug, Arbitrary)]
enum FuzzType {
    Oracle,
    MySql,
    PostgreSql,
    SqlServer,
    Snowflake,
    Other(String),
}

impl FuzzType {
    fn name(&self) -> String {
        match self {
            Self::Oracle => Dialect::Oracle.name().to_uppercase(),
            Self::MySql => Dialect::MySql.name().to_string(),
            Self::PostgreSql => Dialect::PostgreSql.name().to_string(),
            Self::SqlServer => Dialect::SqlServer.name().to_string(),
            Self::Snowflake => Dialect::Snowflake.name().to_string(),
            Self::Other(s) => s.clone(),
        }
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzDescriptor {
    host: String,
    port: u16,
    database_name: String,
    username: String,
    password: String,
    database_type: FuzzType,
}

fuzz_target!(|input: FuzzDescriptor| {
    let body = json!({
        "host": input.host,
        "port": input.port,
        "databaseName": input.database_name,
        "username": input.username,
        "password": input.password,
        "databaseType": input.database_type.name(),
    });
    let Ok(bytes) = serde_json::to_vec(&body) else {
        return;
    };
    let Ok(descriptor) = ConnectionDescriptor::from_json(&bytes) else {
        return;
    };

    if let Ok(url) = synthesize(&descriptor) {
        let _ = JdbcUrl::parse(&url);
        let _ = mask_password(&url);
    }
});
