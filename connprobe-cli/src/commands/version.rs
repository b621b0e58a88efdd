//! `connprobe version` command - Display version information.

use connprobe_core::Dialect;

use crate::error::CliResult;
use crate::output::{self, kv, list_item};

/// Package version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
const NAME: &str = env!("CARGO_PKG_NAME");

/// Run the version command
pub async fn run() -> CliResult<()> {
    output::header("connprobe");

    kv("Version", VERSION);
    kv("Package", NAME);

    #[cfg(debug_assertions)]
    let build_mode = "debug";
    #[cfg(not(debug_assertions))]
    let build_mode = "release";

    kv("Build", build_mode);

    let mut drivers = Vec::new();

    #[cfg(feature = "postgres")]
    drivers.push("postgres");

    #[cfg(feature = "mysql")]
    drivers.push("mysql");

    #[cfg(feature = "mssql")]
    drivers.push("mssql");

    #[cfg(feature = "oracle")]
    drivers.push("oracle");

    #[cfg(feature = "snowflake")]
    drivers.push("snowflake");

    if drivers.is_empty() {
        drivers.push("none");
    }

    kv("Drivers", &drivers.join(", "));

    output::newline();
    output::section("Database types");
    for dialect in Dialect::ALL {
        list_item(&format!("{:<11} {}", dialect.name(), dialect.jdbc_prefix()));
    }

    output::newline();
    output::info("Types without a compiled-in driver are rejected when probed");
    output::dim("POST descriptors to /hello after `connprobe serve`");

    Ok(())
}
