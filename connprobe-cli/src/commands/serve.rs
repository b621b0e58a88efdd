//! `connprobe serve` command - Run the HTTP service.

use connprobe_axum::AppState;

use crate::cli::ServeArgs;
use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::output::{self, kv};

/// Run the serve command
pub async fn run(args: ServeArgs) -> CliResult<()> {
    let mut config = Config::discover(args.config.as_deref())?;
    config.apply(&args);
    config.validate()?;

    output::header("connprobe");
    kv("Listening", &format!("http://{}/hello", config.server.addr()));
    kv("CORS origins", &config.cors.allowed_origins.join(", "));
    output::newline();

    connprobe_axum::serve(&config.server, &config.cors, AppState::native())
        .await
        .map_err(|e| CliError::Server(format!("{} ({})", e, config.server.addr())))
}
