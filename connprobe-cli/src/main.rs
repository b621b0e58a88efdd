//! connprobe CLI - database connection descriptor checker.

use clap::Parser;

use connprobe_cli::cli::{Cli, Command};
use connprobe_cli::commands;
use connprobe_cli::error::CliResult;
use connprobe_cli::output;
use connprobe_core::logging;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        output::newline();
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => {
            logging::init_with_default("info");
            commands::serve::run(args).await
        }
        Command::Check(args) => {
            logging::init();
            commands::check::run(args).await
        }
        Command::Synth(args) => {
            logging::init();
            commands::synth::run(args).await
        }
        Command::Version => commands::version::run().await,
    }
}
