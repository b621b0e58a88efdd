//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// connprobe - check that a database descriptor actually connects
#[derive(Parser, Debug)]
#[command(name = "connprobe")]
#[command(version)]
#[command(about = "connprobe - check that a database descriptor actually connects", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service
    Serve(ServeArgs),

    /// Validate one descriptor by connecting to the database
    Check(CheckArgs),

    /// Print the JDBC connection string for a descriptor without connecting
    Synth(SynthArgs),

    /// Display version information
    Version,
}

/// Arguments for the `serve` command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Path to the configuration file (defaults to ./connprobe.toml when present)
    #[arg(short, long, env = "CONNPROBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long, env = "CONNPROBE_HOST")]
    pub host: Option<IpAddr>,

    /// Port to bind
    #[arg(short, long, env = "CONNPROBE_PORT")]
    pub port: Option<u16>,

    /// Allowed CORS origin (repeatable)
    #[arg(long = "cors-origin", env = "CONNPROBE_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

/// Where to read a descriptor from
#[derive(Args, Debug, Default)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Read the descriptor from a JSON file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Read the descriptor from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Descriptor as inline JSON
    #[arg(long)]
    pub json: Option<String>,
}

/// Arguments for the `check` command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the `synth` command
#[derive(Args, Debug)]
pub struct SynthArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print passwords instead of masking them
    #[arg(long)]
    pub show_password: bool,
}
