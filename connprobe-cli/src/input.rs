//! Reading descriptors from files, stdin or inline JSON.

use std::io::Read;

use connprobe_core::ConnectionDescriptor;

use crate::cli::InputArgs;
use crate::error::{CliError, CliResult};

/// Read the raw descriptor bytes selected by `args`.
pub fn read_bytes(args: &InputArgs) -> CliResult<Vec<u8>> {
    if let Some(json) = &args.json {
        return Ok(json.clone().into_bytes());
    }
    if let Some(path) = &args.file {
        return std::fs::read(path)
            .map_err(|e| CliError::Input(format!("Failed to read {}: {}", path.display(), e)));
    }
    if args.stdin {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    Err(CliError::Input(
        "one of --file, --stdin or --json is required".into(),
    ))
}

/// Read and parse the descriptor selected by `args`.
pub fn read_descriptor(args: &InputArgs) -> CliResult<ConnectionDescriptor> {
    let bytes = read_bytes(args)?;
    Ok(ConnectionDescriptor::from_json(&bytes)?)
}
