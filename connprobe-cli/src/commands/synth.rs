//! `connprobe synth` command - Print the connection string for a descriptor.

use connprobe_core::{mask_password, synthesize};

use crate::cli::SynthArgs;
use crate::error::CliResult;
use crate::input;

/// Run the synth command
///
/// Prints only the connection string so the output can be piped.
pub async fn run(args: SynthArgs) -> CliResult<()> {
    let descriptor = input::read_descriptor(&args.input)?;
    let url = synthesize(&descriptor)?;

    if args.show_password {
        println!("{}", url);
    } else {
        println!("{}", mask_password(&url));
    }
    Ok(())
}
