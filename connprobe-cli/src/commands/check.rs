//! `connprobe check` command - Validate a descriptor against a live database.

use connprobe_core::{mask_password, synthesize};
use connprobe_driver::Validator;

use crate::cli::CheckArgs;
use crate::error::CliResult;
use crate::input;
use crate::output::{self, kv, success};

/// Run the check command
pub async fn run(args: CheckArgs) -> CliResult<()> {
    let descriptor = input::read_descriptor(&args.input)?;

    output::header("Check Connection");
    if !descriptor.name().is_empty() {
        kv("Name", descriptor.name());
    }
    if !descriptor.database_type().is_empty() {
        kv("Type", descriptor.database_type());
    }
    let url = synthesize(&descriptor)?;
    kv("URL", &mask_password(&url));
    output::newline();

    let connected = Validator::native().validate_descriptor(&descriptor).await?;

    success("Connected to the database!");
    kv("Driver", connected.driver);
    kv("Elapsed", &format!("{} ms", connected.elapsed.as_millis()));
    Ok(())
}
