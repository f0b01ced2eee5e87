use anyhow::{bail, Result};
use modeswitch_rules::check::build_check_report;
use modeswitch_rules::report::render_check_colored;

use crate::cli::{CheckArgs, OutputFormat};
use crate::input::load_blocks;

pub fn run_check(args: CheckArgs) -> Result<()> {
    let blocks = load_blocks(args.file.as_deref())?;
    let report = build_check_report(&blocks);

    match args.format {
        OutputFormat::Text => println!("{}", render_check_colored(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if report.errors > 0 {
        bail!("check failed: {} errors", report.errors);
    }
    if args.strict && report.warnings > 0 {
        bail!("check failed in strict mode: {} warnings", report.warnings);
    }
    Ok(())
}
