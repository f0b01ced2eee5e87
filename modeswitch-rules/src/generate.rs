use std::fs;

use anyhow::{Context, Result};
use modeswitch_rules::emit::{build_rule_set, render_rules};
use modeswitch_rules::summary::{render as render_summary, summarize};

use crate::cli::GenerateArgs;
use crate::input::load_blocks;
use crate::path_guard::ensure_output_not_input;

pub fn run_generate(args: GenerateArgs) -> Result<()> {
    if let Some(output) = &args.output {
        ensure_output_not_input(output, args.file.as_deref())?;
    }

    let blocks = load_blocks(args.file.as_deref())?;
    let rule_set = build_rule_set(&blocks)?;
    let rules = render_rules(&rule_set);

    match &args.output {
        Some(path) => {
            fs::write(path, &rules)
                .with_context(|| format!("failed to write rules file {}", path.display()))?;
            println!("{}", render_summary(summarize(&blocks, &rule_set)));
        }
        None => print!("{rules}"),
    }

    Ok(())
}
