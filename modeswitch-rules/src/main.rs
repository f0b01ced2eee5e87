use anyhow::Result;
use clap::Parser;
use modeswitch_rules::inspect::render_blocks;

mod check_cmd;
mod cli;
mod generate;
mod input;
mod path_guard;

use cli::{Cli, Command, InspectArgs, OutputFormat};

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Generate(args) => generate::run_generate(args),
        Command::Check(args) => check_cmd::run_check(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let blocks = input::load_blocks(args.file.as_deref())?;

    match args.format {
        OutputFormat::Text => println!("{}", render_blocks(&blocks, args.values)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&blocks)?),
    }

    Ok(())
}
