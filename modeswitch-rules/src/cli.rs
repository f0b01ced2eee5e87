use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "modeswitch-rules")]
#[command(about = "Generate and inspect udev rules for usb_modeswitch device configs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Emit the udev rules for a device configuration.
    Generate(GenerateArgs),
    /// Lint a device configuration for declarations the generator would
    /// drop or mishandle.
    Check(CheckArgs),
    /// Show the parsed block structure of a device configuration.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Config file to read; `-` or omitted reads standard input.
    pub file: Option<PathBuf>,

    /// Write the rules here instead of standard output.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Config file to read; `-` or omitted reads standard input.
    pub file: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Treat warnings as failures.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Config file to read; `-` or omitted reads standard input.
    pub file: Option<PathBuf>,

    /// List each block's key/value declarations.
    #[arg(long)]
    pub values: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
