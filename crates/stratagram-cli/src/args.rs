//! Command-line argument definitions for the Stratagram CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, stack selection,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Stratagram diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the cloud assembly directory (cdk.out) or its manifest.json
    #[arg(help = "Path to the cloud assembly directory or manifest.json")]
    pub input: String,

    /// Path to the output D2 file, `-` for stdout
    #[arg(short, long, default_value = "out.d2")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Only draw the named stack (repeatable; all stacks when omitted)
    #[arg(long = "stack", value_name = "NAME")]
    pub stacks: Vec<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
