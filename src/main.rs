//! # Deep Dict CLI
//!
//! This is the binary entry point for the `deep-dict` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Reporting errors from the library as user-friendly messages.
//!
//! The actual logic lives in the `deep_dict` library crate; the binary only
//! loads files, calls into it and prints the results.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
