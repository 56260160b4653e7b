//! # Delete Command Implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use deep_dict::DeepDict;

use super::{emit_document, load_document};

/// Remove the value at a path
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Data file (.yaml, .yml, .json or .toml)
    pub file: PathBuf,

    /// Path to remove
    pub path: String,

    /// Write the result back to FILE instead of printing it
    #[arg(short, long)]
    pub in_place: bool,
}

/// Execute the `delete` command.
pub fn execute(args: DeleteArgs, delimiter: &str) -> Result<()> {
    let (mut root, format) = load_document(&args.file)?;

    let removed = DeepDict::with_delimiter(&mut root, delimiter).delete(&args.path)?;
    log::debug!("Removed '{}': {}", args.path, removed);

    emit_document(&args.file, &root, format, args.in_place)
}
