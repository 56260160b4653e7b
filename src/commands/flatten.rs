//! # Flatten Command Implementation
//!
//! Prints one `path=value` line per leaf, depth first, in document order.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use deep_dict::deep_flatten;
use deep_dict::value::render;

use super::load_document;

/// Print every leaf as path=value
#[derive(Args, Debug)]
pub struct FlattenArgs {
    /// Data file (.yaml, .yml, .json or .toml)
    pub file: PathBuf,
}

/// Execute the `flatten` command.
pub fn execute(args: FlattenArgs, delimiter: &str) -> Result<()> {
    let (root, _) = load_document(&args.file)?;
    for (path, node) in deep_flatten(&root, delimiter) {
        println!("{}={}", path, render(node));
    }
    Ok(())
}
