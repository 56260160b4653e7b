//! # Get Command Implementation
//!
//! Prints the node at a path: strings as plain text, everything else as
//! compact JSON.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use deep_dict::value::{parse_scalar, render};
use deep_dict::{DeepDict, Error};

use super::load_document;

/// Print the value at a path
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Data file (.yaml, .yml, .json or .toml)
    pub file: PathBuf,

    /// Path to read; empty for the whole document
    pub path: String,

    /// Printed when the path does not exist, instead of failing
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,
}

/// Execute the `get` command.
pub fn execute(args: GetArgs, delimiter: &str) -> Result<()> {
    let (mut root, _) = load_document(&args.file)?;
    let dict = DeepDict::with_delimiter(&mut root, delimiter);

    let node = match (dict.get(&args.path), &args.default) {
        (Ok(node), _) => node.clone(),
        (Err(Error::KeyNotFound { .. }), Some(default)) => parse_scalar(default),
        (Err(e), _) => return Err(e.into()),
    };

    println!("{}", render(&node));
    Ok(())
}
