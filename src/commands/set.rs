//! # Set Command Implementation
//!
//! Stores a value at a path. The value is parsed as JSON when possible
//! (`42`, `true`, `{"a": 1}`), otherwise taken as a plain string.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use deep_dict::value::parse_scalar;
use deep_dict::DeepDict;

use super::{emit_document, load_document};

/// Set the value at a path
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Data file (.yaml, .yml, .json or .toml)
    pub file: PathBuf,

    /// Path to write
    pub path: String,

    /// New value, as JSON or a plain string
    pub value: String,

    /// Write the result back to FILE instead of printing it
    #[arg(short, long)]
    pub in_place: bool,

    /// Fail if the path already holds a value
    #[arg(long)]
    pub no_replace: bool,
}

/// Execute the `set` command.
pub fn execute(args: SetArgs, delimiter: &str) -> Result<()> {
    let (mut root, format) = load_document(&args.file)?;
    let value = parse_scalar(&args.value);

    {
        let mut dict = DeepDict::with_delimiter(&mut root, delimiter);
        if args.no_replace {
            dict.insert(&args.path, value)?;
        } else if let Some(previous) = dict.set(&args.path, value)? {
            log::debug!("Replaced previous value at '{}': {}", args.path, previous);
        }
    }

    emit_document(&args.file, &root, format, args.in_place)
}
