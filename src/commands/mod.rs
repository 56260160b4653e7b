//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `deep-dict` command-line tool, one file per subcommand.
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and the global path
//!   delimiter and performs the command.
//!
//! The helpers below load and write the data files the commands operate on.

pub mod config;
pub mod delete;
pub mod flatten;
pub mod get;
pub mod set;

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use deep_dict::value::{self, Format};

/// Read a YAML, JSON or TOML document.
pub fn load_document(file: &Path) -> Result<(Value, Format)> {
    value::load_file(file).with_context(|| format!("Failed to read '{}'", file.display()))
}

/// Write `root` back to `file`, or print it in the same format.
pub fn emit_document(file: &Path, root: &Value, format: Format, in_place: bool) -> Result<()> {
    if in_place {
        value::save_file(file, root, format)
            .with_context(|| format!("Failed to write '{}'", file.display()))?;
        log::info!("Updated {}", file.display());
    } else {
        print!("{}", format.serialize(root)?);
    }
    Ok(())
}
