//! # Config Command Implementation
//!
//! This module implements the `config` subcommand, which loads a layered
//! configuration (default config plus user configs) from the search path and
//! either resolves a single entry or dumps the merged result.
//!
//! ## Functionality
//!
//! - **`config get`**: Print one entry with `{placeholders}` substituted.
//! - **`config dump`**: Print the merged configuration as JSON, optionally
//!   restricted to a subtree.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

use deep_dict::config::parse_user_config;
use deep_dict::value::{parse_scalar, render};
use deep_dict::{Config, ConfigOptions, Error};

/// Query layered configuration files
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,

    /// Directories searched for config files, in order.
    #[arg(
        long = "search-path",
        value_name = "DIR",
        env = "DEEP_DICT_CONFIG_PATH",
        value_delimiter = ',',
        default_value = "."
    )]
    pub search_path: Vec<PathBuf>,

    /// Comma separated user config names (e.g. "dev,linux"), or env:VAR to
    /// read them from an environment variable.
    #[arg(long, value_name = "NAMES", env = "DEEP_DICT_USER_CONFIG")]
    pub user_config: Option<String>,

    /// Base name of the default config file.
    #[arg(long, value_name = "NAME", default_value = "config")]
    pub default_config: String,

    /// Do not load a default config.
    #[arg(long)]
    pub no_default_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved value at a path
    Get {
        /// Config path to resolve
        path: String,

        /// Printed when the path does not exist, instead of failing
        #[arg(long, value_name = "VALUE")]
        default: Option<String>,
    },

    /// Print the merged configuration as JSON
    Dump {
        /// Only dump the subtree at this path
        #[arg(long, value_name = "PATH")]
        root: Option<String>,

        /// Leave placeholders unresolved
        #[arg(long)]
        raw: bool,
    },
}

/// Execute the `config` command.
pub fn execute(args: ConfigArgs, delimiter: &str) -> Result<()> {
    let user_config = match &args.user_config {
        Some(setting) => parse_user_config(setting)?,
        None => Vec::new(),
    };

    let options = ConfigOptions {
        search_path: args.search_path,
        default_config: (!args.no_default_config).then_some(args.default_config),
        user_config,
        separator: delimiter.to_string(),
    };
    let config = Config::new(options).context("Failed to load configuration")?;

    match args.action {
        ConfigAction::Get { path, default } => {
            let value = match (config.get(&path), default) {
                (Ok(value), _) => value,
                (Err(Error::KeyNotFound { .. }), Some(default)) => parse_scalar(&default),
                (Err(e), _) => return Err(e.into()),
            };
            println!("{}", render(&value));
        }
        ConfigAction::Dump { root, raw } => {
            let merged = config.to_dict(root.as_deref(), !raw)?;
            println!("{}", serde_json::to_string_pretty(&merged)?);
        }
    }
    Ok(())
}
