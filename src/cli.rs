//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Deep Dict - read and edit nested YAML, JSON and TOML data by path
#[derive(Parser, Debug)]
#[command(name = "deep-dict")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level or env_logger filters (e.g. "debug", "warn,deep_dict::git=debug")
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn", env = "DEEP_DICT_LOG")]
    log_level: String,

    /// Delimiter between path segments
    #[arg(short, long, global = true, value_name = "DELIM", default_value = ".")]
    delimiter: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the value at a path
    Get(commands::get::GetArgs),

    /// Set the value at a path, creating missing levels
    Set(commands::set::SetArgs),

    /// Remove the value at a path
    Delete(commands::delete::DeleteArgs),

    /// Print every leaf as path=value
    Flatten(commands::flatten::FlattenArgs),

    /// Query layered configuration files
    Config(commands::config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        deep_dict::logging::init(&self.log_level);

        match self.command {
            Commands::Get(args) => commands::get::execute(args, &self.delimiter),
            Commands::Set(args) => commands::set::execute(args, &self.delimiter),
            Commands::Delete(args) => commands::delete::execute(args, &self.delimiter),
            Commands::Flatten(args) => commands::flatten::execute(args, &self.delimiter),
            Commands::Config(args) => commands::config::execute(args, &self.delimiter),
        }
    }
}
