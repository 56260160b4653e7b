//! Logger setup on top of `env_logger`
//!
//! The library logs through the `log` facade only. Binaries pick a backend by
//! calling [`init`] with a filter string, or [`configure`] with a subtree of a
//! [`Config`], e.g.:
//!
//! ```yaml
//! logging:
//!   level: info
//!   format: compact
//!   modules:
//!     deep_dict::git: debug
//! ```

use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;

use env_logger::Builder;
use log::{info, LevelFilter};
use serde::Deserialize;

use crate::config::Config;
use crate::error::{Error, Result};

/// How log lines are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// env_logger's default: timestamp, level and target
    #[default]
    Default,
    /// Level and message only
    Compact,
}

/// Log settings as read from a config subtree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogSettings {
    /// Global level filter (`error`, `warn`, `info`, `debug`, `trace`, `off`)
    #[serde(default = "default_level")]
    pub level: String,
    /// Per-module level filters
    #[serde(default)]
    pub modules: BTreeMap<String, String>,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            modules: BTreeMap::new(),
            format: LogFormat::default(),
        }
    }
}

fn parse_level(level: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(level.trim()).map_err(|_| Error::Logging {
        message: format!("Invalid log level: '{}'", level),
    })
}

impl LogSettings {
    /// Read the settings stored at `path` in `config`, placeholders
    /// substituted.
    pub fn from_config(config: &Config, path: &str) -> Result<Self> {
        let node = config.to_dict(Some(path), true)?;
        serde_json::from_value(node).map_err(|e| Error::Logging {
            message: format!("Invalid log settings at '{}': {}", path, e),
        })
    }

    /// A logger builder for these settings.
    ///
    /// # Errors
    ///
    /// Returns `Error::Logging` if any level does not parse.
    pub fn builder(&self) -> Result<Builder> {
        let mut builder = Builder::new();
        builder.filter_level(parse_level(&self.level)?);
        for (module, level) in &self.modules {
            builder.filter_module(module, parse_level(level)?);
        }
        if self.format == LogFormat::Compact {
            builder.format_timestamp(None).format_target(false);
        }
        Ok(builder)
    }

    /// Install the logger. Returns `false` if a logger was already installed.
    pub fn install(&self) -> Result<bool> {
        Ok(self.builder()?.try_init().is_ok())
    }
}

/// Install a logger using `env_logger` filter syntax, e.g.
/// `"warn,deep_dict::config=debug"`.
///
/// Returns `false` if a logger was already installed.
pub fn init(filters: &str) -> bool {
    Builder::new().parse_filters(filters).try_init().is_ok()
}

/// Install a logger from the settings at `path` in `config`, then log the
/// command line and every config file that was loaded.
pub fn configure(config: &Config, path: &str) -> Result<bool> {
    let installed = LogSettings::from_config(config, path)?.install()?;

    let args: Vec<String> = env::args().collect();
    info!("Starting with: {}", args.join(" "));
    for source in config.sources() {
        info!("Config: {} - {}", source.name, source.file.display());
    }
    Ok(installed)
}
