//! # Layered Application Configuration
//!
//! This module provides [`Config`], a stack of configuration layers that are
//! queried with the same deep paths as [`DeepDict`](crate::DeepDict). A lookup
//! walks the layers from highest to lowest priority and returns the first
//! match, so a user config only needs to contain the keys it changes.
//!
//! ## Layers
//!
//! From highest to lowest priority:
//!
//! 1. **Overrides**: values stored with [`Config::set`] at runtime.
//! 2. **User configs**: one layer per name in `user_config`, the name listed
//!    last taking precedence. For the name `dev` the file searched for is
//!    `<default_config>-dev`.
//! 3. **Default config**: the file named by `default_config` (`config`).
//!
//! Files are looked up along the search path as `<name>.yaml`, `<name>.yml`,
//! `<name>.json` and `<name>.toml`, in that order. Every loaded layer gets a
//! `__file__` entry holding the absolute path it was read from.
//!
//! ## Placeholders
//!
//! String values may reference other entries with `{path}`:
//!
//! ```yaml
//! log_dir: /var/log/app
//! files:
//!   errors: "{log_dir}/errors.log"
//! ```
//!
//! [`Config::get`] and [`Config::to_dict`] (with `substitute`) replace
//! placeholders until none remain. `\{` and `\}` are left alone. A placeholder
//! that cannot be resolved is an error.

use std::collections::HashSet;
use std::env;
use std::fmt;
use std::path::{Path as FsPath, PathBuf};

use log::debug;
use regex::{Captures, Regex};
use serde_json::{json, Map, Value};

use crate::deep::{deep_get, deep_set};
use crate::error::{Error, Result};
use crate::path::{Path, DEFAULT_DELIMITER};
use crate::value::{load_file, render, Format};

/// Key under which each layer records the file it was loaded from.
pub const FILE_KEY: &str = "__file__";

/// Prefix of a user config setting that names an environment variable.
pub const ENV_PREFIX: &str = "env:";

const PLACEHOLDER_PATTERN: &str = r"\\[{}]|\{([^{}]*)\}";

const MAX_SUBSTITUTION_PASSES: usize = 32;

/// Where and what to load when building a [`Config`]
#[derive(Debug, Clone)]
pub struct ConfigOptions {
    /// Directories searched, in order, for config files.
    pub search_path: Vec<PathBuf>,
    /// Base name of the default config file; `None` loads no defaults.
    pub default_config: Option<String>,
    /// Names of user configs, lowest priority first.
    pub user_config: Vec<String>,
    /// Path delimiter used for lookups.
    pub separator: String,
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            search_path: vec![PathBuf::from(".")],
            default_config: Some("config".to_string()),
            user_config: Vec::new(),
            separator: DEFAULT_DELIMITER.to_string(),
        }
    }
}

/// A config file that was loaded into a layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    /// The name the file was requested under (`config`, `config-dev`, ...)
    pub name: String,
    /// Absolute path of the file
    pub file: PathBuf,
}

/// Split a user config setting into config names.
///
/// `"dev, linux"` yields `["dev", "linux"]`. A setting of the form `env:VAR`
/// reads the names from the environment variable `VAR`. Empty names are
/// dropped.
///
/// # Errors
///
/// Returns `Error::Config` if the named environment variable is not set.
pub fn parse_user_config(setting: &str) -> Result<Vec<String>> {
    let names = match setting.strip_prefix(ENV_PREFIX) {
        Some(var) => env::var(var).map_err(|_| Error::Config {
            message: format!("Environment variable not found: '{}'", var),
            hint: Some(format!("Set {} to a comma separated list of config names", var)),
        })?,
        None => setting.to_string(),
    };

    Ok(names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect())
}

/// Deep merge `source` into `target`: mappings merge key by key, anything
/// else in `source` replaces what is in `target`.
fn merge_values(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, value) in source_map {
                let nested = value.is_object() && target_map.get(key).is_some_and(Value::is_object);
                if !nested {
                    target_map.insert(key.clone(), value.clone());
                } else if let Some(existing) = target_map.get_mut(key) {
                    merge_values(existing, value);
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

/// Layered application configuration
#[derive(Debug, Clone)]
pub struct Config {
    options: ConfigOptions,
    /// Highest priority first; index 0 holds the runtime overrides.
    layers: Vec<Value>,
    /// Loaded files, in load order.
    sources: Vec<ConfigSource>,
}

impl Config {
    /// Build a config by loading the default config and every user config.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a search path entry is not a directory, or
    /// a config file cannot be found or loaded.
    pub fn new(options: ConfigOptions) -> Result<Self> {
        for dir in &options.search_path {
            if !dir.is_dir() {
                return Err(Error::Config {
                    message: format!("Directory not found: '{}'", dir.display()),
                    hint: None,
                });
            }
        }

        let mut config = Self {
            options,
            layers: vec![Value::Object(Map::new())],
            sources: Vec::new(),
        };

        if let Some(name) = config.options.default_config.clone() {
            let file = config.find_file(&name)?;
            config.load_config(&name, &file)?;
        }

        for name in config.options.user_config.clone() {
            config.load_user_config(&name)?;
        }

        Ok(config)
    }

    /// A config with no files loaded.
    pub fn empty() -> Self {
        Self {
            options: ConfigOptions {
                default_config: None,
                ..ConfigOptions::default()
            },
            layers: vec![Value::Object(Map::new())],
            sources: Vec::new(),
        }
    }

    pub fn options(&self) -> &ConfigOptions {
        &self.options
    }

    /// The layers, highest priority first.
    pub fn layers(&self) -> &[Value] {
        &self.layers
    }

    /// The loaded files, in load order.
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    fn path(&self, path: &str) -> Result<Path> {
        if path.is_empty() {
            return Err(Error::Config {
                message: "Config path must not be empty".to_string(),
                hint: None,
            });
        }
        Ok(Path::parse(path, &self.options.separator))
    }

    /// Find `name` with a supported extension along the search path.
    pub fn find_file(&self, name: &str) -> Result<PathBuf> {
        for dir in &self.options.search_path {
            for ext in Format::EXTENSIONS {
                let file = dir.join(format!("{}.{}", name, ext));
                if file.is_file() {
                    return Ok(file);
                }
            }
        }

        Err(Error::Config {
            message: format!(
                "File not found in search path: name='{}', path={:?}",
                name, self.options.search_path
            ),
            hint: Some(format!(
                "Expected one of {}",
                Format::EXTENSIONS
                    .iter()
                    .map(|ext| format!("{}.{}", name, ext))
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        })
    }

    /// Load `file` as the highest priority file layer, below the overrides.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file is missing, cannot be parsed, or
    /// its root is not a mapping.
    pub fn load_config(&mut self, name: &str, file: &FsPath) -> Result<&Value> {
        if !file.is_file() {
            return Err(Error::Config {
                message: format!("Config file not found: '{}'", file.display()),
                hint: None,
            });
        }

        let (mut node, _) = load_file(file).map_err(|e| Error::Config {
            message: format!("Failed to load config file '{}': {}", file.display(), e),
            hint: None,
        })?;

        let resolved = file.canonicalize()?;
        match &mut node {
            Value::Object(map) => {
                map.insert(
                    FILE_KEY.to_string(),
                    Value::String(resolved.display().to_string()),
                );
            }
            other => {
                return Err(Error::Config {
                    message: format!(
                        "Config must be a mapping: '{}', found {}",
                        file.display(),
                        crate::value::kind_name(other)
                    ),
                    hint: None,
                });
            }
        }

        debug!("Loaded config '{}' from {}", name, resolved.display());
        self.layers.insert(1, node);
        self.sources.push(ConfigSource {
            name: name.to_string(),
            file: resolved,
        });
        Ok(&self.layers[1])
    }

    /// Load the user config `name`, i.e. the file `<default_config>-<name>`.
    pub fn load_user_config(&mut self, name: &str) -> Result<&Value> {
        let file_name = match &self.options.default_config {
            Some(default) => format!("{}-{}", default, name),
            None => name.to_string(),
        };
        let file = self.find_file(&file_name)?;
        self.load_config(&file_name, &file)
    }

    /// The raw value at `path` from the highest priority layer holding it,
    /// without placeholder substitution.
    pub fn get_value(&self, path: &str) -> Result<&Value> {
        let path = self.path(path)?;
        let mut missing = None;
        for layer in &self.layers {
            match deep_get(layer, &path) {
                Ok(value) => return Ok(value),
                Err(e) => missing = Some(e),
            }
        }
        Err(missing.unwrap_or_else(|| Error::KeyNotFound {
            path: path.to_string(),
            segment: path.to_string(),
        }))
    }

    /// The value at `path` with placeholders substituted.
    ///
    /// # Errors
    ///
    /// - `Error::KeyNotFound` if no layer holds `path`.
    /// - `Error::Placeholder` if a placeholder cannot be resolved.
    pub fn get(&self, path: &str) -> Result<Value> {
        let value = self.get_value(path)?.clone();
        Substitution::new(self)?.value(value)
    }

    /// Like [`Config::get`], returning `default` if `path` is missing.
    pub fn get_or(&self, path: &str, default: Value) -> Result<Value> {
        match self.get(path) {
            Err(Error::KeyNotFound { .. }) => Ok(default),
            other => other,
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get_value(path).is_ok()
    }

    /// Store `value` at `path` in the override layer.
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeMismatch` if a parent on the way is not a mapping
    /// (or a sequence addressed by index).
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let path = self.path(path)?;
        deep_set(&mut self.layers[0], &path, value.into())?;
        Ok(())
    }

    /// Merge all layers into one mapping, higher priority layers winning.
    ///
    /// With `root`, only the subtree at that path is taken from each layer;
    /// layers without it are skipped.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a subtree at `root` is not a mapping, and
    /// substitution errors when `substitute` is set.
    pub fn to_dict(&self, root: Option<&str>, substitute: bool) -> Result<Value> {
        let root = match root {
            Some(root) if !root.is_empty() => Some(self.path(root)?),
            _ => None,
        };

        let mut merged = Value::Object(Map::new());
        for layer in self.layers.iter().rev() {
            let level = match &root {
                Some(root) => match deep_get(layer, root) {
                    Ok(level) => level,
                    Err(_) => continue,
                },
                None => layer,
            };

            if !level.is_object() {
                return Err(Error::Config {
                    message: format!("Expected a mapping but got: {}", render(level)),
                    hint: None,
                });
            }
            merge_values(&mut merged, level);
        }

        if substitute {
            merged = Substitution::new(self)?.value(merged)?;
        }
        Ok(merged)
    }

    /// Number of top-level keys across all layers.
    pub fn len(&self) -> usize {
        self.layers
            .iter()
            .filter_map(Value::as_object)
            .flat_map(|map| map.keys())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve `name` with `filename` and `filedir` of `file` available as
    /// placeholders, e.g. `"{backup_dir}/{filedir}/{filename}"`.
    pub fn get_file(&mut self, name: &str, file: &FsPath) -> Result<Value> {
        let filename = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let filedir = file
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        self.layers
            .insert(0, json!({ "filename": filename, "filedir": filedir }));
        let result = self.get(name);
        self.layers.remove(0);
        result
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string_pretty(&self.layers).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Placeholder substitution against one config
struct Substitution<'c> {
    config: &'c Config,
    pattern: Regex,
}

impl<'c> Substitution<'c> {
    fn new(config: &'c Config) -> Result<Self> {
        Ok(Self {
            config,
            pattern: Regex::new(PLACEHOLDER_PATTERN)?,
        })
    }

    fn value(&self, value: Value) -> Result<Value> {
        match value {
            Value::String(text) => Ok(Value::String(self.text(&text)?)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| self.value(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Value::Object(map) => map
                .into_iter()
                .map(|(key, item)| Ok((key, self.value(item)?)))
                .collect::<Result<Map<_, _>>>()
                .map(Value::Object),
            other => Ok(other),
        }
    }

    fn text(&self, text: &str) -> Result<String> {
        let mut current = text.to_string();
        for _ in 0..MAX_SUBSTITUTION_PASSES {
            let mut found = 0;
            let next = self
                .pattern
                .replace_all(&current, |caps: &Captures| {
                    let Some(name) = caps.get(1) else {
                        return caps[0].to_string();
                    };
                    found += 1;
                    match self.config.get_value(name.as_str().trim()) {
                        Ok(value) => render(value),
                        Err(_) => caps[0].to_string(),
                    }
                })
                .into_owned();

            if found == 0 {
                return Ok(next);
            }
            if next == current {
                return Err(Error::Placeholder {
                    message: "Unable to replace all placeholders".to_string(),
                    text: Some(next),
                });
            }
            current = next;
        }

        Err(Error::Placeholder {
            message: format!(
                "Placeholders still present after {} passes",
                MAX_SUBSTITUTION_PASSES
            ),
            text: Some(current),
        })
    }
}
