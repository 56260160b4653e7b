//! The node model and its file formats
//!
//! Nested data is held as [`serde_json::Value`] built with `preserve_order`,
//! so mappings iterate in insertion order. YAML, JSON and TOML documents are
//! all read into that one representation and written back out of it.

use std::fs;
use std::path::Path as FsPath;

use serde_json::Value;

use crate::error::{Error, Result};

/// A node of a nested structure: mapping, sequence or scalar.
pub type Node = Value;

/// Human readable name of a node's kind, used in error messages.
pub fn kind_name(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Render a node for display: strings verbatim, everything else as compact
/// JSON.
pub fn render(node: &Value) -> String {
    match node {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Interpret command-line text as a node: JSON when it parses, otherwise a
/// plain string.
pub fn parse_scalar(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Document formats understood for data and config files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

impl Format {
    /// Extensions searched for config files, in lookup order.
    pub const EXTENSIONS: [&'static str; 4] = ["yaml", "yml", "json", "toml"];

    /// Detect the format from a file extension.
    pub fn from_path(path: &FsPath) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }

    pub fn parse(self, text: &str) -> Result<Value> {
        Ok(match self {
            Format::Yaml => serde_yaml::from_str(text)?,
            Format::Json => serde_json::from_str(text)?,
            Format::Toml => toml::from_str(text)?,
        })
    }

    pub fn serialize(self, node: &Value) -> Result<String> {
        Ok(match self {
            Format::Yaml => serde_yaml::to_string(node)?,
            Format::Json => {
                let mut out = serde_json::to_string_pretty(node)?;
                out.push('\n');
                out
            }
            Format::Toml => toml::to_string_pretty(node)?,
        })
    }
}

/// Read and parse a document, picking the format from its extension.
pub fn load_file(path: &FsPath) -> Result<(Value, Format)> {
    let format = Format::from_path(path).ok_or_else(|| Error::Config {
        message: format!("Unsupported file type: '{}'", path.display()),
        hint: Some("Use a .yaml, .yml, .json or .toml file".to_string()),
    })?;
    let text = fs::read_to_string(path)?;
    Ok((format.parse(&text)?, format))
}

/// Serialize a document and write it to `path`.
pub fn save_file(path: &FsPath, node: &Value, format: Format) -> Result<()> {
    fs::write(path, format.serialize(node)?)?;
    Ok(())
}
