//! # Error Handling
//!
//! This module defines the centralized error type for `deep-dict`. It uses the
//! `thiserror` library to build a single `Error` enum covering every failure
//! mode of the library, with messages that name the offending path, file or
//! command.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all errors the library can return. Path errors
//!   (`KeyNotFound`, `TypeMismatch`, `AlreadyExists`) come from deep access;
//!   `Config`, `Placeholder` and `Logging` from the configuration layer;
//!   `GitCommand` from the git wrapper; the remaining variants wrap errors of
//!   the parsing and I/O libraries underneath.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Path errors render paths joined with `.`, whatever delimiter was used to
//! parse them.

use thiserror::Error;

/// Main error type for deep-dict operations
#[derive(Error, Debug)]
pub enum Error {
    /// A path segment could not be resolved and no default was supplied.
    ///
    /// `segment` is the first segment that failed to resolve; `path` is the
    /// complete path that was requested.
    #[error("Key not found: '{segment}' (path: '{path}')")]
    KeyNotFound { path: String, segment: String },

    /// A write tried to descend through a node that cannot hold `segment`:
    /// a scalar, or a sequence addressed with a non-integer segment.
    #[error("Type mismatch at '{segment}' (path: '{path}'): cannot descend into {found}")]
    TypeMismatch {
        path: String,
        segment: String,
        /// Kind of the node that was found (`"string"`, `"sequence"`, ...)
        found: &'static str,
    },

    /// An insert found the target path already occupied.
    #[error("Entry already exists: '{path}'")]
    AlreadyExists { path: String },

    /// A configuration could not be located, loaded or queried.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Config {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// Placeholder substitution in a configuration value failed.
    ///
    /// Carries the text that still contained unresolved placeholders, when
    /// applicable.
    #[error("Placeholder substitution error: {message}{}", text.as_ref().map(|t| format!(" (value: '{}')", t)).unwrap_or_default())]
    Placeholder {
        message: String,
        /// The value whose placeholders could not be resolved
        text: Option<String>,
    },

    /// Log settings were invalid.
    #[error("Logging setup error: {message}")]
    Logging { message: String },

    /// A git command could not be started or exited unsuccessfully.
    #[error("Git command failed in {cwd}: {command} - {stderr}")]
    GitCommand {
        command: String,
        cwd: String,
        stderr: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing or serialization error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON parsing or serialization error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML parsing error, wrapped from `toml::de::Error`.
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A TOML serialization error, wrapped from `toml::ser::Error`.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
