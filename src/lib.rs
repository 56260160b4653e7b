//! # Deep Dict
//!
//! Convenience utilities for working with nested data: path-based access into
//! mapping/sequence/scalar trees, layered application configuration on top of
//! it, and a few small helpers around logging and git.
//!
//! ## Quick Example
//!
//! ```
//! use deep_dict::DeepDict;
//! use serde_json::json;
//!
//! let mut root = json!({"a": {"b": 1, "c": 2}});
//! let mut dict = DeepDict::new(&mut root);
//!
//! assert_eq!(dict.get("a.b").unwrap(), &json!(1));
//! dict.set("a.d.e", "deep").unwrap();
//! assert!(dict.contains("a.d"));
//!
//! let paths: Vec<String> = dict.flatten().map(|(path, _)| path).collect();
//! assert_eq!(paths, ["a.b", "a.c", "a.d.e"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Values (`value`)**: Nested data is a `serde_json::Value` with
//!   insertion-ordered mappings; YAML, JSON and TOML files load into it.
//! - **Paths (`path`)**: Delimited path strings split into key and index
//!   segments.
//! - **Deep access (`deep`)**: `DeepDict` and the `deep_*` functions that get,
//!   set, insert, delete and flatten by path.
//! - **Configuration (`config`)**: Layered configs with overrides, user
//!   configs, defaults and `{placeholder}` substitution.
//! - **Logging (`logging`)** and **git (`git`)**: thin helpers used by
//!   applications built on the above.

pub mod config;
pub mod deep;
pub mod error;
pub mod git;
pub mod logging;
pub mod path;
pub mod value;

pub use config::{Config, ConfigOptions};
pub use deep::{
    deep_contains, deep_delete, deep_flatten, deep_get, deep_get_mut, deep_insert, deep_set,
    DeepDict, Flatten,
};
pub use error::{Error, Result};
pub use path::{Path, PathSegment};
pub use value::Node;

#[cfg(test)]
mod deep_proptest;
