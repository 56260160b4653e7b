//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures, helper functions, and sample
//! documents to reduce duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_file("doc.yaml", documents::NESTED_YAML);
//!     fixture.command().arg("get").arg("doc.yaml").arg("a.b").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::documents;
    #[allow(unused_imports)]
    pub use super::testdata_dir;
    pub use super::TestFixture;
}

/// Sample documents for testing.
#[allow(dead_code)]
pub mod documents {
    /// Nested YAML mapping with a sequence.
    pub const NESTED_YAML: &str = r#"
a:
  b: 1
  c: two
servers:
  - host: alpha
    port: 80
  - host: beta
    port: 8080
"#;

    /// The same kind of data as JSON.
    pub const NESTED_JSON: &str = r#"{"a": {"b": 1, "c": "two"}, "flag": true}"#;

    /// A small TOML document.
    pub const NESTED_TOML: &str = r#"
title = "demo"

[owner]
name = "someone"
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "invalid: [unclosed";
}

/// Directory holding the checked-in layered config fixtures.
#[allow(dead_code)]
pub fn testdata_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/testdata/config")
}

/// A test fixture that provides a temporary directory populated with files.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new().with_file("doc.json", "{}");
///
/// fixture.command()
///     .args(["set", "doc.json", "a.b", "1"])
///     .assert()
///     .success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Read a file from the fixture back as a string.
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("Failed to read file")
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("deep-dict");
        cmd.current_dir(self.path());
        cmd.env_remove("DEEP_DICT_CONFIG_PATH");
        cmd.env_remove("DEEP_DICT_USER_CONFIG");
        cmd.env_remove("DEEP_DICT_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
