//! Thin wrapper around the `git` executable
//!
//! This uses the system git command, so whatever authentication and
//! configuration the user has set up for git applies unchanged.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// Runs git commands inside one working directory
#[derive(Debug, Clone)]
pub struct Git {
    cwd: PathBuf,
    executable: String,
}

impl Git {
    /// Create a wrapper for `cwd`, which must be an existing directory.
    pub fn new(cwd: impl Into<PathBuf>) -> Result<Self> {
        let cwd = cwd.into();
        if !cwd.is_dir() {
            return Err(Error::Config {
                message: format!("Git working directory not found: '{}'", cwd.display()),
                hint: None,
            });
        }
        Ok(Self {
            cwd,
            executable: "git".to_string(),
        })
    }

    /// Use `executable` instead of `git` from `PATH`.
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Run git with `args` and return the first line of its output.
    ///
    /// All output lines are logged at debug level.
    ///
    /// # Errors
    ///
    /// Returns `Error::GitCommand` if git cannot be started or exits with a
    /// non-zero status.
    pub fn exec<I, S>(&self, args: I) -> Result<Option<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let command = std::iter::once(self.executable.clone())
            .chain(args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ");
        debug!("Exec (cwd: {}): {}", self.cwd.display(), command);

        let output = Command::new(&self.executable)
            .args(&args)
            .current_dir(&self.cwd)
            .output()
            .map_err(|e| Error::GitCommand {
                command: command.clone(),
                cwd: self.cwd.display().to_string(),
                stderr: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stdout.lines().chain(stderr.lines()) {
            debug!("{}", line);
        }

        if !output.status.success() {
            return Err(Error::GitCommand {
                command,
                cwd: self.cwd.display().to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(stdout.lines().next().map(String::from))
    }

    /// The revision that was current on `branch` (or `HEAD`) at the time
    /// `before`, e.g. `"2018-09-01 23:59:59"`.
    pub fn determine_revision(
        &self,
        before: Option<&str>,
        branch: Option<&str>,
    ) -> Result<Option<String>> {
        debug!(
            "Determine git revision for repo: {}; branch: {:?}, before: {:?}",
            self.cwd.display(),
            branch,
            before
        );
        self.exec(revision_args(before, branch))
    }
}

/// Arguments for `git rev-list` selecting the last revision before a date.
///
/// The open-ended year `9999` is rewritten to `2099`, which git still
/// accepts.
pub fn revision_args(before: Option<&str>, branch: Option<&str>) -> Vec<String> {
    let mut args = vec!["rev-list".to_string(), "-n".to_string(), "1".to_string()];
    if let Some(date) = before {
        let date = match date.strip_prefix("9999-") {
            Some(rest) => format!("2099-{}", rest),
            None => date.to_string(),
        };
        args.push(format!("--before={}", date));
    }
    if let Some(branch) = branch {
        args.push(branch.to_string());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Git::new(dir.path()).is_ok());
        assert!(matches!(
            Git::new(dir.path().join("missing")),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_revision_args() {
        assert_eq!(revision_args(None, None), ["rev-list", "-n", "1"]);
        assert_eq!(
            revision_args(Some("2018-09-01 23:59:59"), Some("master")),
            ["rev-list", "-n", "1", "--before=2018-09-01 23:59:59", "master"]
        );
        assert_eq!(
            revision_args(Some("9999-12-31"), None),
            ["rev-list", "-n", "1", "--before=2099-12-31"]
        );
    }

    #[test]
    fn test_exec_missing_executable() {
        let dir = tempfile::tempdir().unwrap();
        let git = Git::new(dir.path())
            .unwrap()
            .with_executable("deep-dict-no-such-git-binary");
        match git.exec(["--version"]) {
            Err(Error::GitCommand { command, .. }) => {
                assert_eq!(command, "deep-dict-no-such-git-binary --version");
            }
            other => panic!("expected GitCommand error, got {:?}", other),
        }
    }

    #[test]
    #[cfg_attr(not(feature = "integration-tests"), ignore)]
    fn test_exec_in_repository() {
        let dir = tempfile::tempdir().unwrap();
        let git = Git::new(dir.path()).unwrap();
        git.exec(["init", "--quiet"]).unwrap();
        assert_eq!(
            git.exec(["rev-parse", "--is-inside-work-tree"]).unwrap(),
            Some("true".to_string())
        );
        // No commits yet, so there is no revision to find.
        assert!(git.determine_revision(None, Some("HEAD")).is_err());
    }
}
