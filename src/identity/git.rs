//! `git config` backed identity access.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::config::{DEFAULT_GIT_PROGRAM, Settings};
use crate::error::{ProfileError, Result};
use crate::identity::{IdentityBackend, IdentityKey, Scope};

/// Runs the git binary to read and write `user.name` / `user.email`.
///
/// # Example
///
/// ```no_run
/// use git_profile::identity::{GitCli, IdentityBackend, IdentityKey, Scope};
///
/// let mut git = GitCli::new();
/// println!("{:?}", git.read(IdentityKey::Name)?);
/// git.write(IdentityKey::Email, "jane@co.com", Scope::Local)?;
/// # Ok::<(), git_profile::error::ProfileError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    repo_dir: Option<PathBuf>,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: DEFAULT_GIT_PROGRAM.to_string(),
            repo_dir: None,
        }
    }

    /// Build a backend from resolved settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            program: settings.git_program.clone(),
            repo_dir: settings.repo_dir.clone(),
        }
    }

    /// Arguments for reading a key.
    pub fn read_args(key: IdentityKey) -> Vec<String> {
        vec!["config".into(), key.as_str().into()]
    }

    /// Arguments for writing a key at a scope.
    pub fn write_args(key: IdentityKey, value: &str, scope: Scope) -> Vec<String> {
        vec![
            "config".into(),
            scope.flag().into(),
            key.as_str().into(),
            value.into(),
        ]
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        if let Some(dir) = &self.repo_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> ProfileError {
        ProfileError::GitSpawn {
            program: self.program.clone(),
            source,
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityBackend for GitCli {
    fn read(&self, key: IdentityKey) -> Result<Option<String>> {
        let args = Self::read_args(key);
        log::debug!("{} {}", self.program, args.join(" "));

        let output = self
            .command(&args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        // git exits 1 when the key is unset
        if !output.status.success() {
            return Ok(None);
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Some(value))
    }

    fn write(&mut self, key: IdentityKey, value: &str, scope: Scope) -> Result<()> {
        let args = Self::write_args(key, value, scope);
        log::debug!("{} config {} {}", self.program, scope.flag(), key);

        let output = self
            .command(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            format!("git exited with {}", output.status)
        } else {
            stderr
        };

        Err(ProfileError::Git {
            key: key.to_string(),
            message,
        })
    }
}
