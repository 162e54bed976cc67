//! Runtime settings for the profile switcher.
//!
//! Resolves where profiles are stored and how git is invoked. Each value is
//! taken from an explicit override first, then the environment, then a
//! built-in default.

use std::path::PathBuf;

use crate::error::{ProfileError, Result};

// =============================================================================
// Defaults
// =============================================================================

/// File name of the profile list inside the home directory.
pub const STORE_FILE: &str = ".git_profile_manager.json";

/// Environment variable overriding the profile file location.
pub const STORE_ENV: &str = "GIT_PROFILE_STORE";

/// Environment variable overriding the git program.
pub const GIT_ENV: &str = "GIT_PROFILE_GIT";

/// Program used when nothing else is configured.
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// Get the default profile file path.
/// - Linux/macOS: ~/.git_profile_manager.json
/// - Windows: %USERPROFILE%\.git_profile_manager.json
pub fn default_store_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|p| p.join(STORE_FILE))
        .ok_or_else(|| ProfileError::Config("Could not find home directory".into()))
}

// =============================================================================
// Settings
// =============================================================================

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Location of the JSON profile list.
    pub store_path: PathBuf,
    /// git executable name or path.
    pub git_program: String,
    /// Directory git runs in; `None` means the current directory.
    pub repo_dir: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from optional overrides and the process environment.
    pub fn resolve(
        store: Option<PathBuf>,
        git: Option<String>,
        repo_dir: Option<PathBuf>,
    ) -> Result<Self> {
        Self::resolve_with(store, git, repo_dir, |key| std::env::var(key).ok())
    }

    /// Same as [`Settings::resolve`] with an injectable environment lookup.
    pub fn resolve_with(
        store: Option<PathBuf>,
        git: Option<String>,
        repo_dir: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let store_path = match store.or_else(|| non_empty(env(STORE_ENV)).map(PathBuf::from)) {
            Some(path) => path,
            None => default_store_path()?,
        };

        let git_program = git
            .or_else(|| non_empty(env(GIT_ENV)))
            .unwrap_or_else(|| DEFAULT_GIT_PROGRAM.to_string());

        log::debug!(
            "settings: store={} git={} repo={:?}",
            store_path.display(),
            git_program,
            repo_dir
        );

        Ok(Self {
            store_path,
            git_program,
            repo_dir,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
