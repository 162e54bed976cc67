//! Access to the identity git is configured with.
//!
//! The switcher never shells out directly; it talks to an [`IdentityBackend`]
//! so the git binary can be swapped for an in-memory fake.

pub mod git;
pub mod memory;

pub use git::GitCli;
pub use memory::{MemoryBackend, RecordedWrite};

use crate::error::{ProfileError, Result};

// =============================================================================
// Keys and Scopes
// =============================================================================

/// Identity fields managed by the switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    /// `user.name`
    Name,
    /// `user.email`
    Email,
}

impl IdentityKey {
    /// git configuration key.
    pub const fn as_str(&self) -> &'static str {
        match self {
            IdentityKey::Name => "user.name",
            IdentityKey::Email => "user.email",
        }
    }
}

impl std::fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an identity change is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Repository configuration (`.git/config`).
    Local,
    /// Per-user configuration (`~/.gitconfig`).
    Global,
}

impl Scope {
    /// Command line flag selecting this scope in `git config`.
    pub const fn flag(&self) -> &'static str {
        match self {
            Scope::Local => "--local",
            Scope::Global => "--global",
        }
    }

    /// Human readable target, used in apply messages.
    pub const fn describe(&self) -> &'static str {
        match self {
            Scope::Local => "to this repository",
            Scope::Global => "globally",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Local => f.write_str("local"),
            Scope::Global => f.write_str("global"),
        }
    }
}

impl std::str::FromStr for Scope {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Scope::Local),
            "global" => Ok(Scope::Global),
            _ => Err(ProfileError::InvalidInput(format!(
                "Unknown scope '{}'. Use: local or global",
                s
            ))),
        }
    }
}

// =============================================================================
// Backend
// =============================================================================

/// Read/write access to the identity configuration.
pub trait IdentityBackend {
    /// Read a key at git's default resolution. `Ok(None)` means unset.
    fn read(&self, key: IdentityKey) -> Result<Option<String>>;

    /// Write a key at the given scope.
    fn write(&mut self, key: IdentityKey, value: &str, scope: Scope) -> Result<()>;
}
