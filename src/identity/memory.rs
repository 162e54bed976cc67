//! In-process identity backend.
//!
//! Keeps local and global values side by side and resolves reads the way git
//! does: a local value shadows the global one.

use std::collections::HashMap;

use crate::error::{ProfileError, Result};
use crate::identity::{IdentityBackend, IdentityKey, Scope};

/// A single recorded write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    pub key: IdentityKey,
    pub value: String,
    pub scope: Scope,
}

/// Identity backend holding its values in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: HashMap<(Scope, IdentityKey), String>,
    writes: Vec<RecordedWrite>,
    failing: Option<(IdentityKey, String)>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend with a global identity already set.
    pub fn with_global(name: &str, email: &str) -> Self {
        let mut backend = Self::new();
        backend.set(Scope::Global, IdentityKey::Name, name);
        backend.set(Scope::Global, IdentityKey::Email, email);
        backend
    }

    /// Set a value without recording it as a write.
    pub fn set(&mut self, scope: Scope, key: IdentityKey, value: &str) {
        self.values.insert((scope, key), value.to_string());
    }

    /// Value stored at exactly this scope.
    pub fn get(&self, scope: Scope, key: IdentityKey) -> Option<&str> {
        self.values.get(&(scope, key)).map(String::as_str)
    }

    /// Make every later write of `key` fail with `message`.
    pub fn fail_writes_of(&mut self, key: IdentityKey, message: &str) {
        self.failing = Some((key, message.to_string()));
    }

    /// Writes performed so far, in order.
    pub fn writes(&self) -> &[RecordedWrite] {
        &self.writes
    }
}

impl IdentityBackend for MemoryBackend {
    fn read(&self, key: IdentityKey) -> Result<Option<String>> {
        Ok(self
            .get(Scope::Local, key)
            .or_else(|| self.get(Scope::Global, key))
            .map(str::to_string))
    }

    fn write(&mut self, key: IdentityKey, value: &str, scope: Scope) -> Result<()> {
        if let Some((failing_key, message)) = &self.failing {
            if *failing_key == key {
                return Err(ProfileError::Git {
                    key: key.to_string(),
                    message: message.clone(),
                });
            }
        }

        self.writes.push(RecordedWrite {
            key,
            value: value.to_string(),
            scope,
        });
        self.set(scope, key, value);
        Ok(())
    }
}
