//! Profile storage and persistence.
//!
//! The whole profile list lives in a single JSON array on disk and is
//! rewritten in full on every change.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{ProfileError, Result};
use crate::storage::types::Profile;

// =============================================================================
// ProfileStore
// =============================================================================

/// JSON-file backed profile list.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the profile file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load profiles from disk.
    ///
    /// A missing file is an empty list. An unreadable or corrupt file is
    /// logged and also treated as empty, so bad state never blocks startup.
    pub fn load(&self) -> Vec<Profile> {
        match self.try_load() {
            Ok(profiles) => profiles,
            Err(e) => {
                log::warn!("Error loading profiles: {}", e);
                Vec::new()
            }
        }
    }

    /// Load profiles from disk, reporting read and parse failures.
    pub fn try_load(&self) -> Result<Vec<Profile>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no profile file at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(ProfileError::Storage {
                    action: "read",
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| ProfileError::Serialization {
            path: self.path.clone(),
            source,
        })
    }

    /// Save the full list to disk, replacing whatever was there.
    pub fn save(&self, profiles: &[Profile]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ProfileError::Storage {
                action: "create directory for",
                path: self.path.clone(),
                source,
            })?;
        }

        let content =
            serde_json::to_string_pretty(profiles).map_err(|source| ProfileError::Serialization {
                path: self.path.clone(),
                source,
            })?;

        std::fs::write(&self.path, content).map_err(|source| ProfileError::Storage {
            action: "write",
            path: self.path.clone(),
            source,
        })?;

        log::debug!(
            "saved {} profile(s) to {}",
            profiles.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ProfileStore {
        ProfileStore::new(dir.path().join("profiles.json"))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.load().is_empty());
        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().is_empty());
        assert!(matches!(
            store.try_load(),
            Err(ProfileError::Serialization { .. })
        ));
    }

    #[test]
    fn test_unreadable_path_is_reported() {
        let dir = TempDir::new().unwrap();
        // a directory where the file should be: exists, but cannot be read as text
        let store = ProfileStore::new(dir.path());

        assert!(matches!(
            store.try_load(),
            Err(ProfileError::Storage { action: "read", .. })
        ));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_file_under_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path().join("missing/profiles.json"));

        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let profiles = vec![
            Profile::new("work", "Jane Doe", "jane@co.com"),
            Profile::new("home", "Jane", "jane@home.org"),
        ];

        store.save(&profiles).unwrap();

        assert_eq!(store.load(), profiles);
    }

    #[test]
    fn test_save_is_stable() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save(&[Profile::new("work", "Jane Doe", "jane@co.com")])
            .unwrap();
        let first = std::fs::read_to_string(store.path()).unwrap();

        store.save(&store.load()).unwrap();
        store.save(&store.load()).unwrap();

        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), first);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            r#"[{"profile_name":"p","name":"N","email":"e@x","signing_key":"ABC"}]"#,
        )
        .unwrap();

        assert_eq!(store.load(), vec![Profile::new("p", "N", "e@x")]);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path().join("nested/deeper/profiles.json"));

        store.save(&[]).unwrap();

        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[test]
    fn test_save_into_file_parent_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = ProfileStore::new(blocker.join("profiles.json"));

        assert!(matches!(
            store.save(&[]),
            Err(ProfileError::Storage { .. })
        ));
    }
}
