//! Profile switching.
//!
//! [`ProfileSwitcher`] owns the profile list, keeps it written through to
//! the [`ProfileStore`], and changes the active git identity through an
//! [`IdentityBackend`]. Applying a profile first backs up the identity it is
//! about to replace, so a switch never loses the previous identity.

use crate::error::{ProfileError, Result};
use crate::identity::{IdentityBackend, IdentityKey, Scope};
use crate::storage::{Identity, Profile, ProfileStore};

/// Suffix appended to the identity name when backing it up.
pub const BACKUP_SUFFIX: &str = "_backup";

/// Result of a successful [`ProfileSwitcher::apply_profile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Name of the profile that was applied.
    pub profile_name: String,
    pub scope: Scope,
    /// Name of the backup profile created for the replaced identity, if any.
    pub backup: Option<String>,
    /// Identity as git reports it after the change.
    pub identity: Identity,
}

/// Saved profiles plus the identity backend they are applied through.
///
/// # Example
///
/// ```no_run
/// use git_profile::identity::{GitCli, Scope};
/// use git_profile::storage::ProfileStore;
/// use git_profile::switcher::ProfileSwitcher;
///
/// let store = ProfileStore::new("/home/jane/.git_profile_manager.json");
/// let mut switcher = ProfileSwitcher::new(store, GitCli::new());
///
/// switcher.add_profile("work", "Jane Doe", "jane@co.com", false)?;
/// let work = switcher.profiles()[0].clone();
/// let outcome = switcher.apply_profile(&work, Scope::Local)?;
/// println!("now {}", outcome.identity);
/// # Ok::<(), git_profile::error::ProfileError>(())
/// ```
pub struct ProfileSwitcher<B> {
    store: ProfileStore,
    backend: B,
    profiles: Vec<Profile>,
}

impl<B: IdentityBackend> ProfileSwitcher<B> {
    /// Create a switcher, loading whatever profiles the store holds.
    pub fn new(store: ProfileStore, backend: B) -> Self {
        let profiles = store.load();
        log::debug!("loaded {} profile(s)", profiles.len());
        Self {
            store,
            backend,
            profiles,
        }
    }

    /// Saved profiles in display order.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Re-read the profile list from disk.
    pub fn reload(&mut self) -> &[Profile] {
        self.profiles = self.store.load();
        &self.profiles
    }

    /// Position of the profile with this exact name.
    pub fn position(&self, profile_name: &str) -> Option<usize> {
        self.profiles
            .iter()
            .position(|p| p.profile_name == profile_name)
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Identity git currently resolves, or the "Not configured" sentinel.
    ///
    /// A key that is set to an empty value counts as unset.
    pub fn current_identity(&self) -> Identity {
        match (self.read_key(IdentityKey::Name), self.read_key(IdentityKey::Email)) {
            (Some(name), Some(email)) => Identity::new(name, email),
            _ => Identity::not_configured(),
        }
    }

    fn read_key(&self, key: IdentityKey) -> Option<String> {
        match self.backend.read(key) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                log::warn!("Failed to read {}: {}", key, e);
                None
            }
        }
    }

    /// Write name then email at `scope`.
    ///
    /// Stops at the first failure. A name written before a failed email
    /// write is left in place.
    pub fn set_identity(&mut self, name: &str, email: &str, scope: Scope) -> Result<()> {
        self.backend.write(IdentityKey::Name, name, scope)?;
        self.backend.write(IdentityKey::Email, email, scope)?;
        log::info!("set {} identity to {} <{}>", scope, name, email);
        Ok(())
    }

    // =========================================================================
    // Profile Management
    // =========================================================================

    /// Add a profile, replacing one of the same name only if `overwrite`.
    pub fn add_profile(
        &mut self,
        profile_name: &str,
        name: &str,
        email: &str,
        overwrite: bool,
    ) -> Result<&[Profile]> {
        let profile_name = required("profile name", profile_name)?;
        let name = required("name", name)?;
        let email = required("email", email)?;

        if let Some(index) = self.position(profile_name) {
            if !overwrite {
                return Err(ProfileError::ProfileExists(profile_name.to_string()));
            }
            self.profiles.remove(index);
            log::debug!("overwriting profile '{}'", profile_name);
        }

        self.profiles.push(Profile::new(profile_name, name, email));
        self.persist()?;
        Ok(&self.profiles)
    }

    /// Save the current identity as a profile unless it is unset or already
    /// stored under some name. Returns the new profile's name.
    pub fn backup_current_profile(&mut self) -> Result<Option<String>> {
        let current = self.current_identity();

        if !current.is_configured() {
            return Ok(None);
        }

        if self.profiles.iter().any(|p| p.matches(&current)) {
            return Ok(None);
        }

        let backup_name = self.backup_name_for(&current.name);
        self.profiles
            .push(Profile::new(backup_name.clone(), current.name, current.email));
        self.persist()?;

        log::info!("backed up previous identity as '{}'", backup_name);
        Ok(Some(backup_name))
    }

    /// First free name among `<name>_backup`, `<name>_backup_1`, `_2`, ...
    fn backup_name_for(&self, name: &str) -> String {
        let base = format!("{}{}", name, BACKUP_SUFFIX);
        let mut candidate = base.clone();
        let mut counter = 1u32;

        while self.position(&candidate).is_some() {
            candidate = format!("{}_{}", base, counter);
            counter += 1;
        }
        candidate
    }

    /// Switch git to `selected`, backing up the replaced identity first.
    ///
    /// A backup written before a failed identity change stays saved.
    pub fn apply_profile(&mut self, selected: &Profile, scope: Scope) -> Result<ApplyOutcome> {
        let current = self.current_identity();

        let backup = if selected.matches(&current) {
            None
        } else {
            self.backup_current_profile()?
        };

        self.set_identity(&selected.name, &selected.email, scope)?;
        log::info!("applied profile '{}' ({})", selected.profile_name, scope);

        Ok(ApplyOutcome {
            profile_name: selected.profile_name.clone(),
            scope,
            backup,
            identity: self.current_identity(),
        })
    }

    /// Remove the profile at `index` once `confirmed`.
    ///
    /// Out of range or unconfirmed deletes do nothing and return `Ok(None)`.
    pub fn delete_profile(&mut self, index: usize, confirmed: bool) -> Result<Option<Profile>> {
        if !confirmed || index >= self.profiles.len() {
            return Ok(None);
        }

        let removed = self.profiles.remove(index);
        self.persist()?;

        log::info!("deleted profile '{}'", removed.profile_name);
        Ok(Some(removed))
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.profiles)
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ProfileError::EmptyField(field));
    }
    Ok(value)
}
