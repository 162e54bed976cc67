//! Git Profile Library
//!
//! Store named git identities and switch between them.
//!
//! # Features
//!
//! - Save profiles of `user.name` / `user.email` to a JSON file
//! - Apply a profile to the current repository or globally
//! - Back up the identity being replaced before every switch
//!
//! # Example
//!
//! ```no_run
//! use git_profile::config::Settings;
//! use git_profile::identity::{GitCli, Scope};
//! use git_profile::storage::ProfileStore;
//! use git_profile::switcher::ProfileSwitcher;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::resolve(None, None, None)?;
//!     let store = ProfileStore::new(&settings.store_path);
//!     let mut switcher = ProfileSwitcher::new(store, GitCli::from_settings(&settings));
//!
//!     println!("Current: {}", switcher.current_identity());
//!
//!     switcher.add_profile("work", "Jane Doe", "jane@co.com", false)?;
//!     let work = switcher.profiles()[0].clone();
//!     let outcome = switcher.apply_profile(&work, Scope::Global)?;
//!     if let Some(backup) = outcome.backup {
//!         println!("Previous identity saved as {}", backup);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod identity;
pub mod storage;
pub mod switcher;
pub mod utils;

// Re-exports for convenience
pub use error::{ProfileError, Result};
pub use identity::{GitCli, IdentityBackend, MemoryBackend, Scope};
pub use storage::{Identity, Profile, ProfileStore};
pub use switcher::{ApplyOutcome, ProfileSwitcher};
