//! Parsing utilities for CLI arguments and list output.
//!
//! This module provides the small conversions the command line needs between
//! user input and the profile list.

use crate::error::{ProfileError, Result};
use crate::identity::Scope;
use crate::storage::Profile;

// =============================================================================
// Scope Parsing
// =============================================================================

/// Parse a scope name into a [`Scope`].
///
/// # Example
/// ```
/// use git_profile::identity::Scope;
/// use git_profile::utils::parsing::parse_scope;
///
/// assert_eq!(parse_scope("global").unwrap(), Scope::Global);
/// assert!(parse_scope("system").is_err());
/// ```
pub fn parse_scope(name: &str) -> Result<Scope> {
    name.parse()
}

// =============================================================================
// Profile Selection
// =============================================================================

/// Resolve a profile selector to a list index.
///
/// An exact profile name wins; otherwise a number is taken as the 1-based
/// position shown by `list`.
///
/// # Example
/// ```
/// use git_profile::storage::Profile;
/// use git_profile::utils::parsing::resolve_selector;
///
/// let profiles = vec![
///     Profile::new("work", "Jane", "jane@co.com"),
///     Profile::new("home", "Jane", "jane@home.org"),
/// ];
/// assert_eq!(resolve_selector(&profiles, "home").unwrap(), 1);
/// assert_eq!(resolve_selector(&profiles, "1").unwrap(), 0);
/// ```
pub fn resolve_selector(profiles: &[Profile], selector: &str) -> Result<usize> {
    let selector = selector.trim();

    if let Some(index) = profiles.iter().position(|p| p.profile_name == selector) {
        return Ok(index);
    }

    match selector.parse::<usize>() {
        Ok(position) if (1..=profiles.len()).contains(&position) => Ok(position - 1),
        _ => Err(ProfileError::ProfileNotFound(selector.to_string())),
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// One row of the profile list: `profile_name | name | email`.
pub fn format_profile_row(profile: &Profile) -> String {
    format!(
        "{:20} | {:20} | {}",
        profile.profile_name, profile.name, profile.email
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Profile> {
        vec![
            Profile::new("work", "Jane Doe", "jane@co.com"),
            Profile::new("2", "Numbered", "n@x"),
            Profile::new("home", "Jane", "jane@home.org"),
        ]
    }

    #[test]
    fn test_name_beats_position() {
        assert_eq!(resolve_selector(&sample(), "2").unwrap(), 1);
        assert_eq!(resolve_selector(&sample(), "3").unwrap(), 2);
    }

    #[test]
    fn test_out_of_range_position() {
        assert!(matches!(
            resolve_selector(&sample(), "0"),
            Err(ProfileError::ProfileNotFound(_))
        ));
        assert!(resolve_selector(&sample(), "4").is_err());
        assert!(resolve_selector(&[], "1").is_err());
        assert!(resolve_selector(&sample(), "nope").is_err());
    }

    #[test]
    fn test_row_alignment() {
        let row = format_profile_row(&Profile::new("work", "Jane Doe", "jane@co.com"));
        assert_eq!(
            row,
            "work                 | Jane Doe             | jane@co.com"
        );
    }
}
