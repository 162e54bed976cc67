//! Custom error types for profile storage and identity switching.
//!
//! This module covers validation, persistence, and failures reported by the
//! git binary when it is asked to change the active identity.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for profile operations.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A required profile field was empty after trimming.
    #[error("The {0} field is required and cannot be empty")]
    EmptyField(&'static str),

    /// A profile with this name exists and overwrite was not requested.
    #[error("Profile '{0}' already exists. Use --force to overwrite it.")]
    ProfileExists(String),

    /// No profile matched the given name or position.
    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),

    /// git has no user.name / user.email to work with.
    #[error("Git identity is not configured")]
    NotConfigured,

    /// Generic invalid input error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reading or writing the profile file failed.
    #[error("Failed to {action} profiles at {}: {source}", .path.display())]
    Storage {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The profile file could not be encoded or decoded.
    #[error("Malformed profile data in {}: {source}", .path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// git ran but refused the change.
    #[error("Failed to set {key}: {message}")]
    Git { key: String, message: String },

    /// The git program could not be started at all.
    #[error("Could not run '{program}': {source}")]
    GitSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Runtime settings could not be resolved.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
