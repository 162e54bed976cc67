//! Profile storage and persistence module.
//!
//! Holds the profile and identity types and the JSON file they live in.

pub mod profiles;
pub mod types;

// Re-export commonly used items
pub use profiles::ProfileStore;
pub use types::*;
