pub mod parsing;

// Re-export commonly used items
pub use parsing::{format_profile_row, parse_scope, resolve_selector};
