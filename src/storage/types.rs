use serde::{Deserialize, Serialize};

/// Value reported for both identity fields when git has none set.
pub const NOT_CONFIGURED: &str = "Not configured";

/// A saved identity under a unique profile name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub profile_name: String,
    pub name: String,
    pub email: String,
}

impl Profile {
    pub fn new(
        profile_name: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            profile_name: profile_name.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// True when this profile carries exactly the given identity.
    pub fn matches(&self, identity: &Identity) -> bool {
        self.name == identity.name && self.email == identity.email
    }
}

/// The user.name / user.email pair git currently resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Sentinel returned when git has no identity configured.
    pub fn not_configured() -> Self {
        Self::new(NOT_CONFIGURED, NOT_CONFIGURED)
    }

    /// False for the sentinel; either field carrying it counts.
    pub fn is_configured(&self) -> bool {
        self.name != NOT_CONFIGURED && self.email != NOT_CONFIGURED
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
