use crate::{Metadata, Profile, Role};

use serde::{Deserialize, Serialize};

/// Locally known authenticated principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable id assigned by the auth provider at sign-up
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Identity {
    pub fn new(id: impl Into<String>, email: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            metadata,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata.name()
    }

    pub fn role(&self) -> Option<Role> {
        self.metadata.role()
    }

    /// Exact role comparison; no role implies another.
    pub fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }

    pub fn matches_profile(&self, profile: &Profile) -> bool {
        self.metadata.matches_profile(profile)
    }

    /// New identity with profile name/role merged into the metadata
    pub fn with_profile(&self, profile: &Profile) -> Self {
        Self {
            id: self.id.clone(),
            email: self.email.clone(),
            metadata: self.metadata.with_profile(profile),
        }
    }
}
