use crate::{Identity, Role};

use serde::Serialize;

/// Outcome of a route-guard check against the current identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum Access {
    /// Session not resolved yet; callers should keep showing a loader
    Pending,
    /// Nobody is signed in
    Unauthenticated,
    /// Signed in, but with a different (or no) role
    Forbidden {
        required: Role,
        actual: Option<Role>,
    },
    Granted,
}

impl Access {
    /// Guard decision. `required = None` only demands a signed-in identity.
    pub fn evaluate(loading: bool, identity: Option<&Identity>, required: Option<Role>) -> Self {
        if loading {
            return Self::Pending;
        }
        let Some(identity) = identity else {
            return Self::Unauthenticated;
        };
        match required {
            Some(required) if !identity.has_role(required) => Self::Forbidden {
                required,
                actual: identity.role(),
            },
            _ => Self::Granted,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}
