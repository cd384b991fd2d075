use crate::Identity;

use serde::{Deserialize, Serialize};

/// Session issued by the auth provider
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Expiry as unix seconds
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub identity: Identity,
}

impl Session {
    pub fn new(access_token: impl Into<String>, identity: Identity) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
            identity,
        }
    }

    /// True when the token expires within `margin_secs` of `now`.
    /// Sessions without an expiry never expire.
    pub fn is_expired(&self, now: i64, margin_secs: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => now + margin_secs >= expires_at,
            None => false,
        }
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("expires_at", &self.expires_at)
            .field("identity", &self.identity)
            .finish()
    }
}
