use std::sync::Arc;

use rw_core::{Access, Identity, Profile, Role};

/// Where the session state machine currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing has settled yet
    Uninitialized,
    Authenticated,
    Anonymous,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Authenticated => "authenticated",
            Self::Anonymous => "anonymous",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of "who is logged in", published by `SessionSync`.
///
/// `loading` starts true and flips to false on the first settle; it never
/// returns to true. `identity` is shared so consumers can tell an unchanged
/// identity apart from a replaced one with `Arc::ptr_eq`.
#[derive(Debug, Clone)]
pub struct SessionState {
    identity: Option<Arc<Identity>>,
    loading: bool,
    /// Bumped on every identity-id change (including to/from none)
    epoch: u64,
    /// Bumped on every authoritative identity write
    revision: u64,
    /// Bumped on every authoritative write of no identity
    sign_outs: u64,
    /// Profile merged under the current epoch
    profile: Option<Profile>,
}

/// Token for a profile lookup started under a given epoch
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EnrichmentTicket {
    pub(crate) epoch: u64,
    pub(crate) id: String,
}

/// Result of applying a write to the state
#[derive(Debug, Default)]
pub(crate) struct Transition {
    /// Whether readers should be notified
    pub(crate) changed: bool,
    /// Lookup to start because the id changed to a non-null value
    pub(crate) enrich: Option<EnrichmentTicket>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            identity: None,
            loading: true,
            epoch: 0,
            revision: 0,
            sign_outs: 0,
            profile: None,
        }
    }
}

impl SessionState {
    pub fn identity(&self) -> Option<&Arc<Identity>> {
        self.identity.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.loading, &self.identity) {
            (true, None) => SessionPhase::Uninitialized,
            (_, Some(_)) => SessionPhase::Authenticated,
            (false, None) => SessionPhase::Anonymous,
        }
    }

    /// Route-guard decision for this snapshot
    pub fn authorize(&self, required: Option<Role>) -> Access {
        Access::evaluate(self.loading, self.identity.as_deref(), required)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn sign_outs(&self) -> u64 {
        self.sign_outs
    }

    /// Mark the first settle. Returns true if `loading` flipped.
    pub(crate) fn settle(&mut self) -> bool {
        std::mem::replace(&mut self.loading, false)
    }

    /// Install an identity from a change event, sign-in or sign-out.
    /// Writing no identity counts as a sign-out.
    pub(crate) fn apply_identity(&mut self, identity: Option<Identity>) -> Transition {
        if identity.is_none() {
            self.sign_outs += 1;
        }
        self.install(identity)
    }

    /// A same-id write keeps the profile merged under the current epoch
    fn install(&mut self, identity: Option<Identity>) -> Transition {
        self.revision += 1;
        let settled = self.settle();

        let previous_id = self.identity.as_ref().map(|current| current.id.as_str());
        let next_id = identity.as_ref().map(|next| next.id.as_str());
        let id_changed = previous_id != next_id;

        let identity = match (identity, &self.profile) {
            (Some(next), Some(profile)) if !id_changed && !next.matches_profile(profile) => {
                Some(next.with_profile(profile))
            }
            (next, _) => next,
        };

        let identity_changed = match (&self.identity, &identity) {
            (Some(current), Some(next)) => current.as_ref() != next,
            (None, None) => false,
            _ => true,
        };

        let enrich = if id_changed {
            self.epoch += 1;
            self.profile = None;
            identity.as_ref().map(|next| EnrichmentTicket {
                epoch: self.epoch,
                id: next.id.clone(),
            })
        } else {
            None
        };

        // An equal identity keeps its Arc so readers see no change
        if identity_changed {
            self.identity = identity.map(Arc::new);
        }

        Transition {
            changed: settled || identity_changed,
            enrich,
        }
    }

    /// Apply a sign-in result. Returns `None` without writing when the
    /// identity was cleared after `sign_outs_at_start` was read.
    pub(crate) fn apply_sign_in(
        &mut self,
        sign_outs_at_start: u64,
        identity: Identity,
    ) -> Option<Transition> {
        if self.sign_outs != sign_outs_at_start {
            return None;
        }
        Some(self.apply_identity(Some(identity)))
    }

    /// Apply the initial-session result. Identity is only taken when nothing
    /// authoritative was written since `revision_at_start`.
    pub(crate) fn apply_initial(
        &mut self,
        revision_at_start: u64,
        identity: Option<Identity>,
    ) -> Transition {
        if self.revision != revision_at_start {
            return Transition {
                changed: self.settle(),
                enrich: None,
            };
        }
        self.install(identity)
    }

    /// Merge a profile lookup result. Returns true if the identity was replaced.
    pub(crate) fn apply_profile(&mut self, ticket: &EnrichmentTicket, profile: &Profile) -> bool {
        if self.epoch != ticket.epoch {
            return false;
        }
        let Some(current) = self.identity.as_ref() else {
            return false;
        };
        if current.id != ticket.id {
            return false;
        }
        self.profile = Some(profile.clone());
        if current.matches_profile(profile) {
            return false;
        }
        self.identity = Some(Arc::new(current.with_profile(profile)));
        true
    }
}
