//! Client-side session state for RoadWatch.
//!
//! [`SessionSync`] owns the single "who is logged in" view. It reconciles the
//! auth provider's initial-session answer, its change notifications and a
//! best-effort profile lookup, and publishes [`SessionState`] snapshots
//! through a `tokio::sync::watch` channel.

pub mod auth_provider;
pub mod error;
pub mod profile_store;
pub mod registration;
pub mod session_state;
pub mod session_sync;
pub mod subscription;

pub use auth_provider::{AuthListener, AuthProvider};
pub use error::{Result as SessionResult, SessionError};
pub use profile_store::ProfileStore;
pub use registration::register;
pub use session_state::{SessionPhase, SessionState};
pub use session_sync::SessionSync;
pub use subscription::{Subscription, SubscriptionGuard};

#[cfg(test)]
mod tests;
