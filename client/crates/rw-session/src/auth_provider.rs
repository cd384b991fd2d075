use crate::{SessionResult, Subscription};

use std::sync::Arc;

use async_trait::async_trait;
use rw_core::{AuthEventKind, Credentials, Identity, Session, SignUpRequest};

/// Callback invoked on every auth transition with the session after it
pub type AuthListener = Arc<dyn Fn(AuthEventKind, Option<Session>) + Send + Sync>;

/// Remote authority that validates credentials and issues sessions
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current session, if any
    async fn get_session(&self) -> SessionResult<Option<Session>>;

    /// Register a listener for future auth transitions.
    /// Dropping the handle without calling `unsubscribe` leaves it registered.
    fn on_auth_state_change(&self, listener: AuthListener) -> Box<dyn Subscription>;

    async fn sign_in_with_password(&self, credentials: &Credentials) -> SessionResult<Session>;

    async fn sign_out(&self) -> SessionResult<()>;

    /// Create an account with `name` as initial metadata. The role is not
    /// persisted here; callers write it to the profile store.
    async fn sign_up(&self, request: &SignUpRequest) -> SessionResult<Option<Identity>>;
}
