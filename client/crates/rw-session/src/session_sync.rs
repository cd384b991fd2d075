use crate::session_state::{EnrichmentTicket, Transition};
use crate::{
    AuthListener, AuthProvider, ProfileStore, SessionError, SessionResult, SessionState,
    SubscriptionGuard,
};

use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use error_location::ErrorLocation;
use log::{debug, info, warn};
use rw_core::{Credentials, Identity, Profile};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Single source of truth for the current authenticated identity.
///
/// Owned by the application root and shared by reference. Readers observe
/// [`SessionState`] through [`SessionSync::subscribe`]; every write goes
/// through one atomic read-modify-write on the watch channel, so the
/// initial query, change events, sign-in/sign-out and profile enrichment can
/// complete in any order.
pub struct SessionSync {
    inner: Arc<Inner>,
    subscription: Mutex<Option<SubscriptionGuard>>,
}

struct Inner {
    auth: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileStore>,
    state: watch::Sender<SessionState>,
    runtime: Handle,
    tasks: Mutex<Tasks>,
    torn_down: AtomicBool,
}

#[derive(Default)]
struct Tasks {
    initial: Option<JoinHandle<()>>,
    enrichment: Option<JoinHandle<()>>,
}

impl SessionSync {
    /// Register the change listener and issue the initial-session query.
    ///
    /// Must be called from within a tokio runtime; background work (initial
    /// query, profile lookups) is spawned on it.
    #[track_caller]
    pub fn start(
        auth: Arc<dyn AuthProvider>,
        profiles: Arc<dyn ProfileStore>,
    ) -> SessionResult<Self> {
        let runtime = Handle::try_current().map_err(|e| SessionError::Runtime {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let initial = SessionState::default();
        let revision_at_start = initial.revision();
        let (state, _) = watch::channel(initial);

        let inner = Arc::new(Inner {
            auth,
            profiles,
            state,
            runtime,
            tasks: Mutex::new(Tasks::default()),
            torn_down: AtomicBool::new(false),
        });

        let weak = Arc::downgrade(&inner);
        let listener: AuthListener = Arc::new(move |kind, session| {
            let Some(inner) = Weak::upgrade(&weak) else {
                return;
            };
            if inner.torn_down.load(Ordering::Acquire) {
                debug!("Ignoring {kind} after teardown");
                return;
            }
            debug!("Auth state change: {kind}");
            inner.apply_identity(session.map(|s| s.identity));
        });

        let guard = SubscriptionGuard::new(inner.auth.on_auth_state_change(listener));
        let sync = Self {
            inner,
            subscription: Mutex::new(Some(guard)),
        };

        sync.inner.spawn_initial(revision_at_start);
        info!("Session sync started");

        Ok(sync)
    }

    /// Receiver that yields every published state
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Current snapshot
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn identity(&self) -> Option<Arc<Identity>> {
        self.inner.state.borrow().identity().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading()
    }

    /// Wait for the first settle and return the state at that point
    pub async fn wait_until_resolved(&self) -> SessionState {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| !state.loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    /// Password sign-in. The identity is installed as soon as the provider
    /// answers, without waiting for the change notification.
    ///
    /// A sign-out that lands while the provider call is in flight wins: the
    /// provider session is ended again and `SessionError::Superseded` is
    /// returned.
    pub async fn sign_in(&self, email: &str, password: &str) -> SessionResult<Arc<Identity>> {
        let credentials = Credentials::new(email.trim(), password);
        if let Err(e) = credentials.validate() {
            warn!("Sign in rejected before contacting provider: {e}");
            return Err(e.into());
        }

        let sign_outs_at_start = self.inner.state.borrow().sign_outs();
        let session = match self.inner.auth.sign_in_with_password(&credentials).await {
            Ok(session) => session,
            Err(e) => {
                warn!("Sign in error: {e}");
                return Err(e);
            }
        };

        let id = session.identity.id.clone();
        match self.inner.apply_sign_in(sign_outs_at_start, session.identity) {
            Some(identity) => {
                info!("Signed in as {id}");
                Ok(identity)
            }
            None => {
                warn!("Sign in for {id} finished after a sign-out; discarding it");
                self.sign_out().await;
                Err(SessionError::superseded("signed out while sign-in was in flight"))
            }
        }
    }

    /// Sign out remotely, then clear the local identity regardless of the
    /// remote outcome. Safe to call when already signed out.
    pub async fn sign_out(&self) {
        if let Err(e) = self.inner.auth.sign_out().await {
            warn!("Sign out error (clearing local session anyway): {e}");
        }
        self.inner.apply_identity(None);
        info!("Signed out");
    }

    /// Wait for the most recent profile lookup, if one is in flight
    pub async fn flush_enrichment(&self) {
        let handle = lock(&self.inner.tasks).enrichment.take();
        if let Some(handle) = handle
            && let Err(e) = handle.await
            && !e.is_cancelled()
        {
            warn!("Profile enrichment task failed: {e}");
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.torn_down.load(Ordering::Acquire)
    }

    /// Release the change subscription and stop background work.
    /// Repeated calls are no-ops.
    pub fn teardown(&self) {
        {
            // Spawns check the flag under this same lock
            let mut tasks = lock(&self.inner.tasks);
            if self.inner.torn_down.swap(true, Ordering::AcqRel) {
                return;
            }
            for handle in [tasks.initial.take(), tasks.enrichment.take()]
                .into_iter()
                .flatten()
            {
                handle.abort();
            }
        }

        if let Some(mut guard) = lock(&self.subscription).take() {
            guard.release();
        }

        debug!("Session sync torn down");
    }
}

impl Drop for SessionSync {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Inner {
    /// Write an authoritative identity and start enrichment on id change.
    /// Returns the identity installed afterwards.
    fn apply_identity(self: &Arc<Self>, identity: Option<Identity>) -> Option<Arc<Identity>> {
        let mut transition = Transition::default();
        let mut installed = None;
        self.state.send_if_modified(|state| {
            transition = state.apply_identity(identity);
            installed = state.identity().cloned();
            transition.changed
        });

        if let Some(ticket) = transition.enrich {
            self.spawn_enrichment(ticket);
        }
        installed
    }

    /// Checked sign-in write. `None` when a sign-out landed since the
    /// counter was read.
    fn apply_sign_in(
        self: &Arc<Self>,
        sign_outs_at_start: u64,
        identity: Identity,
    ) -> Option<Arc<Identity>> {
        let mut transition = None;
        let mut installed = None;
        self.state.send_if_modified(|state| {
            transition = state.apply_sign_in(sign_outs_at_start, identity);
            installed = state.identity().cloned();
            transition.as_ref().is_some_and(|t| t.changed)
        });

        if let Some(ticket) = transition?.enrich {
            self.spawn_enrichment(ticket);
        }
        installed
    }

    fn spawn_initial(self: &Arc<Self>, revision_at_start: u64) {
        let mut tasks = lock(&self.tasks);
        if self.torn_down.load(Ordering::Acquire) {
            return;
        }

        let inner = Arc::clone(self);
        tasks.initial = Some(self.runtime.spawn(async move {
            let identity = match inner.auth.get_session().await {
                Ok(session) => session.map(|s| s.identity),
                Err(e) => {
                    warn!("Error getting session: {e}");
                    None
                }
            };

            if inner.torn_down.load(Ordering::Acquire) {
                return;
            }

            let mut transition = Transition::default();
            inner.state.send_if_modified(|state| {
                transition = state.apply_initial(revision_at_start, identity);
                transition.changed
            });
            if let Some(ticket) = transition.enrich {
                inner.spawn_enrichment(ticket);
            }
        }));
    }

    fn spawn_enrichment(self: &Arc<Self>, ticket: EnrichmentTicket) {
        // Checked under the lock teardown takes before aborting
        let mut tasks = lock(&self.tasks);
        if self.torn_down.load(Ordering::Acquire) {
            return;
        }

        let inner = Arc::clone(self);
        // A superseded lookup keeps running; its epoch no longer matches
        tasks.enrichment = Some(self.runtime.spawn(async move {
            match inner.profiles.fetch_profile(&ticket.id).await {
                Ok(Some(profile)) => inner.apply_profile(&ticket, &profile),
                Ok(None) => debug!("No profile row for {}; keeping provider metadata", ticket.id),
                Err(e) => warn!("Profile lookup for {} failed: {e}", ticket.id),
            }
        }));
    }

    fn apply_profile(&self, ticket: &EnrichmentTicket, profile: &Profile) {
        let applied = self
            .state
            .send_if_modified(|state| state.apply_profile(ticket, profile));
        if applied {
            debug!(
                "Profile synced for {}: name={}, role={}",
                ticket.id, profile.name, profile.role
            );
        } else {
            debug!("Profile for {} unchanged or stale; discarded", ticket.id);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
