use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rw_core::{AuthEventKind, Credentials, Identity, Metadata, Session, SignUpRequest};
use rw_session::{AuthListener, AuthProvider, SessionError, SessionResult, Subscription};
use tokio::sync::oneshot;
use uuid::Uuid;

type Listeners = Arc<Mutex<HashMap<u64, AuthListener>>>;

/// In-memory auth provider with controllable timing and failures
#[derive(Default)]
pub struct FakeAuthProvider {
    listeners: Listeners,
    /// Every listener ever registered, including released ones
    history: Mutex<Vec<AuthListener>>,
    next_id: AtomicU64,
    unsubscribes: Arc<AtomicUsize>,

    current: Mutex<Option<Session>>,
    initial_gate: Mutex<Option<oneshot::Receiver<Option<Session>>>>,
    initial_fails: AtomicBool,

    accounts: Mutex<HashMap<String, (String, Identity)>>,
    sign_in_calls: AtomicUsize,
    sign_in_gate: Mutex<Option<oneshot::Receiver<()>>>,
    emit_on_sign_in: AtomicBool,
    sign_out_calls: AtomicUsize,
    sign_out_fails: AtomicBool,

    sign_up_calls: AtomicUsize,
    sign_up_returns_none: AtomicBool,
    sign_up_fails: AtomicBool,
}

impl FakeAuthProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_session(session: Session) -> Arc<Self> {
        let fake = Self::default();
        *fake.current.lock().unwrap() = Some(session);
        Arc::new(fake)
    }

    /// Hold the initial-session answer until the returned sender fires
    pub fn gate_initial(&self) -> oneshot::Sender<Option<Session>> {
        let (tx, rx) = oneshot::channel();
        *self.initial_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn fail_initial(&self) {
        self.initial_fails.store(true, Ordering::SeqCst);
    }

    pub fn add_account(&self, email: &str, password: &str, identity: Identity) {
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), identity));
    }

    /// Hold the next sign-in answer until the returned sender fires
    pub fn gate_sign_in(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.sign_in_gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn emit_on_sign_in(&self) {
        self.emit_on_sign_in.store(true, Ordering::SeqCst);
    }

    pub fn fail_sign_out(&self) {
        self.sign_out_fails.store(true, Ordering::SeqCst);
    }

    pub fn sign_up_returns_none(&self) {
        self.sign_up_returns_none.store(true, Ordering::SeqCst);
    }

    pub fn fail_sign_up(&self) {
        self.sign_up_fails.store(true, Ordering::SeqCst);
    }

    /// Deliver an auth transition to the registered listeners
    pub fn emit(&self, kind: AuthEventKind, session: Option<Session>) {
        *self.current.lock().unwrap() = session.clone();
        let listeners: Vec<AuthListener> =
            self.listeners.lock().unwrap().values().cloned().collect();
        for listener in listeners {
            listener(kind, session.clone());
        }
    }

    /// Deliver an event to every listener ever registered, as an in-flight
    /// callback racing an unsubscribe would
    pub fn emit_to_released(&self, kind: AuthEventKind, session: Option<Session>) {
        let listeners: Vec<AuthListener> = self.history.lock().unwrap().clone();
        for listener in listeners {
            listener(kind, session.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    pub fn unsubscribe_count(&self) -> usize {
        self.unsubscribes.load(Ordering::SeqCst)
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    pub fn sign_up_calls(&self) -> usize {
        self.sign_up_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthProvider for FakeAuthProvider {
    async fn get_session(&self) -> SessionResult<Option<Session>> {
        let gate = self.initial_gate.lock().unwrap().take();
        if let Some(rx) = gate {
            return Ok(rx.await.unwrap_or(None));
        }
        if self.initial_fails.load(Ordering::SeqCst) {
            return Err(SessionError::unavailable("connection refused"));
        }
        Ok(self.current.lock().unwrap().clone())
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> Box<dyn Subscription> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.history.lock().unwrap().push(Arc::clone(&listener));
        self.listeners.lock().unwrap().insert(id, listener);
        Box::new(FakeSubscription {
            id,
            listeners: Arc::clone(&self.listeners),
            unsubscribes: Arc::clone(&self.unsubscribes),
            released: false,
        })
    }

    async fn sign_in_with_password(&self, credentials: &Credentials) -> SessionResult<Session> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.sign_in_gate.lock().unwrap().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }

        let account = self.accounts.lock().unwrap().get(&credentials.email).cloned();
        let session = match account {
            Some((password, identity)) if password == credentials.password => {
                Session::new(format!("token-{}", identity.id), identity)
            }
            _ => return Err(SessionError::invalid_credentials("Invalid login credentials")),
        };

        if self.emit_on_sign_in.load(Ordering::SeqCst) {
            self.emit(AuthEventKind::SignedIn, Some(session.clone()));
        } else {
            *self.current.lock().unwrap() = Some(session.clone());
        }
        Ok(session)
    }

    async fn sign_out(&self) -> SessionResult<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        *self.current.lock().unwrap() = None;
        if self.sign_out_fails.load(Ordering::SeqCst) {
            return Err(SessionError::unavailable("network down"));
        }
        Ok(())
    }

    async fn sign_up(&self, request: &SignUpRequest) -> SessionResult<Option<Identity>> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        if self.sign_up_fails.load(Ordering::SeqCst) {
            return Err(SessionError::rejected(
                422,
                "user_already_exists",
                "User already registered",
            ));
        }
        if self.sign_up_returns_none.load(Ordering::SeqCst) {
            return Ok(None);
        }

        let mut metadata = Metadata::new();
        metadata.insert("name", request.name.as_str());
        Ok(Some(Identity::new(
            Uuid::new_v4().to_string(),
            request.email.clone(),
            metadata,
        )))
    }
}

pub struct FakeSubscription {
    id: u64,
    listeners: Listeners,
    unsubscribes: Arc<AtomicUsize>,
    released: bool,
}

impl Subscription for FakeSubscription {
    fn unsubscribe(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.listeners.lock().unwrap().remove(&self.id);
        self.unsubscribes.fetch_add(1, Ordering::SeqCst);
    }
}
