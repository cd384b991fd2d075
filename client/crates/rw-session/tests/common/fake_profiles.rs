use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rw_core::{NewProfile, Profile};
use rw_session::{ProfileStore, SessionError, SessionResult};
use tokio::sync::oneshot;

/// In-memory profile table
#[derive(Default)]
pub struct FakeProfileStore {
    profiles: Mutex<HashMap<String, Profile>>,
    created: Mutex<Vec<NewProfile>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    fetches: AtomicUsize,
    fetch_fails: AtomicBool,
    create_fails: AtomicBool,
}

impl FakeProfileStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn put(&self, id: &str, profile: Profile) {
        self.profiles
            .lock()
            .unwrap()
            .insert(id.to_string(), profile);
    }

    /// Hold the next lookup until the returned sender fires
    pub fn gate_next_fetch(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(rx);
        tx
    }

    pub fn fail_fetch(&self) {
        self.fetch_fails.store(true, Ordering::SeqCst);
    }

    pub fn fail_create(&self) {
        self.create_fails.store(true, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> Vec<NewProfile> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileStore for FakeProfileStore {
    async fn fetch_profile(&self, id: &str) -> SessionResult<Option<Profile>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        if self.fetch_fails.load(Ordering::SeqCst) {
            return Err(SessionError::unavailable("profile table unreachable"));
        }
        Ok(self.profiles.lock().unwrap().get(id).cloned())
    }

    async fn create_profile(&self, profile: &NewProfile) -> SessionResult<()> {
        if self.create_fails.load(Ordering::SeqCst) {
            return Err(SessionError::rejected(
                409,
                "23505",
                "duplicate key value violates unique constraint",
            ));
        }
        self.created.lock().unwrap().push(profile.clone());
        Ok(())
    }
}
