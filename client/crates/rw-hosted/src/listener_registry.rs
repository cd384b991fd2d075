use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use log::debug;
use rw_core::{AuthEventKind, Session};
use rw_session::{AuthListener, Subscription};

/// Registry of auth-state listeners
pub(crate) struct ListenerRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    listeners: HashMap<u64, AuthListener>,
}

impl ListenerRegistry {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner::default())),
        }
    }

    pub(crate) fn register(&self, listener: AuthListener) -> HostedSubscription {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.insert(id, listener);
        debug!("Registered auth listener {id} ({} total)", inner.listeners.len());

        HostedSubscription {
            id,
            registry: Arc::downgrade(&self.inner),
            active: true,
        }
    }

    /// Invoke every listener. The lock is released before any callback runs.
    pub(crate) fn notify(&self, kind: AuthEventKind, session: Option<&Session>) {
        let listeners: Vec<AuthListener> = {
            let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            inner.listeners.values().cloned().collect()
        };

        debug!("Notifying {} listener(s) of {kind}", listeners.len());
        for listener in listeners {
            listener(kind, session.cloned());
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .len()
    }
}

/// Handle returned by `HostedAuthClient::on_auth_state_change`
pub struct HostedSubscription {
    id: u64,
    registry: Weak<RwLock<RegistryInner>>,
    active: bool,
}

impl Subscription for HostedSubscription {
    fn unsubscribe(&mut self) {
        if !std::mem::replace(&mut self.active, false) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .listeners
                .remove(&self.id);
            debug!("Removed auth listener {}", self.id);
        }
    }
}
