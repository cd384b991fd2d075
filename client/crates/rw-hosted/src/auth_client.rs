use crate::http::HttpClient;
use crate::listener_registry::ListenerRegistry;
use crate::wire::{
    PasswordGrant, RefreshGrant, SignUpBody, SignUpData, SignUpResponse, TokenResponse,
};
use crate::{AUTH_PATH, SessionFile};

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Method;
use rw_config::Config;
use rw_core::{AuthEventKind, Credentials, Identity, Session, SignUpRequest};
use rw_session::{AuthListener, AuthProvider, SessionError, SessionResult, Subscription};

/// Auth provider backed by the hosted GoTrue API.
///
/// Holds the current session in memory (mirrored to a [`SessionFile`] when
/// persistence is on) and notifies registered listeners on every transition.
pub struct HostedAuthClient {
    http: HttpClient,
    session: Mutex<Option<Session>>,
    listeners: ListenerRegistry,
    store: Option<SessionFile>,
    refresh_margin_secs: i64,
}

impl HostedAuthClient {
    /// Build from config. With `session.persist` on, the session file in the
    /// config directory is used and any stored session restored.
    pub fn new(config: &Config) -> SessionResult<Self> {
        let store = if config.session.persist {
            match SessionFile::new() {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!("Session persistence disabled: {e}");
                    None
                }
            }
        } else {
            None
        };
        Self::with_store(config, store)
    }

    /// Build with an explicit session file (or none)
    pub fn with_store(config: &Config, store: Option<SessionFile>) -> SessionResult<Self> {
        let base_url = format!("{}{AUTH_PATH}", config.hosted.base_url());
        let http = HttpClient::new(&base_url, &config.hosted.anon_key, config.http.timeout())?;

        let session = match store.as_ref().map(SessionFile::load) {
            Some(Ok(session)) => session,
            Some(Err(e)) => {
                warn!("Ignoring unreadable session file: {e}");
                None
            }
            None => None,
        };
        if let Some(session) = &session {
            debug!("Restored session for {}", session.identity.id);
        }

        Ok(Self {
            http,
            session: Mutex::new(session),
            listeners: ListenerRegistry::new(),
            store,
            refresh_margin_secs: config.session.refresh_margin_secs,
        })
    }

    /// Current session without any network round trip
    pub fn current_session(&self) -> Option<Session> {
        self.lock_session().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.lock_session().as_ref().map(|s| s.access_token.clone())
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the stored session, mirror it to disk and notify listeners
    fn transition(&self, kind: AuthEventKind, session: Option<Session>) {
        *self.lock_session() = session.clone();

        if let Some(store) = &self.store {
            let persisted = match &session {
                Some(session) => store.save(session),
                None => store.clear(),
            };
            if let Err(e) = persisted {
                warn!("Failed to update session file: {e}");
            }
        }

        self.listeners.notify(kind, session.as_ref());
    }

    async fn refresh(&self, refresh_token: &str) -> SessionResult<Option<Session>> {
        let url = self.http.url("/token", &[("grant_type", "refresh_token")])?;
        let req = self
            .http
            .request(Method::POST, url, None)
            .json(&RefreshGrant { refresh_token });

        match self.http.execute::<TokenResponse>(req).await {
            Ok(token) => {
                let session = token.into_session(now());
                info!("Session refreshed for {}", session.identity.id);
                self.transition(AuthEventKind::TokenRefreshed, Some(session.clone()));
                Ok(Some(session))
            }
            Err(e @ SessionError::Rejected { .. }) => {
                warn!("Refresh token rejected, signing out: {e}");
                self.transition(AuthEventKind::SignedOut, None);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl AuthProvider for HostedAuthClient {
    async fn get_session(&self) -> SessionResult<Option<Session>> {
        let Some(session) = self.current_session() else {
            return Ok(None);
        };

        let now = now();
        if !session.is_expired(now, self.refresh_margin_secs) {
            return Ok(Some(session));
        }

        match session.refresh_token.as_deref() {
            Some(token) if session.can_refresh() => self.refresh(token).await,
            _ if session.is_expired(now, 0) => {
                info!("Stored session expired without refresh token");
                self.transition(AuthEventKind::SignedOut, None);
                Ok(None)
            }
            _ => Ok(Some(session)),
        }
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> Box<dyn Subscription> {
        Box::new(self.listeners.register(listener))
    }

    async fn sign_in_with_password(&self, credentials: &Credentials) -> SessionResult<Session> {
        let url = self.http.url("/token", &[("grant_type", "password")])?;
        let req = self
            .http
            .request(Method::POST, url, None)
            .json(&PasswordGrant {
                email: &credentials.email,
                password: &credentials.password,
            });

        let token: TokenResponse = self.http.execute(req).await.map_err(|e| match e {
            SessionError::Rejected {
                status: 400 | 401,
                message,
                ..
            } => SessionError::invalid_credentials(message),
            other => other,
        })?;

        let session = token.into_session(now());
        info!("Signed in as {}", session.identity.id);
        self.transition(AuthEventKind::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> SessionResult<()> {
        let Some(token) = self.access_token() else {
            debug!("Sign out with no session");
            return Ok(());
        };

        let result = match self.http.url("/logout", &[]) {
            Ok(url) => {
                let req = self.http.request(Method::POST, url, Some(&token));
                self.http.execute_empty(req).await
            }
            Err(e) => Err(e),
        };

        // Local state is cleared whatever the server said
        self.transition(AuthEventKind::SignedOut, None);
        result
    }

    async fn sign_up(&self, request: &SignUpRequest) -> SessionResult<Option<Identity>> {
        let url = self.http.url("/signup", &[])?;
        let req = self
            .http
            .request(Method::POST, url, None)
            .json(&SignUpBody {
                email: request.email.trim(),
                password: &request.password,
                data: SignUpData {
                    name: request.name.trim(),
                },
            });

        match self.http.execute::<SignUpResponse>(req).await? {
            SignUpResponse::Session(token) => {
                let session = token.into_session(now());
                let identity = session.identity.clone();
                info!("Signed up and signed in as {}", identity.id);
                self.transition(AuthEventKind::SignedIn, Some(session));
                Ok(Some(identity))
            }
            SignUpResponse::User(user) => {
                info!("Signed up {} (confirmation pending)", user.id);
                Ok(Some(user.into()))
            }
            SignUpResponse::Wrapped { user } => Ok(user.map(Identity::from)),
        }
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
