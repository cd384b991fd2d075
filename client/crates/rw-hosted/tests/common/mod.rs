#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use rw_config::Config;
use rw_core::{AuthEventKind, Identity, Metadata, Session};
use rw_session::AuthListener;
use serde_json::{Value, json};

pub const ANON_KEY: &str = "test-anon-key";

pub fn config(uri: &str) -> Config {
    let mut config = Config::default();
    config.hosted.url = uri.to_string();
    config.hosted.anon_key = ANON_KEY.to_string();
    config.session.persist = false;
    config
}

pub fn user_json(id: &str, name: &str, role: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{id}@example.com"),
        "user_metadata": {"name": name, "role": role}
    })
}

pub fn token_json(id: &str, name: &str, role: &str) -> Value {
    json!({
        "access_token": format!("access-{id}"),
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": format!("refresh-{id}"),
        "user": user_json(id, name, role)
    })
}

pub fn stored_session(id: &str, expires_at: i64) -> Session {
    let mut metadata = Metadata::new();
    metadata.insert("name", "Stored");
    metadata.insert("role", "citizen");
    let mut session = Session::new(
        format!("stored-access-{id}"),
        Identity::new(id, format!("{id}@example.com"), metadata),
    );
    session.refresh_token = Some(format!("stored-refresh-{id}"));
    session.expires_at = Some(expires_at);
    session
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Listener that records every event kind it receives
pub fn recorder() -> (AuthListener, Arc<Mutex<Vec<AuthEventKind>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let listener: AuthListener = Arc::new(move |kind, _| sink.lock().unwrap().push(kind));
    (listener, events)
}
