#![allow(dead_code, unused_imports)]

pub(crate) mod fake_auth;
pub(crate) mod fake_profiles;

pub use fake_auth::*;
pub use fake_profiles::*;

use rw_core::{Identity, Metadata, Session};

pub fn identity(id: &str, name: &str, role: &str) -> Identity {
    let mut metadata = Metadata::new();
    metadata.insert("name", name);
    metadata.insert("role", role);
    Identity::new(id, format!("{id}@example.com"), metadata)
}

pub fn session_for(identity: Identity) -> Session {
    Session::new(format!("token-{}", identity.id), identity)
}
