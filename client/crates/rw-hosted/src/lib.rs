//! HTTP implementations of the session collaborators.
//!
//! [`HostedAuthClient`] speaks the GoTrue auth API under `<url>/auth/v1`,
//! [`HostedProfileStore`] the PostgREST API under `<url>/rest/v1`.
//! Sessions can be persisted across runs with [`SessionFile`].

mod auth_client;
mod http;
mod listener_registry;
mod profile_store;
mod session_file;
mod wire;


pub use auth_client::HostedAuthClient;
pub use listener_registry::HostedSubscription;
pub use profile_store::HostedProfileStore;
pub use session_file::SessionFile;

pub const AUTH_PATH: &str = "/auth/v1";
pub const REST_PATH: &str = "/rest/v1";
