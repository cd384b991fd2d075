pub mod access;
pub mod auth_event_kind;
pub mod credentials;
pub mod identity;
pub mod metadata;
pub mod new_profile;
pub mod profile;
pub mod role;
pub mod session;
pub mod sign_up_request;
