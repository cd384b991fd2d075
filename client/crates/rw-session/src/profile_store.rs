use crate::SessionResult;

use async_trait::async_trait;
use rw_core::{NewProfile, Profile};

/// Remote record store holding display name and role per identity id
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Point lookup by identity id; `None` when no row exists
    async fn fetch_profile(&self, id: &str) -> SessionResult<Option<Profile>>;

    /// Insert the profile row created at registration
    async fn create_profile(&self, profile: &NewProfile) -> SessionResult<()>;
}
