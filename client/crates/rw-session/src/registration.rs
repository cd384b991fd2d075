use crate::{AuthProvider, ProfileStore, SessionError, SessionResult};

use log::{info, warn};
use rw_core::{Identity, NewProfile, SignUpRequest};

/// Create an account, then persist its profile row with the chosen role.
///
/// Session state is not touched here: if the provider issues a session at
/// sign-up it reaches `SessionSync` through the change listener.
pub async fn register(
    auth: &dyn AuthProvider,
    profiles: &dyn ProfileStore,
    request: &SignUpRequest,
) -> SessionResult<Identity> {
    request.validate()?;

    let identity = match auth.sign_up(request).await {
        Ok(Some(identity)) => identity,
        Ok(None) => {
            warn!("Sign up for {} returned no user", request.email);
            return Err(SessionError::rejected(
                200,
                "no_user",
                "sign-up returned no user",
            ));
        }
        Err(e) => {
            warn!("Sign up error: {e}");
            return Err(e);
        }
    };

    let profile = NewProfile::from_sign_up(&identity, request);
    if let Err(e) = profiles.create_profile(&profile).await {
        warn!("Profile insert for {} failed: {e}", identity.id);
        return Err(e);
    }

    info!("Registered {} as {}", identity.id, profile.role);
    Ok(identity)
}
