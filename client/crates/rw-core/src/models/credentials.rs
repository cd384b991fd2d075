use crate::{CoreError, CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::Serialize;

/// Email/password pair for password sign-in
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[track_caller]
pub(crate) fn validate_email(email: &str) -> CoreResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CoreError::Validation {
            field: "email",
            message: "email cannot be empty".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    if !email.contains('@') {
        return Err(CoreError::Validation {
            field: "email",
            message: format!("'{email}' is not an email address"),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(())
}

#[track_caller]
pub(crate) fn validate_password(password: &str) -> CoreResult<()> {
    if password.is_empty() {
        return Err(CoreError::Validation {
            field: "password",
            message: "password cannot be empty".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(())
}
