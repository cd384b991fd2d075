use crate::models::credentials::{validate_email, validate_password};
use crate::{CoreError, CoreResult, Credentials, Role};

use std::panic::Location;

use error_location::ErrorLocation;

/// Everything needed to create an account and its profile row
#[derive(Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

impl SignUpRequest {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
            role,
        }
    }

    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation {
                field: "name",
                message: "name cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}

impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("role", &self.role)
            .finish()
    }
}
