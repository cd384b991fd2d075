use std::panic::Location;

use error_location::ErrorLocation;
use rw_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid credentials: {message} {location}")]
    InvalidCredentials {
        message: String,
        location: ErrorLocation,
    },

    #[error("Auth service unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Request rejected ({status} {code}): {message} {location}")]
    Rejected {
        status: u16,
        code: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Malformed response: {message} {location}")]
    Malformed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Validation failed: {source} {location}")]
    Validation {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("Superseded: {message} {location}")]
    Superseded {
        message: String,
        location: ErrorLocation,
    },

    #[error("No async runtime: {message} {location}")]
    Runtime {
        message: String,
        location: ErrorLocation,
    },
}

impl SessionError {
    #[track_caller]
    pub fn invalid_credentials<S: Into<String>>(message: S) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::Unavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn rejected<C: Into<String>, S: Into<String>>(status: u16, code: C, message: S) -> Self {
        Self::Rejected {
            status,
            code: code.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::Malformed {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn superseded<S: Into<String>>(message: S) -> Self {
        Self::Superseded {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Stable code for UI display and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::Unavailable { .. } => "AUTH_UNAVAILABLE",
            Self::Rejected { .. } => "REQUEST_REJECTED",
            Self::Malformed { .. } => "MALFORMED_RESPONSE",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Superseded { .. } => "SUPERSEDED",
            Self::Runtime { .. } => "NO_RUNTIME",
        }
    }

    /// True for errors the user can fix by re-entering credentials
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. } | Self::Validation { .. }
        )
    }
}

impl From<CoreError> for SessionError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Validation {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
