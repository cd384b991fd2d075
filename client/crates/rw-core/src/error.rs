use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error on '{field}': {message} {location}")]
    Validation {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid role: {value} {location}")]
    InvalidRole {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid auth event kind: {value} {location}")]
    InvalidAuthEventKind {
        value: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Field the error refers to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::InvalidRole { .. } => Some("role"),
            Self::InvalidAuthEventKind { .. } => None,
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
