//! Request and response bodies for the hosted auth API

use rw_core::{Identity, Metadata, Session};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize)]
pub(crate) struct PasswordGrant<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct RefreshGrant<'a> {
    pub refresh_token: &'a str,
}

#[derive(Serialize)]
pub(crate) struct SignUpBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub data: SignUpData<'a>,
}

#[derive(Serialize)]
pub(crate) struct SignUpData<'a> {
    pub name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserResponse {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Metadata,
}

impl From<UserResponse> for Identity {
    fn from(user: UserResponse) -> Self {
        Identity::new(user.id, user.email.unwrap_or_default(), user.user_metadata)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: UserResponse,
}

impl TokenResponse {
    /// `expires_at` wins over `expires_in` when both are present
    pub(crate) fn into_session(self, now: i64) -> Session {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now + secs));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            identity: self.user.into(),
        }
    }
}

/// Sign-up answers with a session when e-mail confirmation is off,
/// otherwise with the bare user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SignUpResponse {
    Session(TokenResponse),
    User(UserResponse),
    Wrapped { user: Option<UserResponse> },
}

/// Union of the error shapes the auth and REST APIs return
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    msg: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
    error_code: Option<String>,
    /// String on auth errors, sometimes an object elsewhere
    error: Option<Value>,
    /// Numeric status on auth errors, SQLSTATE string on REST errors
    code: Option<Value>,
}

impl ErrorBody {
    pub(crate) fn message(&self) -> Option<&str> {
        self.msg
            .as_deref()
            .or(self.error_description.as_deref())
            .or(self.message.as_deref())
    }

    pub(crate) fn code(&self) -> Option<&str> {
        self.error_code
            .as_deref()
            .or(self.error.as_ref().and_then(Value::as_str))
            .or(self.code.as_ref().and_then(Value::as_str))
    }
}
