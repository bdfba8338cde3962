use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque bearer credential returned by the token endpoint.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: BearerToken,
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: BearerToken, username: impl Into<String>) -> Self {
        Self {
            token,
            username: username.into(),
            logged_in_at: Utc::now(),
        }
    }
}

/// Login state machine: `LoggedOut -> LoggedIn -> LoggedOut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn,
}

/// What a single request needs to authenticate itself.
///
/// `epoch` identifies the session the token belongs to; it changes on every
/// login and logout, so a response can be matched to the session that asked
/// for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: BearerToken,
    pub epoch: u64,
}
