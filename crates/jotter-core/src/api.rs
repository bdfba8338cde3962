//! Backend API trait.
//!
//! The notes backend is an external collaborator. Components depend on this
//! trait so that transports can be swapped (HTTP in production, in-memory
//! mocks in tests).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::note::{Note, NoteDraft, NoteId};
use crate::session::BearerToken;

/// Body of the user registration call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_active: bool,
}

impl Registration {
    /// A registration for an account that is active immediately.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            is_active: true,
        }
    }
}

/// Backend-assigned user identifier.
pub type UserId = i64;

/// The REST operations the client consumes.
///
/// Authenticated calls take the bearer token explicitly; implementations must
/// not keep credentials of their own between calls.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Creates a user account.
    async fn register(&self, registration: &Registration) -> Result<UserId, ApiError>;

    /// Exchanges username and password for a bearer token.
    async fn login(&self, username: &str, password: &str) -> Result<BearerToken, ApiError>;

    /// Returns every note visible to the token, in backend order.
    async fn list_notes(&self, token: &BearerToken) -> Result<Vec<Note>, ApiError>;

    async fn create_note(&self, token: &BearerToken, draft: &NoteDraft) -> Result<(), ApiError>;

    /// Replaces title and content of the note at `id`.
    async fn update_note(
        &self,
        token: &BearerToken,
        id: &NoteId,
        draft: &NoteDraft,
    ) -> Result<(), ApiError>;

    async fn delete_note(&self, token: &BearerToken, id: &NoteId) -> Result<(), ApiError>;
}
