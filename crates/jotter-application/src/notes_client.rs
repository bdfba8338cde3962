//! Notes client use case.
//!
//! `NotesClient` wires a [`SessionManager`] and a [`NoteListController`] to the
//! same backend and keeps them consistent: a login or restore loads the list,
//! a logout empties it.

use crate::note_list_controller::NoteListController;
use crate::session_manager::SessionManager;
use jotter_core::api::{NotesApi, UserId};
use jotter_core::error::{AuthError, RegisterError, Result};
use jotter_core::session::{Session, TokenStore};
use std::sync::Arc;

/// Entry point for front ends.
///
/// # Responsibilities
///
/// - Logging in and loading the note list for the new session
/// - Restoring a stored session at startup
/// - Discarding cached notes, draft and query on logout
///
/// Note operations go through [`NotesClient::notes`].
pub struct NotesClient {
    session: Arc<SessionManager>,
    notes: Arc<NoteListController>,
}

impl NotesClient {
    /// Creates a client talking to `api`, persisting sessions to `token_store`.
    pub fn new(api: Arc<dyn NotesApi>, token_store: Arc<dyn TokenStore>) -> Self {
        let session = Arc::new(SessionManager::new(api.clone(), token_store));
        let notes = Arc::new(NoteListController::new(api, session.clone()));
        Self { session, notes }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub fn notes(&self) -> &Arc<NoteListController> {
        &self.notes
    }

    /// Logs in, then loads the note list.
    ///
    /// Local note state from a previous session is discarded first. A failed
    /// initial fetch is logged but does not fail the login.
    pub async fn login(&self, username: &str, password: &str) -> std::result::Result<Session, AuthError> {
        let session = self.session.login(username, password).await?;
        self.notes.clear().await;
        let _ = self.notes.fetch_all().await;
        Ok(session)
    }

    /// Logs out and drops every cached note.
    pub async fn logout(&self) {
        self.session.logout().await;
        self.notes.clear().await;
    }

    /// Reactivates a stored session and loads its notes.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be read. A stored token the
    /// backend no longer accepts is not an error here; it surfaces as a failed
    /// fetch.
    pub async fn restore(&self) -> Result<Option<Session>> {
        let restored = self.session.restore().await?;
        if restored.is_some() {
            self.notes.clear().await;
            let _ = self.notes.fetch_all().await;
        }
        Ok(restored)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> std::result::Result<UserId, RegisterError> {
        self.session.register(username, email, password).await
    }
}
