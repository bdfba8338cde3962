use jotter_core::api::{NotesApi, Registration, UserId};
use jotter_core::error::{ApiError, AuthError, RegisterError, Result};
use jotter_core::session::{Credentials, Session, SessionState, TokenStore};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

#[derive(Default)]
struct SessionSlot {
    session: Option<Session>,
    /// Bumped on every login, logout and restore.
    epoch: u64,
}

/// Owns the authentication token lifecycle.
///
/// `SessionManager` is responsible for:
/// - Exchanging credentials for a bearer token
/// - Handing the token out per request via [`SessionManager::credentials`]
/// - Writing the session through to the [`TokenStore`] on login and logout
/// - Restoring a stored session on startup
///
/// State machine: `LoggedOut -> LoggedIn -> LoggedOut`, starting `LoggedOut`.
/// There is no refresh or expiry handling; a dead token shows up as
/// [`ApiError::Unauthorized`] on the next call.
///
/// Login, logout and restore run one at a time, each covering both the
/// in-memory session and the token store, so the store always ends up
/// matching the last transition.
pub struct SessionManager {
    api: Arc<dyn NotesApi>,
    token_store: Arc<dyn TokenStore>,
    slot: RwLock<SessionSlot>,
    transition: Mutex<()>,
}

impl SessionManager {
    pub fn new(api: Arc<dyn NotesApi>, token_store: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            token_store,
            slot: RwLock::new(SessionSlot::default()),
            transition: Mutex::new(()),
        }
    }

    /// Logs in and makes the returned token the active credential.
    ///
    /// On failure nothing changes: no token is stored and an existing session
    /// stays active. The error never says whether the backend or the network
    /// was at fault.
    pub async fn login(&self, username: &str, password: &str) -> std::result::Result<Session, AuthError> {
        let token = match self.api.login(username, password).await {
            Ok(token) => token,
            Err(cause) => {
                tracing::warn!("[Session] Login failed for {}: {}", username, cause.payload());
                return Err(AuthError::from(cause));
            }
        };

        let session = Session::new(token, username);
        let _transition = self.transition.lock().await;
        {
            let mut slot = self.slot.write().await;
            slot.session = Some(session.clone());
            slot.epoch += 1;
        }

        if let Err(e) = self.token_store.save(&session).await {
            tracing::warn!("[Session] Failed to persist session: {}", e);
        }

        tracing::info!("[Session] Logged in as {}", username);
        Ok(session)
    }

    /// Drops the active session and the stored token.
    ///
    /// Callers holding data fetched under the session must discard it.
    pub async fn logout(&self) {
        let _transition = self.transition.lock().await;
        let previous = {
            let mut slot = self.slot.write().await;
            slot.epoch += 1;
            slot.session.take()
        };

        if let Err(e) = self.token_store.clear().await {
            tracing::warn!("[Session] Failed to clear stored session: {}", e);
        }

        match previous {
            Some(session) => tracing::info!("[Session] Logged out {}", session.username),
            None => tracing::debug!("[Session] Logout without an active session"),
        }
    }

    /// Reactivates the session found in the token store, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn restore(&self) -> Result<Option<Session>> {
        let _transition = self.transition.lock().await;
        let Some(session) = self.token_store.load().await? else {
            return Ok(None);
        };

        {
            let mut slot = self.slot.write().await;
            slot.session = Some(session.clone());
            slot.epoch += 1;
        }

        tracing::info!("[Session] Restored session for {}", session.username);
        Ok(Some(session))
    }

    /// Creates an account. Does not log in.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> std::result::Result<UserId, RegisterError> {
        let registration = Registration::new(username, email, password);
        match self.api.register(&registration).await {
            Ok(user_id) => {
                tracing::info!("[Session] Registered {} (user id {})", username, user_id);
                Ok(user_id)
            }
            Err(e) => {
                tracing::error!("[Session] Error registering {}: {}", username, e.payload());
                Err(RegisterError(e))
            }
        }
    }

    /// Token and epoch for one outgoing request.
    pub async fn credentials(&self) -> std::result::Result<Credentials, ApiError> {
        let slot = self.slot.read().await;
        slot.session
            .as_ref()
            .map(|session| Credentials {
                token: session.token.clone(),
                epoch: slot.epoch,
            })
            .ok_or(ApiError::NotAuthenticated)
    }

    pub async fn state(&self) -> SessionState {
        if self.slot.read().await.session.is_some() {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }

    pub async fn is_logged_in(&self) -> bool {
        self.state().await == SessionState::LoggedIn
    }

    pub async fn current_session(&self) -> Option<Session> {
        self.slot.read().await.session.clone()
    }

    /// Current session epoch.
    pub async fn epoch(&self) -> u64 {
        self.slot.read().await.epoch
    }
}
