use async_trait::async_trait;
use jotter_core::error::Result;
use jotter_core::session::{Session, TokenStore};
use tokio::sync::Mutex;

/// Keeps the session in memory only; it is gone when the process exits.
///
/// Used when `persist_session` is off, and in tests.
#[derive(Default)]
pub struct InMemoryTokenStore {
    session: Mutex<Option<Session>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `session` already stored.
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.session.lock().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        *self.session.lock().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.session.lock().await = None;
        Ok(())
    }
}
