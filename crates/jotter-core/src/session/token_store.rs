//! Token store trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::model::Session;

/// Persistence for the current session.
///
/// The session manager writes through to the store on every login and logout,
/// so the stored value never disagrees with the live session.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Loads the stored session, `None` if nothing is stored.
    async fn load(&self) -> Result<Option<Session>>;

    /// Replaces the stored session.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Removes the stored session. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<()>;
}
