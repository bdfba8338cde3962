//! Session token persistence in `session.json`.

use crate::paths::JotterPaths;
use async_trait::async_trait;
use jotter_core::error::{JotterError, Result};
use jotter_core::session::{Session, TokenStore};
use std::path::{Path, PathBuf};

/// Stores the current session as JSON on disk.
///
/// Responsibilities:
/// - Load `session.json`; a missing or empty file means "no session"
/// - Write atomically (tmp file + rename), mode 600 on Unix
/// - Delete the file on clear
///
/// Does NOT:
/// - Validate or refresh the token
/// - Encrypt anything (plaintext JSON)
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store at the default path (`~/.config/jotter/session.json`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: JotterPaths::session_file()?,
        })
    }

    /// Creates a store with a custom path (for testing).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| JotterError::storage(format!("Invalid session path {:?}", self.path)))?;
        let mut tmp_name = file_name.to_os_string();
        tmp_name.push(".tmp");
        Ok(self.path.with_file_name(tmp_name))
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<Session>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(session)?;
        let tmp_path = self.temp_path()?;
        tokio::fs::write(&tmp_path, json).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&tmp_path, permissions).await?;
        }

        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
