//! Unified path management for jotter files.
//!
//! ```text
//! ~/.config/jotter/            # Config directory (platform config dir)
//! ├── config.toml              # Client configuration
//! └── session.json             # Persisted session token (mode 600)
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "jotter";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for jotter_core::JotterError {
    fn from(err: PathError) -> Self {
        jotter_core::JotterError::config(err.to_string())
    }
}

pub struct JotterPaths;

impl JotterPaths {
    /// Returns the jotter configuration directory (e.g. `~/.config/jotter/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session.
    ///
    /// # Security Note
    ///
    /// The file holds a live bearer token. Writers must restrict it to the
    /// current user.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_in_config_dir() {
        // Not every CI environment has a home directory.
        let Ok(dir) = JotterPaths::config_dir() else {
            return;
        };
        assert!(dir.ends_with(APP_DIR));
        assert_eq!(JotterPaths::config_file().unwrap(), dir.join("config.toml"));
        assert_eq!(JotterPaths::session_file().unwrap(), dir.join("session.json"));
    }
}
