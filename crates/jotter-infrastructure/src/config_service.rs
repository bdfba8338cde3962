//! Configuration loading.
//!
//! Resolution order, later wins: built-in defaults, `config.toml`, then
//! `JOTTER_*` environment variables. Command-line flags are applied on top by
//! the CLI.

use crate::paths::JotterPaths;
use jotter_core::ClientConfig;
use jotter_core::error::{JotterError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_BASE_URL: &str = "JOTTER_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "JOTTER_TIMEOUT_SECS";
pub const ENV_PERSIST_SESSION: &str = "JOTTER_PERSIST_SESSION";

/// Loads [`ClientConfig`] from a TOML file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the default path (`~/.config/jotter/config.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: JotterPaths::config_file()?,
        })
    }

    /// Uses a custom path (CLI `--config`, tests).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file layer only.
    ///
    /// A missing or empty file yields the defaults; a file that exists but
    /// does not parse is a configuration error.
    pub fn load_file(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            tracing::debug!("[Config] No config file at {:?}, using defaults", self.path);
            return Ok(ClientConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }

        toml::from_str(&content).map_err(|e| {
            JotterError::config(format!("Failed to parse {:?}: {}", self.path, e))
        })
    }

    /// Reads the file layer, then applies the process environment.
    pub fn load(&self) -> Result<ClientConfig> {
        let config = self.load_file()?;
        apply_env_overrides(config, |key| std::env::var(key).ok())
    }
}

/// Applies `JOTTER_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(ENV_BASE_URL) {
        config.base_url = base_url;
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        config.request_timeout_secs = raw.trim().parse().map_err(|_| {
            JotterError::config(format!("{} must be a number of seconds, got {:?}", ENV_TIMEOUT_SECS, raw))
        })?;
    }

    if let Some(raw) = lookup(ENV_PERSIST_SESSION) {
        config.persist_session = parse_bool(&raw).ok_or_else(|| {
            JotterError::config(format!("{} must be true or false, got {:?}", ENV_PERSIST_SESSION, raw))
        })?;
    }

    Ok(config)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(service.load_file().unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_load_file_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "base_url = \"https://notes.example\"\nrequest_timeout_secs = 5\npersist_session = false\n",
        )
        .unwrap();

        let config = ConfigService::with_path(&path).load_file().unwrap();
        assert_eq!(config.base_url, "https://notes.example");
        assert_eq!(config.request_timeout_secs, 5);
        assert!(!config.persist_session);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "base_url = [").unwrap();

        let err = ConfigService::with_path(&path).load_file().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_env_overrides_file() {
        let config = apply_env_overrides(
            ClientConfig::default(),
            env(&[
                (ENV_BASE_URL, "http://10.0.0.2:9000"),
                (ENV_TIMEOUT_SECS, "12"),
                (ENV_PERSIST_SESSION, "off"),
            ]),
        )
        .unwrap();

        assert_eq!(config.base_url, "http://10.0.0.2:9000");
        assert_eq!(config.request_timeout_secs, 12);
        assert!(!config.persist_session);
    }

    #[test]
    fn test_bad_env_value_is_rejected() {
        let err = apply_env_overrides(ClientConfig::default(), env(&[(ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(err.is_config());

        let err = apply_env_overrides(ClientConfig::default(), env(&[(ENV_PERSIST_SESSION, "maybe")]))
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_no_env_keeps_config() {
        let config = apply_env_overrides(ClientConfig::default(), env(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
