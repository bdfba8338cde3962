//! Infrastructure layer for Jotter: file locations, configuration loading and
//! session persistence.

pub mod config_service;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::JotterPaths;
pub use crate::storage::{FileTokenStore, InMemoryTokenStore};
