//! Unified path management for tripnav files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/tripnav/           # Config directory (platform default)
//! ├── config.toml              # Application configuration
//! └── session.toml             # Persisted session preferences
//! ```
//!
//! Setting `TRIPNAV_CONFIG_DIR` overrides the base directory.

use std::path::PathBuf;
use tripnav_core::error::{Result, TripError};

const APP_DIR_NAME: &str = "tripnav";
const CONFIG_DIR_ENV: &str = "TRIPNAV_CONFIG_DIR";

/// Kinds of files managed under the config directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Config,
    Session,
}

impl ServiceType {
    fn file_name(self) -> &'static str {
        match self {
            ServiceType::Config => "config.toml",
            ServiceType::Session => "session.toml",
        }
    }
}

pub struct TripnavPaths;

impl TripnavPaths {
    /// Returns the tripnav configuration directory.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error when the platform has no config directory and
    /// no override is set.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| TripError::config("Cannot find config directory"))
    }

    /// Returns the full path of a managed file.
    pub fn get_path(service: ServiceType) -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(service.file_name()))
    }
}
