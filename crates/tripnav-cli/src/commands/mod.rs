pub mod asset;
pub mod link;
pub mod session;

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tripnav_core::config::AppConfig;
use tripnav_infrastructure::ConfigService;
use tripnav_infrastructure::paths::{ServiceType, TripnavPaths};

/// Resolved file locations and configuration shared by all commands.
pub struct Context {
    pub config: AppConfig,
    pub session_path: PathBuf,
}

impl Context {
    pub fn new(config_dir: Option<PathBuf>) -> Result<Self> {
        let (config_path, session_path) = match config_dir {
            Some(dir) => (dir.join("config.toml"), dir.join("session.toml")),
            None => (
                TripnavPaths::get_path(ServiceType::Config)
                    .context("Failed to resolve config path")?,
                TripnavPaths::get_path(ServiceType::Session)
                    .context("Failed to resolve session path")?,
            ),
        };

        let config = ConfigService::with_path(config_path).get_config();
        Ok(Self {
            config,
            session_path,
        })
    }
}
