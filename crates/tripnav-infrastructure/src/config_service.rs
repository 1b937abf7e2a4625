//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the application
//! configuration from `config.toml`.

use crate::paths::{ServiceType, TripnavPaths};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use tripnav_core::config::AppConfig;
use tripnav_core::error::Result;

use crate::storage::AtomicTomlFile;

/// Configuration service that loads and caches the application configuration.
///
/// A missing file is not an error: defaults are used. A file that exists but
/// cannot be parsed is logged and also falls back to defaults, so a typo in
/// the config never prevents the client from starting.
#[derive(Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService reading from the platform config directory.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a ConfigService reading from an explicit file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> AppConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = match self.load_config() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("[ConfigService] Using default configuration: {}", e);
                AppConfig::default()
            }
        };

        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    fn load_config(&self) -> Result<AppConfig> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => TripnavPaths::get_path(ServiceType::Config)?,
        };

        let config = AtomicTomlFile::<AppConfig>::new(path.clone())
            .load()?
            .unwrap_or_default();

        tracing::debug!("[ConfigService] Loaded configuration from {}", path.display());
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
