//! Application configuration model.
//!
//! Loaded from `config.toml`; every field has a default so a missing or
//! partial file is valid.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub deep_link: DeepLinkConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub assets: AssetConfig,
}

/// Shape of the join link, e.g. `myapp://trip/join?tripId=42`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DeepLinkConfig {
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub trip_id_param: String,
}

impl Default for DeepLinkConfig {
    fn default() -> Self {
        Self {
            scheme: "myapp".to_string(),
            host: "trip".to_string(),
            path: "/join".to_string(),
            trip_id_param: "tripId".to_string(),
        }
    }
}

/// Timeouts for calls to remote collaborators.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkConfig {
    pub join_timeout_secs: u64,
    pub delete_timeout_secs: u64,
    pub upload_timeout_secs: u64,
}

impl NetworkConfig {
    pub fn join_timeout(&self) -> Duration {
        Duration::from_secs(self.join_timeout_secs)
    }

    pub fn delete_timeout(&self) -> Duration {
        Duration::from_secs(self.delete_timeout_secs)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            join_timeout_secs: 15,
            delete_timeout_secs: 15,
            upload_timeout_secs: 60,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AssetConfig {
    /// Path segment that precedes the storage identifier in asset URLs.
    pub upload_marker: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            upload_marker: "upload".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.deep_link.scheme, "myapp");
        assert_eq!(config.network.upload_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [deep_link]
            scheme = "tripapp"

            [network]
            join_timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.deep_link.scheme, "tripapp");
        assert_eq!(config.deep_link.host, "trip");
        assert_eq!(config.network.join_timeout_secs, 5);
        assert_eq!(config.network.delete_timeout_secs, 15);
        assert_eq!(config.assets.upload_marker, "upload");
    }
}
