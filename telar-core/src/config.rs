//! Configuration management.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, TelarError};
use crate::paths;
use crate::types::Platform;

/// Persistent configuration.
///
/// Loaded from `config.json` in the data directory; the
/// `TELAR_API_URL` and `TELAR_TOKEN` environment variables override
/// the file for one-off runs. Unknown fields are tolerated and missing
/// ones fall back to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the provisioning service
    pub api_url: String,

    /// Bearer token sent with every provisioning request
    pub token: Option<String>,

    /// Platform new editing sessions start on
    pub platform: Platform,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8001".to_string(),
            token: None,
            platform: Platform::default(),
        }
    }
}

impl Config {
    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        paths::config_path()
    }

    /// Load configuration from disk, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        let mut config = if path.exists() {
            let content =
                std::fs::read_to_string(&path).map_err(|e| TelarError::InvalidConfig {
                    reason: format!("failed to read config: {e}"),
                })?;
            serde_json::from_str(&content).map_err(|e| TelarError::InvalidConfig {
                reason: format!("failed to parse config: {e}"),
            })?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("TELAR_API_URL") {
            config.api_url = url;
        }
        if let Ok(token) = std::env::var("TELAR_TOKEN") {
            config.token = Some(token);
        }
        Ok(config)
    }

    /// Save configuration to disk as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TelarError::io(parent, e))?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|e| TelarError::InvalidConfig {
            reason: format!("failed to serialize config: {e}"),
        })?;
        std::fs::write(&path, content).map_err(|e| TelarError::io(&path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8001");
        assert!(config.token.is_none());
        assert_eq!(config.platform, Platform::Linux);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"token": "abc123"}"#).unwrap();
        assert_eq!(config.token.as_deref(), Some("abc123"));
        assert_eq!(config.api_url, "http://localhost:8001");
        assert_eq!(config.platform, Platform::Linux);
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config {
            api_url: "https://provisioner.example.edu".into(),
            token: Some("tok".into()),
            platform: Platform::Openstack,
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.api_url, config.api_url);
        assert_eq!(back.token, config.token);
        assert_eq!(back.platform, config.platform);
    }
}
