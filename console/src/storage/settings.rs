//! Settings file management

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConsoleError;
use crate::logs::LogLevel;

/// Console settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Backend configuration
    #[serde(default)]
    pub backend: BackendSettings,

    /// Log polling interval in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Delay between deployment completion and the dashboard redirect,
    /// in seconds
    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_secs: u64,

    /// Project cache freshness window in seconds
    #[serde(default = "default_freshness_window")]
    pub cache_freshness_secs: u64,
}

fn default_poll_interval() -> u64 {
    2
}

fn default_redirect_delay() -> u64 {
    10
}

fn default_freshness_window() -> u64 {
    300
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            backend: BackendSettings::default(),
            poll_interval_secs: default_poll_interval(),
            redirect_delay_secs: default_redirect_delay(),
            cache_freshness_secs: default_freshness_window(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub async fn load(path: &Path) -> Result<Self, ConsoleError> {
        let contents = tokio::fs::read_to_string(path).await?;
        let settings = serde_json::from_str(&contents)?;
        Ok(settings)
    }
}

/// Backend API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL for the backend API
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    /// Optional bearer token attached to backend requests
    #[serde(default)]
    pub auth_token: Option<String>,
}

fn default_backend_url() -> String {
    "https://hostrix.tech".to_string()
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            auth_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let settings: Settings = serde_json::from_str("{}").unwrap();

        assert_eq!(settings.log_level, LogLevel::Info);
        assert_eq!(settings.backend.base_url, "https://hostrix.tech");
        assert_eq!(settings.poll_interval_secs, 2);
        assert_eq!(settings.redirect_delay_secs, 10);
        assert_eq!(settings.cache_freshness_secs, 300);
    }

    #[test]
    fn test_partial_override() {
        let settings: Settings = serde_json::from_str(
            r#"{ "log_level": "debug", "backend": { "base_url": "http://localhost:9000" } }"#,
        )
        .unwrap();

        assert_eq!(settings.log_level, LogLevel::Debug);
        assert_eq!(settings.backend.base_url, "http://localhost:9000");
        assert_eq!(settings.poll_interval_secs, 2);
    }
}
