//! Console configuration options

use std::time::Duration;

use crate::cache::projects;
use crate::monitor::worker;
use crate::storage::layout::StorageLayout;
use crate::storage::settings::Settings;

/// Main console options
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    /// Backend API base URL
    pub backend_base_url: String,

    /// Optional bearer token for backend requests
    pub auth_token: Option<String>,

    /// Storage layout
    pub storage: StorageLayout,

    /// Monitor poll worker options
    pub monitor: worker::Options,

    /// Project cache options
    pub cache: projects::Options,
}

impl ConsoleOptions {
    /// Build options from a settings file
    pub fn from_settings(settings: &Settings, storage: StorageLayout) -> Self {
        Self {
            backend_base_url: settings.backend.base_url.clone(),
            auth_token: settings.backend.auth_token.clone(),
            storage,
            monitor: worker::Options {
                poll_interval: Duration::from_secs(settings.poll_interval_secs),
                redirect_delay: Duration::from_secs(settings.redirect_delay_secs),
            },
            cache: projects::Options {
                freshness_window: Duration::from_secs(settings.cache_freshness_secs),
            },
        }
    }
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            backend_base_url: "https://hostrix.tech".to_string(),
            auth_token: None,
            storage: StorageLayout::default(),
            monitor: worker::Options::default(),
            cache: projects::Options::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_maps_durations() {
        let mut settings = Settings::default();
        settings.poll_interval_secs = 5;
        settings.redirect_delay_secs = 20;
        settings.cache_freshness_secs = 60;

        let options = ConsoleOptions::from_settings(&settings, StorageLayout::new("/tmp/hx"));

        assert_eq!(options.monitor.poll_interval, Duration::from_secs(5));
        assert_eq!(options.monitor.redirect_delay, Duration::from_secs(20));
        assert_eq!(options.cache.freshness_window, Duration::from_secs(60));
    }
}
