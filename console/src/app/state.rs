//! Shared console state

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

use crate::app::options::ConsoleOptions;
use crate::cache::projects::ProjectListCache;
use crate::errors::ConsoleError;
use crate::http::client::HttpClient;
use crate::monitor::session::MonitorNotice;
use crate::monitor::DeploymentMonitor;

/// Main console state
///
/// Owns the HTTP client and hands out the per-view components: the
/// project list cache for the dashboard and a deployment monitor per
/// deploy view.
pub struct Console {
    options: ConsoleOptions,
    http_client: Arc<HttpClient>,
}

impl Console {
    /// Initialize the console: validate the backend configuration and
    /// create the storage layout
    pub async fn init(options: ConsoleOptions) -> Result<Self, ConsoleError> {
        info!("Initializing console...");

        let http_client = match &options.auth_token {
            Some(token) => HttpClient::with_token(&options.backend_base_url, token.clone())?,
            None => HttpClient::new(&options.backend_base_url)?,
        };

        options.storage.setup().await?;

        Ok(Self {
            options,
            http_client: Arc::new(http_client),
        })
    }

    /// Get the HTTP client
    pub fn http_client(&self) -> Arc<HttpClient> {
        self.http_client.clone()
    }

    /// Create the project list cache backing the dashboard view
    pub fn project_cache(&self) -> ProjectListCache {
        ProjectListCache::new(
            self.options.storage.kv_store(),
            self.http_client.clone(),
            self.options.cache.clone(),
        )
    }

    /// Create a monitor for one deploy view
    pub fn deployment_monitor(
        &self,
    ) -> (DeploymentMonitor, UnboundedReceiver<MonitorNotice>) {
        DeploymentMonitor::new(self.http_client.clone(), self.options.monitor.clone())
    }
}
