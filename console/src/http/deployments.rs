//! Deployment API client

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::ConsoleError;
use crate::http::client::HttpClient;
use crate::models::deployment::{DeployRequest, DeployResponse};
use crate::models::log_event::LogEvent;
use crate::models::project::DeploymentType;

/// Log listing response
#[derive(Debug, Clone, Deserialize)]
pub struct LogListResponse {
    pub logs: Vec<LogEvent>,
}

/// Access to the deployment endpoints
#[async_trait]
pub trait DeploymentsApi: Send + Sync {
    /// Create a deployment and return its backend-assigned ID
    async fn create_deployment(
        &self,
        deployment_type: DeploymentType,
        request: &DeployRequest,
    ) -> Result<String, ConsoleError>;

    /// Fetch the full log sequence for a deployment
    async fn get_deployment_logs(
        &self,
        deployment_id: &str,
    ) -> Result<Vec<LogEvent>, ConsoleError>;
}

#[async_trait]
impl DeploymentsApi for HttpClient {
    async fn create_deployment(
        &self,
        deployment_type: DeploymentType,
        request: &DeployRequest,
    ) -> Result<String, ConsoleError> {
        let path = format!("/api/v1/deployments/{}", deployment_type.as_str());
        let response: DeployResponse = self.post(&path, request).await?;
        Ok(response.data.deployment_id)
    }

    async fn get_deployment_logs(
        &self,
        deployment_id: &str,
    ) -> Result<Vec<LogEvent>, ConsoleError> {
        let path = format!("/api/v1/logs/{}", deployment_id);
        let response: LogListResponse = self.get(&path).await?;
        Ok(response.logs)
    }
}
