//! Deployment models

use serde::{Deserialize, Serialize};

/// An environment variable passed to a deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

/// Configuration submitted when creating a deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    /// Project to deploy
    pub project_id: String,

    /// Commit to deploy
    pub commit_id: String,

    /// Environment variables
    pub env_vars: Vec<EnvVar>,

    /// Build command
    pub build_command: String,

    /// Run command
    pub run_command: String,

    /// Install command
    pub install_command: String,

    /// Send a notification when the deployment finishes
    pub notify_on_deploy: bool,

    /// Address for the completion notification
    pub notification_email: String,
}

/// Response envelope for deployment creation
#[derive(Debug, Clone, Deserialize)]
pub struct DeployResponse {
    pub data: DeployData,
}

/// Payload of a deployment-creation response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployData {
    /// Backend-assigned deployment ID
    pub deployment_id: String,
}
