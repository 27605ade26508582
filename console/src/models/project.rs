//! Project models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project as returned by the project-listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project ID
    pub id: String,

    /// Display name
    pub name: String,

    /// URL-safe slug
    pub project_slug: String,

    /// Current deployment status
    pub deployment_status: DeploymentStatus,

    /// Deployment type
    pub deployment_type: DeploymentType,

    /// Last deployment timestamp
    #[serde(default)]
    pub last_deployed_at: Option<DateTime<Utc>>,

    /// Environment label
    #[serde(default)]
    pub environment: Option<String>,
}

impl Project {
    /// Public URL the project is served from
    pub fn public_url(&self) -> String {
        format!("https://{}.hostrix.tech", self.project_slug)
    }

    /// Environment label, defaulting to "Production"
    pub fn environment_label(&self) -> &str {
        self.environment.as_deref().unwrap_or("Production")
    }
}

/// Deployment status reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentStatus {
    Success,
    Failed,
    Queued,
    NotStarted,
    InProgress,

    /// Catch-all for status values this client does not recognize
    #[serde(other)]
    Unknown,
}

impl DeploymentStatus {
    /// Badge label shown in the project list
    pub fn label(&self) -> &'static str {
        match self {
            DeploymentStatus::Success => "Deployed",
            DeploymentStatus::InProgress => "Pending",
            DeploymentStatus::Queued => "Queued",
            DeploymentStatus::NotStarted => "Not Started",
            DeploymentStatus::Failed => "Failed",
            DeploymentStatus::Unknown => "Unknown Status",
        }
    }

    /// Sort priority, healthiest first
    pub(crate) fn sort_rank(&self) -> u8 {
        match self {
            DeploymentStatus::Success => 0,
            DeploymentStatus::InProgress => 1,
            DeploymentStatus::Queued => 2,
            DeploymentStatus::NotStarted => 3,
            DeploymentStatus::Failed => 4,
            DeploymentStatus::Unknown => 5,
        }
    }
}

/// Deployment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentType {
    Static,
    Serverless,
    Hybrid,
}

impl DeploymentType {
    /// Wire name, as used in the deployment endpoint path
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentType::Static => "static",
            DeploymentType::Serverless => "serverless",
            DeploymentType::Hybrid => "hybrid",
        }
    }
}

impl std::str::FromStr for DeploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "static" => Ok(DeploymentType::Static),
            "serverless" => Ok(DeploymentType::Serverless),
            "hybrid" => Ok(DeploymentType::Hybrid),
            _ => Err(format!("Invalid deployment type: {}", s)),
        }
    }
}
