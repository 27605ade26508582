//! Project listing API client

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::ConsoleError;
use crate::http::client::HttpClient;
use crate::models::project::Project;

/// Project list response
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
}

/// Access to the project-listing endpoint
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    /// Fetch every project visible to the current user
    async fn get_projects(&self) -> Result<Vec<Project>, ConsoleError>;
}

#[async_trait]
impl ProjectsApi for HttpClient {
    async fn get_projects(&self) -> Result<Vec<Project>, ConsoleError> {
        let response: ProjectListResponse = self.get("/api/v1/get-projects").await?;
        Ok(response.projects)
    }
}
