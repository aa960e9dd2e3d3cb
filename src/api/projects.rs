//! Projects API

use tracing::debug;
use crate::api::request::{decode_data, require_data, ApiClient, CallOrigin, RequestInit};
use crate::models::{CreateProject, Project, UpdateProject};
use crate::utils::errors::Result;
use crate::utils::helpers::encode_path_segment;

pub const PROJECTS_PATH: &str = "/api/v1/projects";

/// Project CRUD client
#[derive(Debug, Clone)]
pub struct ProjectsApi {
    client: ApiClient,
}

impl ProjectsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn project_path(id: &str) -> String {
        format!("{}/{}", PROJECTS_PATH, encode_path_segment(id))
    }

    pub async fn create_project(&self, project: &CreateProject) -> Result<()> {
        let init = RequestInit::post().json(project)?;
        self.client.make_request(PROJECTS_PATH, init, CallOrigin::Browser).await?;
        debug!(name = %project.name, "Project created");
        Ok(())
    }

    /// All projects of the signed-in user; empty when the backend sends none
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let envelope = self
            .client
            .make_request(PROJECTS_PATH, RequestInit::get(), CallOrigin::Browser)
            .await?;
        Ok(decode_data(envelope)?.unwrap_or_default())
    }

    pub async fn get_project(&self, id: &str) -> Result<Project> {
        let envelope = self
            .client
            .make_request(&Self::project_path(id), RequestInit::get(), CallOrigin::Browser)
            .await?;
        require_data(envelope, "project")
    }

    pub async fn update_project(&self, id: &str, update: &UpdateProject) -> Result<Project> {
        let init = RequestInit::put().json(update)?;
        let envelope = self
            .client
            .make_request(&Self::project_path(id), init, CallOrigin::Browser)
            .await?;
        require_data(envelope, "project")
    }

    pub async fn delete_project(&self, id: &str) -> Result<()> {
        self.client
            .make_request(&Self::project_path(id), RequestInit::delete(), CallOrigin::Browser)
            .await?;
        debug!(id = %id, "Project deleted");
        Ok(())
    }
}
