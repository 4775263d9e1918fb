// Project endpoints
//
// Simple CRUD over `/projects`. Records arrive under the `Projects`
// envelope key with the wire `id` mapped to `project_id`.

use serde_json::json;
use tracing::debug;

use crate::client::PlatformClient;
use crate::error::Error;
use crate::models::Project;

impl PlatformClient {
    /// List all projects visible to the credential, in server order.
    ///
    /// `GET /projects`
    pub async fn list_projects(&self) -> Result<Vec<Project>, Error> {
        let url = self.api_url("projects");
        debug!("listing projects");
        let mut envelope = self.get(url).await?;
        envelope.ensure_success()?;
        envelope.records("Projects")
    }

    /// Fetch a single project.
    ///
    /// `GET /projects/{id}`. An empty collection on a 2xx fails with
    /// [`Error::ProjectNotFound`].
    pub async fn get_project(&self, project_id: u64) -> Result<Project, Error> {
        let url = self.api_url(&format!("projects/{project_id}"));
        debug!(project_id, "fetching project");
        let mut envelope = self.get(url).await?;
        envelope.ensure_success()?;
        envelope
            .records("Projects")?
            .into_iter()
            .next()
            .ok_or(Error::ProjectNotFound { project_id })
    }

    /// Create a project, returning the new record.
    ///
    /// `POST /projects` with `{"name": "..."}`
    pub async fn create_project(&self, name: &str) -> Result<Project, Error> {
        let url = self.api_url("projects");
        debug!(name, "creating project");
        let mut envelope = self.post(url, &json!({ "name": name })).await?;
        envelope.ensure_success()?;
        envelope
            .records("Projects")?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Platform {
                message: "create returned no project record".into(),
            })
    }

    /// Rename a project, returning the updated record.
    ///
    /// `PUT /projects/{id}`. `name` is the only mutable project field the
    /// platform accepts.
    pub async fn update_project(&self, project_id: u64, name: &str) -> Result<Project, Error> {
        let url = self.api_url(&format!("projects/{project_id}"));
        debug!(project_id, name, "updating project");
        let mut envelope = self.put(url, &json!({ "name": name })).await?;
        envelope.ensure_success()?;
        envelope
            .records("Projects")?
            .into_iter()
            .next()
            .ok_or(Error::ProjectNotFound { project_id })
    }

    /// Delete a project.
    ///
    /// `DELETE /projects/{id}`
    pub async fn delete_project(&self, project_id: u64) -> Result<(), Error> {
        let url = self.api_url(&format!("projects/{project_id}"));
        debug!(project_id, "deleting project");
        let envelope = self.delete(url).await?;
        envelope.ensure_success()
    }
}
