use async_trait::async_trait;

use worklog_core::{AppResult, CompanyId};
use worklog_domain::Project;

/// Input payload for creating projects.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProjectInput {
    /// Project name.
    pub name: String,
    /// Contracted amount, if any.
    pub amount: Option<f64>,
    /// Whether the amount counts as revenue.
    pub is_paid: bool,
}

/// Input payload for updating projects. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProjectInput {
    /// New name; must not be blank.
    pub name: Option<String>,
    /// New amount. `Some(None)` clears it.
    pub amount: Option<Option<f64>>,
    /// New billing flag.
    pub is_paid: Option<bool>,
    /// New status flag.
    pub is_active: Option<bool>,
}

/// Repository port for company projects.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Lists all projects of a company.
    async fn list_projects(&self, company_id: CompanyId) -> AppResult<Vec<Project>>;

    /// Finds a project by id in company scope.
    async fn find_project(
        &self,
        company_id: CompanyId,
        project_id: &str,
    ) -> AppResult<Option<Project>>;

    /// Inserts or replaces a project.
    async fn save_project(&self, project: Project) -> AppResult<()>;

    /// Deletes a project in company scope.
    async fn delete_project(&self, company_id: CompanyId, project_id: &str) -> AppResult<()>;
}
