#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::info;

use worklog_core::{AppError, AppResult, UserIdentity};
use worklog_domain::{AuditAction, Permission, Project};

use crate::role_service::new_id;
use crate::{
    AuditEvent, AuditRepository, AuthorizationService, CreateProjectInput, ProjectRepository,
    UpdateProjectInput,
};

/// Application service for project administration.
///
/// Every signed-in user may read projects; changes need `manage_projects`.
#[derive(Clone)]
pub struct ProjectService {
    authorization_service: AuthorizationService,
    projects: Arc<dyn ProjectRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl ProjectService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        projects: Arc<dyn ProjectRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            projects,
            audit_repository,
        }
    }

    /// Lists company projects.
    pub async fn list_projects(&self, actor: &UserIdentity) -> AppResult<Vec<Project>> {
        self.projects.list_projects(actor.company_id()).await
    }

    /// Creates an active project.
    pub async fn create_project(
        &self,
        actor: &UserIdentity,
        input: CreateProjectInput,
    ) -> AppResult<Project> {
        self.authorization_service
            .require_permission(actor, Permission::ManageProjects)?;

        let project = Project::new(
            new_id(),
            actor.company_id(),
            input.name,
            input.amount,
            input.is_paid,
        )?;
        self.projects.save_project(project.clone()).await?;

        self.append_project_event(
            actor,
            AuditAction::ProjectCreated,
            &project,
            format!("created project '{}'", project.name()),
        )
        .await?;

        Ok(project)
    }

    /// Applies the provided field changes to a project.
    pub async fn update_project(
        &self,
        actor: &UserIdentity,
        project_id: &str,
        input: UpdateProjectInput,
    ) -> AppResult<Project> {
        self.authorization_service
            .require_permission(actor, Permission::ManageProjects)?;

        let mut project = self.find_project(actor, project_id).await?;
        if let Some(name) = input.name {
            project.rename(name)?;
        }
        if let Some(amount) = input.amount {
            project.set_amount(amount)?;
        }
        if let Some(is_paid) = input.is_paid {
            project.set_paid(is_paid);
        }
        if let Some(is_active) = input.is_active {
            project.set_active(is_active);
        }
        self.projects.save_project(project.clone()).await?;

        self.append_project_event(
            actor,
            AuditAction::ProjectUpdated,
            &project,
            format!("updated project '{}'", project.name()),
        )
        .await?;

        Ok(project)
    }

    /// Deletes a project.
    pub async fn delete_project(&self, actor: &UserIdentity, project_id: &str) -> AppResult<()> {
        self.authorization_service
            .require_permission(actor, Permission::ManageProjects)?;

        let project = self.find_project(actor, project_id).await?;
        self.projects
            .delete_project(actor.company_id(), project.project_id())
            .await?;

        self.append_project_event(
            actor,
            AuditAction::ProjectDeleted,
            &project,
            format!("deleted project '{}'", project.name()),
        )
        .await
    }

    async fn find_project(&self, actor: &UserIdentity, project_id: &str) -> AppResult<Project> {
        self.projects
            .find_project(actor.company_id(), project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("project '{project_id}' does not exist")))
    }

    async fn append_project_event(
        &self,
        actor: &UserIdentity,
        action: AuditAction,
        project: &Project,
        detail: String,
    ) -> AppResult<()> {
        info!(
            company_id = %actor.company_id(),
            subject = %actor.subject(),
            project_id = %project.project_id(),
            action = action.as_str(),
            "project changed"
        );

        self.audit_repository
            .append_event(AuditEvent {
                company_id: actor.company_id(),
                subject: actor.subject().to_owned(),
                action,
                resource_type: "project".to_owned(),
                resource_id: project.project_id().to_owned(),
                detail: Some(detail),
            })
            .await
    }
}
