#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::info;

use worklog_core::{AppError, AppResult, UserIdentity};
use worklog_domain::{AuditAction, Permission, Team};

use crate::role_service::new_id;
use crate::{
    AuditEvent, AuditRepository, AuthorizationService, ProjectRepository, TeamRepository,
    UserDirectory,
};

/// Application service for team administration.
///
/// Creating, listing and deleting teams needs `manage_teams`. Editing one team
/// is also open to members holding `manage_assigned_teams`.
#[derive(Clone)]
pub struct TeamService {
    authorization_service: AuthorizationService,
    teams: Arc<dyn TeamRepository>,
    users: Arc<dyn UserDirectory>,
    projects: Arc<dyn ProjectRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl TeamService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        teams: Arc<dyn TeamRepository>,
        users: Arc<dyn UserDirectory>,
        projects: Arc<dyn ProjectRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            teams,
            users,
            projects,
            audit_repository,
        }
    }

    /// Lists every company team.
    pub async fn list_teams(&self, actor: &UserIdentity) -> AppResult<Vec<Team>> {
        self.authorization_service
            .require_permission(actor, Permission::ManageTeams)?;
        self.teams.list_teams(actor.company_id()).await
    }

    /// Returns one team the actor may manage.
    pub async fn get_team(&self, actor: &UserIdentity, team_id: &str) -> AppResult<Team> {
        self.find_managed_team(actor, team_id).await
    }

    /// Creates an empty team.
    pub async fn create_team(
        &self,
        actor: &UserIdentity,
        name: &str,
        description: Option<String>,
    ) -> AppResult<Team> {
        self.authorization_service
            .require_permission(actor, Permission::ManageTeams)?;

        let team = Team::new(new_id(), actor.company_id(), name, description)?;
        self.teams.save_team(team.clone()).await?;

        self.append_team_event(
            actor,
            AuditAction::TeamCreated,
            &team,
            format!("created team '{}'", team.name()),
        )
        .await?;

        Ok(team)
    }

    /// Renames a team and replaces its description.
    pub async fn update_team(
        &self,
        actor: &UserIdentity,
        team_id: &str,
        name: &str,
        description: Option<String>,
    ) -> AppResult<Team> {
        let mut team = self.find_managed_team(actor, team_id).await?;
        team.update_details(name, description)?;
        self.teams.save_team(team.clone()).await?;

        self.append_team_event(
            actor,
            AuditAction::TeamUpdated,
            &team,
            format!("updated team '{}'", team.name()),
        )
        .await?;

        Ok(team)
    }

    /// Deletes a team.
    pub async fn delete_team(&self, actor: &UserIdentity, team_id: &str) -> AppResult<()> {
        self.authorization_service
            .require_permission(actor, Permission::ManageTeams)?;

        let team = self
            .teams
            .find_team(actor.company_id(), team_id)
            .await?
            .ok_or_else(|| team_not_found(team_id))?;
        self.teams
            .delete_team(actor.company_id(), team.team_id())
            .await?;

        self.append_team_event(
            actor,
            AuditAction::TeamDeleted,
            &team,
            format!("deleted team '{}'", team.name()),
        )
        .await
    }

    /// Replaces the member list with company users.
    pub async fn set_members(
        &self,
        actor: &UserIdentity,
        team_id: &str,
        user_ids: Vec<String>,
    ) -> AppResult<Team> {
        let mut team = self.find_managed_team(actor, team_id).await?;

        let company_users = self.users.list_users(actor.company_id()).await?;
        if let Some(unknown) = user_ids
            .iter()
            .filter(|user_id| !user_id.trim().is_empty())
            .find(|user_id| {
                !company_users
                    .iter()
                    .any(|user| user.user_id() == user_id.trim())
            })
        {
            return Err(AppError::Validation(format!(
                "user '{unknown}' is not a member of this company"
            )));
        }

        team.replace_members(user_ids);
        self.teams.save_team(team.clone()).await?;

        self.append_team_event(
            actor,
            AuditAction::TeamMembersReplaced,
            &team,
            format!("team '{}' now has {} member(s)", team.name(), team.member_ids().len()),
        )
        .await?;

        Ok(team)
    }

    /// Replaces the project assignments with company projects.
    pub async fn set_projects(
        &self,
        actor: &UserIdentity,
        team_id: &str,
        project_ids: Vec<String>,
    ) -> AppResult<Team> {
        let mut team = self.find_managed_team(actor, team_id).await?;

        let company_projects = self.projects.list_projects(actor.company_id()).await?;
        if let Some(unknown) = project_ids
            .iter()
            .filter(|project_id| !project_id.trim().is_empty())
            .find(|project_id| {
                !company_projects
                    .iter()
                    .any(|project| project.project_id() == project_id.trim())
            })
        {
            return Err(AppError::Validation(format!(
                "project '{unknown}' does not belong to this company"
            )));
        }

        team.replace_projects(project_ids);
        self.teams.save_team(team.clone()).await?;

        self.append_team_event(
            actor,
            AuditAction::TeamProjectsReplaced,
            &team,
            format!(
                "team '{}' now has {} project(s)",
                team.name(),
                team.project_ids().len()
            ),
        )
        .await?;

        Ok(team)
    }

    async fn find_managed_team(&self, actor: &UserIdentity, team_id: &str) -> AppResult<Team> {
        let team = self
            .teams
            .find_team(actor.company_id(), team_id)
            .await?
            .ok_or_else(|| team_not_found(team_id))?;

        self.authorization_service
            .require_team_management(actor, &team)?;
        Ok(team)
    }

    async fn append_team_event(
        &self,
        actor: &UserIdentity,
        action: AuditAction,
        team: &Team,
        detail: String,
    ) -> AppResult<()> {
        info!(
            company_id = %actor.company_id(),
            subject = %actor.subject(),
            team_id = %team.team_id(),
            action = action.as_str(),
            "team changed"
        );

        self.audit_repository
            .append_event(AuditEvent {
                company_id: actor.company_id(),
                subject: actor.subject().to_owned(),
                action,
                resource_type: "team".to_owned(),
                resource_id: team.team_id().to_owned(),
                detail: Some(detail),
            })
            .await
    }
}

fn team_not_found(team_id: &str) -> AppError {
    AppError::NotFound(format!("team '{team_id}' does not exist"))
}
