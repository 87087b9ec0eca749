
use std::sync::Arc;

use tracing::{info, warn};

use worklog_core::{AppError, AppResult, UserIdentity};
use worklog_domain::{AuditAction, TimesheetEntry};

use crate::role_service::new_id;
use crate::{
    AuditEvent, AuditRepository, AuthorizationService, LogTimesheetEntryInput, ProjectRepository,
    TimesheetQuery, TimesheetRepository, TimesheetViewScope, UserDirectory,
};

/// Application service for logging and reviewing hours.
#[derive(Clone)]
pub struct TimesheetService {
    authorization_service: AuthorizationService,
    entries: Arc<dyn TimesheetRepository>,
    projects: Arc<dyn ProjectRepository>,
    users: Arc<dyn UserDirectory>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl TimesheetService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        entries: Arc<dyn TimesheetRepository>,
        projects: Arc<dyn ProjectRepository>,
        users: Arc<dyn UserDirectory>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            entries,
            projects,
            users,
            audit_repository,
        }
    }

    /// Lists entries visible to the actor.
    ///
    /// Without `view_all_timesheets` or `manage_timesheets` the listing is
    /// pinned to the actor's own entries and `query.user_id` is ignored.
    pub async fn list_entries(
        &self,
        actor: &UserIdentity,
        mut query: TimesheetQuery,
    ) -> AppResult<Vec<TimesheetEntry>> {
        query.user_id = match self.authorization_service.timesheet_view_scope(actor) {
            TimesheetViewScope::Own => Some(actor.subject().to_owned()),
            TimesheetViewScope::All => query
                .user_id
                .filter(|user_id| !user_id.trim().is_empty() && user_id != "all"),
        };

        self.entries.list_entries(actor.company_id(), query).await
    }

    /// Logs hours for the actor, or for another user under `manage_timesheets`.
    pub async fn log_entry(
        &self,
        actor: &UserIdentity,
        input: LogTimesheetEntryInput,
    ) -> AppResult<TimesheetEntry> {
        let owner = self
            .authorization_service
            .resolve_entry_owner(actor, input.user_id.as_deref());

        if owner != actor.subject() {
            self.users
                .find_user(owner.as_str())
                .await?
                .filter(|user| user.company_id() == actor.company_id())
                .ok_or_else(|| AppError::NotFound(format!("user '{owner}' does not exist")))?;
        }

        let project = self
            .projects
            .find_project(actor.company_id(), input.project_id.as_str())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("project '{}' does not exist", input.project_id))
            })?;

        let entry = TimesheetEntry::new(
            new_id(),
            owner,
            project.project_id(),
            input.date,
            input.hours,
            input.description,
        )?;
        self.entries.save_entry(entry.clone()).await?;

        info!(
            company_id = %actor.company_id(),
            subject = %actor.subject(),
            entry_id = %entry.entry_id(),
            owner = %entry.user_id(),
            hours = entry.hours(),
            "timesheet entry logged"
        );

        self.audit_repository
            .append_event(AuditEvent {
                company_id: actor.company_id(),
                subject: actor.subject().to_owned(),
                action: AuditAction::TimesheetEntryLogged,
                resource_type: "timesheet_entry".to_owned(),
                resource_id: entry.entry_id().to_owned(),
                detail: Some(format!(
                    "logged {} hour(s) on '{}' for '{}'",
                    entry.hours(),
                    project.name(),
                    entry.user_id()
                )),
            })
            .await?;

        Ok(entry)
    }

    /// Deletes an entry the actor owns, or any entry under `edit_all_timesheets`.
    pub async fn delete_entry(&self, actor: &UserIdentity, entry_id: &str) -> AppResult<()> {
        let entry = self.entries.find_entry(entry_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("timesheet entry '{entry_id}' does not exist"))
        })?;

        self.authorization_service.require_entry_edit(actor, &entry)?;

        if self
            .projects
            .find_project(actor.company_id(), entry.project_id())
            .await?
            .is_none()
        {
            warn!(
                company_id = %actor.company_id(),
                subject = %actor.subject(),
                entry_id = %entry_id,
                "timesheet entry belongs to another company"
            );
            return Err(AppError::Unauthorized(format!(
                "timesheet entry '{entry_id}' belongs to another company"
            )));
        }

        self.entries.delete_entry(entry.entry_id()).await?;

        self.audit_repository
            .append_event(AuditEvent {
                company_id: actor.company_id(),
                subject: actor.subject().to_owned(),
                action: AuditAction::TimesheetEntryDeleted,
                resource_type: "timesheet_entry".to_owned(),
                resource_id: entry.entry_id().to_owned(),
                detail: Some(format!(
                    "deleted {} hour(s) of '{}' on {}",
                    entry.hours(),
                    entry.user_id(),
                    entry.date()
                )),
            })
            .await
    }
}
