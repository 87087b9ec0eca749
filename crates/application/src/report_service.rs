
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use worklog_core::{AppResult, UserIdentity};
use worklog_domain::Permission;

use crate::report_aggregation::{
    DailyHours, DashboardStats, ProjectHours, ReportSummary, TeamHours, UserHours,
    aggregate_by_day, aggregate_by_project, aggregate_by_team, aggregate_by_user,
    dashboard_stats, summarize,
};
use crate::{
    AuthorizationService, ProjectRepository, ReportFilter, ReportRepository, TeamRepository,
    UserDirectory,
};

/// Full report payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    /// Headline figures.
    pub summary: ReportSummary,
    /// Hours per user, in first-seen order.
    pub user_hours: Vec<UserHours>,
    /// Hours per project, in first-seen order.
    pub project_hours: Vec<ProjectHours>,
    /// Hours per team. Empty when the report is filtered to one team.
    pub team_hours: Vec<TeamHours>,
    /// Hours per day, oldest first.
    pub daily_hours: Vec<DailyHours>,
}

/// Application service producing company hour reports.
#[derive(Clone)]
pub struct ReportService {
    authorization_service: AuthorizationService,
    reports: Arc<dyn ReportRepository>,
    teams: Arc<dyn TeamRepository>,
    projects: Arc<dyn ProjectRepository>,
    users: Arc<dyn UserDirectory>,
}

impl ReportService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        reports: Arc<dyn ReportRepository>,
        teams: Arc<dyn TeamRepository>,
        projects: Arc<dyn ProjectRepository>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            authorization_service,
            reports,
            teams,
            projects,
            users,
        }
    }

    /// Builds the report for the actor's company.
    pub async fn generate(
        &self,
        actor: &UserIdentity,
        filter: &ReportFilter,
    ) -> AppResult<ReportData> {
        self.authorization_service
            .require_permission(actor, Permission::GenerateReports)?;

        let company_id = actor.company_id();
        let rows = self.reports.list_report_rows(company_id, filter).await?;
        let projects = self.projects.list_projects(company_id).await?;

        let active_users = self
            .users
            .list_users(company_id)
            .await?
            .iter()
            .filter(|user| user.is_active())
            .filter(|user| {
                filter
                    .user_id
                    .as_deref()
                    .is_none_or(|user_id| user.user_id() == user_id)
            })
            .count();

        let team_hours = if filter.team_id.is_none() {
            let teams = self.teams.list_teams(company_id).await?;
            aggregate_by_team(&rows, &teams)
        } else {
            Vec::new()
        };

        info!(
            company_id = %company_id,
            subject = %actor.subject(),
            rows = rows.len(),
            "report generated"
        );

        Ok(ReportData {
            summary: summarize(&rows, &projects, filter, active_users),
            user_hours: aggregate_by_user(&rows),
            project_hours: aggregate_by_project(&rows),
            team_hours,
            daily_hours: aggregate_by_day(&rows),
        })
    }

    /// Builds the dashboard for the actor's company.
    ///
    /// The team filter does not apply here.
    pub async fn dashboard_stats(
        &self,
        actor: &UserIdentity,
        filter: &ReportFilter,
    ) -> AppResult<DashboardStats> {
        self.authorization_service
            .require_permission(actor, Permission::ViewAnalytics)?;

        let company_id = actor.company_id();
        let filter = ReportFilter {
            team_id: None,
            ..filter.clone()
        };
        let rows = self.reports.list_report_rows(company_id, &filter).await?;
        let projects = self.projects.list_projects(company_id).await?;
        let active_users = self
            .users
            .list_users(company_id)
            .await?
            .iter()
            .filter(|user| user.is_active())
            .count();

        info!(
            company_id = %company_id,
            subject = %actor.subject(),
            rows = rows.len(),
            "dashboard computed"
        );

        Ok(dashboard_stats(&rows, &projects, active_users))
    }
}
