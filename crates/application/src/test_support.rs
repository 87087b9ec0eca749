use async_trait::async_trait;
use tokio::sync::Mutex;

use worklog_core::{AppResult, CompanyId, UserIdentity};
use worklog_domain::{Company, Permission, Project, Role, Team, TimesheetEntry, UserAccount};

use crate::{
    AuditEvent, AuditRepository, CompanyRepository, ProjectRepository, ReportFilter,
    ReportRepository, ReportRow, RoleRepository, TeamRepository, TimesheetQuery,
    TimesheetRepository, UserDirectory,
};

pub(crate) fn identity(company_id: CompanyId, subject: &str, grants: &[Permission]) -> UserIdentity {
    UserIdentity::new(subject, subject, None, company_id).with_role(
        "role-test",
        "Test",
        grants
            .iter()
            .map(|permission| permission.as_str().to_owned())
            .collect(),
    )
}

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    pub(crate) events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeWorkspace {
    pub(crate) companies: Mutex<Vec<Company>>,
    pub(crate) users: Mutex<Vec<UserAccount>>,
    pub(crate) roles: Mutex<Vec<Role>>,
    pub(crate) teams: Mutex<Vec<Team>>,
    pub(crate) projects: Mutex<Vec<Project>>,
    pub(crate) entries: Mutex<Vec<TimesheetEntry>>,
    pub(crate) report_rows: Mutex<Vec<ReportRow>>,
}

#[async_trait]
impl UserDirectory for FakeWorkspace {
    async fn find_user(&self, user_id: &str) -> AppResult<Option<UserAccount>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.user_id() == user_id)
            .cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<UserAccount>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .find(|user| user.email() == Some(email))
            .cloned())
    }

    async fn list_users(&self, company_id: CompanyId) -> AppResult<Vec<UserAccount>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .filter(|user| user.company_id() == company_id)
            .cloned()
            .collect())
    }

    async fn save_user(&self, user: UserAccount) -> AppResult<()> {
        let mut users = self.users.lock().await;
        users.retain(|stored| stored.user_id() != user.user_id());
        users.push(user);
        Ok(())
    }

    async fn delete_user(&self, user_id: &str) -> AppResult<()> {
        self.users
            .lock()
            .await
            .retain(|user| user.user_id() != user_id);
        Ok(())
    }

    async fn count_users_with_role(
        &self,
        company_id: CompanyId,
        role_id: &str,
    ) -> AppResult<usize> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .filter(|user| user.company_id() == company_id && user.role_id() == role_id)
            .count())
    }
}

#[async_trait]
impl RoleRepository for FakeWorkspace {
    async fn list_roles(&self, company_id: CompanyId) -> AppResult<Vec<Role>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .filter(|role| role.company_id() == company_id)
            .cloned()
            .collect())
    }

    async fn find_role(&self, company_id: CompanyId, role_id: &str) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .find(|role| role.company_id() == company_id && role.role_id() == role_id)
            .cloned())
    }

    async fn find_role_by_name(
        &self,
        company_id: CompanyId,
        name: &str,
    ) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .lock()
            .await
            .iter()
            .find(|role| role.company_id() == company_id && role.name().as_str() == name)
            .cloned())
    }

    async fn save_role(&self, role: Role) -> AppResult<()> {
        let mut roles = self.roles.lock().await;
        roles.retain(|stored| stored.role_id() != role.role_id());
        roles.push(role);
        Ok(())
    }

    async fn delete_role(&self, company_id: CompanyId, role_id: &str) -> AppResult<()> {
        self.roles
            .lock()
            .await
            .retain(|role| !(role.company_id() == company_id && role.role_id() == role_id));
        Ok(())
    }
}

#[async_trait]
impl TeamRepository for FakeWorkspace {
    async fn list_teams(&self, company_id: CompanyId) -> AppResult<Vec<Team>> {
        Ok(self
            .teams
            .lock()
            .await
            .iter()
            .filter(|team| team.company_id() == company_id)
            .cloned()
            .collect())
    }

    async fn find_team(&self, company_id: CompanyId, team_id: &str) -> AppResult<Option<Team>> {
        Ok(self
            .teams
            .lock()
            .await
            .iter()
            .find(|team| team.company_id() == company_id && team.team_id() == team_id)
            .cloned())
    }

    async fn save_team(&self, team: Team) -> AppResult<()> {
        let mut teams = self.teams.lock().await;
        teams.retain(|stored| stored.team_id() != team.team_id());
        teams.push(team);
        Ok(())
    }

    async fn delete_team(&self, company_id: CompanyId, team_id: &str) -> AppResult<()> {
        self.teams
            .lock()
            .await
            .retain(|team| !(team.company_id() == company_id && team.team_id() == team_id));
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for FakeWorkspace {
    async fn list_projects(&self, company_id: CompanyId) -> AppResult<Vec<Project>> {
        Ok(self
            .projects
            .lock()
            .await
            .iter()
            .filter(|project| project.company_id() == company_id)
            .cloned()
            .collect())
    }

    async fn find_project(
        &self,
        company_id: CompanyId,
        project_id: &str,
    ) -> AppResult<Option<Project>> {
        Ok(self
            .projects
            .lock()
            .await
            .iter()
            .find(|project| {
                project.company_id() == company_id && project.project_id() == project_id
            })
            .cloned())
    }

    async fn save_project(&self, project: Project) -> AppResult<()> {
        let mut projects = self.projects.lock().await;
        projects.retain(|stored| stored.project_id() != project.project_id());
        projects.push(project);
        Ok(())
    }

    async fn delete_project(&self, company_id: CompanyId, project_id: &str) -> AppResult<()> {
        self.projects.lock().await.retain(|project| {
            !(project.company_id() == company_id && project.project_id() == project_id)
        });
        Ok(())
    }
}

#[async_trait]
impl CompanyRepository for FakeWorkspace {
    async fn find_company(&self, company_id: CompanyId) -> AppResult<Option<Company>> {
        Ok(self
            .companies
            .lock()
            .await
            .iter()
            .find(|company| company.company_id() == company_id)
            .cloned())
    }

    async fn save_company(&self, company: Company) -> AppResult<()> {
        let mut companies = self.companies.lock().await;
        companies.retain(|stored| stored.company_id() != company.company_id());
        companies.push(company);
        Ok(())
    }
}

#[async_trait]
impl TimesheetRepository for FakeWorkspace {
    async fn list_entries(
        &self,
        _company_id: CompanyId,
        query: TimesheetQuery,
    ) -> AppResult<Vec<TimesheetEntry>> {
        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .filter(|entry| query.date.is_none_or(|date| entry.date() == date))
            .filter(|entry| {
                query
                    .user_id
                    .as_deref()
                    .is_none_or(|user_id| entry.user_id() == user_id)
            })
            .cloned()
            .collect())
    }

    async fn find_entry(&self, entry_id: &str) -> AppResult<Option<TimesheetEntry>> {
        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .find(|entry| entry.entry_id() == entry_id)
            .cloned())
    }

    async fn save_entry(&self, entry: TimesheetEntry) -> AppResult<()> {
        self.entries.lock().await.push(entry);
        Ok(())
    }

    async fn delete_entry(&self, entry_id: &str) -> AppResult<()> {
        self.entries
            .lock()
            .await
            .retain(|entry| entry.entry_id() != entry_id);
        Ok(())
    }
}

#[async_trait]
impl ReportRepository for FakeWorkspace {
    async fn list_report_rows(
        &self,
        company_id: CompanyId,
        filter: &ReportFilter,
    ) -> AppResult<Vec<ReportRow>> {
        let team_member_ids = match filter.team_id.as_deref() {
            Some(team_id) => self
                .find_team(company_id, team_id)
                .await?
                .map(|team| team.member_ids().to_vec())
                .unwrap_or_default(),
            None => Vec::new(),
        };

        Ok(self
            .report_rows
            .lock()
            .await
            .iter()
            .filter(|row| filter.matches(row, &team_member_ids))
            .cloned()
            .collect())
    }
}
