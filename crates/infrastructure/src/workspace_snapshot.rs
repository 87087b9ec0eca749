use chrono::NaiveDate;
use serde::Deserialize;

use worklog_core::{AppError, AppResult, CompanyId};
use worklog_domain::{
    Company, DefaultRole, Permission, Project, Role, Team, Theme, TimesheetEntry, UserAccount,
};

/// Serialized company workspace used to seed the in-memory store.
///
/// Records are validated through the domain constructors on load, so a
/// snapshot cannot smuggle in blank names or non-positive hours.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceSnapshot {
    /// Company every record belongs to.
    pub company_id: CompanyId,
    /// Company display name. Settings are only stored when it is present.
    pub company_name: Option<String>,
    /// Company theme.
    #[serde(default)]
    pub theme: Theme,
    /// Company roles.
    #[serde(default)]
    pub roles: Vec<RoleRecord>,
    /// Company user accounts.
    #[serde(default)]
    pub users: Vec<UserRecord>,
    /// Company projects.
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
    /// Company teams.
    #[serde(default)]
    pub teams: Vec<TeamRecord>,
    /// Logged timesheet entries.
    #[serde(default)]
    pub entries: Vec<EntryRecord>,
}

/// Serialized role.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleRecord {
    /// Role identifier.
    pub role_id: String,
    /// Role name. Ignored for system roles.
    #[serde(default)]
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Marks one of the system roles.
    pub system: Option<DefaultRole>,
    /// Grants. `None` keeps the system role defaults.
    pub permissions: Option<Vec<Permission>>,
}

/// Serialized user account.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    /// User identifier.
    pub user_id: String,
    /// Assigned role.
    pub role_id: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Whether the user may sign in.
    #[serde(default = "enabled")]
    pub is_active: bool,
}

/// Serialized project.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    /// Project identifier.
    pub project_id: String,
    /// Project name.
    pub name: String,
    /// Contracted amount.
    pub amount: Option<f64>,
    /// Whether the amount counts as revenue.
    #[serde(default)]
    pub is_paid: bool,
    /// Whether the project is still running.
    #[serde(default = "enabled")]
    pub is_active: bool,
}

/// Serialized team.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamRecord {
    /// Team identifier.
    pub team_id: String,
    /// Team name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Member user ids.
    #[serde(default)]
    pub member_ids: Vec<String>,
    /// Assigned project ids.
    #[serde(default)]
    pub project_ids: Vec<String>,
}

/// Serialized timesheet entry.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryRecord {
    /// Entry identifier.
    pub entry_id: String,
    /// Owner.
    pub user_id: String,
    /// Project the hours belong to.
    pub project_id: String,
    /// Day of the work.
    pub date: NaiveDate,
    /// Worked hours.
    pub hours: f64,
    /// Optional work description.
    pub description: Option<String>,
}

fn enabled() -> bool {
    true
}

/// Domain entities rebuilt from a snapshot.
#[derive(Debug, Clone, Default)]
pub(crate) struct WorkspaceRecords {
    pub(crate) company: Option<Company>,
    pub(crate) roles: Vec<Role>,
    pub(crate) users: Vec<UserAccount>,
    pub(crate) projects: Vec<Project>,
    pub(crate) teams: Vec<Team>,
    pub(crate) entries: Vec<TimesheetEntry>,
}

impl WorkspaceSnapshot {
    /// Parses a snapshot from its JSON form.
    pub fn from_json(payload: &str) -> AppResult<Self> {
        serde_json::from_str(payload).map_err(|error| {
            AppError::Validation(format!("invalid workspace snapshot: {error}"))
        })
    }

    pub(crate) fn into_records(self) -> AppResult<WorkspaceRecords> {
        let company_id = self.company_id;

        let company = match self.company_name {
            Some(name) => {
                let mut company = Company::new(company_id, name)?;
                company.set_theme(self.theme);
                Some(company)
            }
            None => None,
        };

        let roles = self
            .roles
            .into_iter()
            .map(|record| record.into_role(company_id))
            .collect::<AppResult<Vec<_>>>()?;

        let users = self
            .users
            .into_iter()
            .map(|record| {
                if !roles.iter().any(|role| role.role_id() == record.role_id) {
                    return Err(AppError::Validation(format!(
                        "user '{}' references unknown role '{}'",
                        record.user_id, record.role_id
                    )));
                }

                let mut user = UserAccount::new(
                    record.user_id,
                    company_id,
                    record.role_id,
                    record.first_name,
                    record.last_name,
                    record.email,
                )?;
                if !record.is_active {
                    user.deactivate();
                }
                Ok(user)
            })
            .collect::<AppResult<Vec<_>>>()?;

        let projects = self
            .projects
            .into_iter()
            .map(|record| {
                let mut project = Project::new(
                    record.project_id,
                    company_id,
                    record.name,
                    record.amount,
                    record.is_paid,
                )?;
                if !record.is_active {
                    project.set_active(false);
                }
                Ok(project)
            })
            .collect::<AppResult<Vec<_>>>()?;

        let teams = self
            .teams
            .into_iter()
            .map(|record| {
                let mut team = Team::new(record.team_id, company_id, record.name, record.description)?;
                team.replace_members(record.member_ids);
                team.replace_projects(record.project_ids);
                Ok(team)
            })
            .collect::<AppResult<Vec<_>>>()?;

        let entries = self
            .entries
            .into_iter()
            .map(|record| {
                if !projects
                    .iter()
                    .any(|project| project.project_id() == record.project_id)
                {
                    return Err(AppError::Validation(format!(
                        "entry '{}' references unknown project '{}'",
                        record.entry_id, record.project_id
                    )));
                }

                TimesheetEntry::new(
                    record.entry_id,
                    record.user_id,
                    record.project_id,
                    record.date,
                    record.hours,
                    record.description,
                )
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(WorkspaceRecords {
            company,
            roles,
            users,
            projects,
            teams,
            entries,
        })
    }
}

impl RoleRecord {
    fn into_role(self, company_id: CompanyId) -> AppResult<Role> {
        let Some(system) = self.system else {
            return Role::new(
                self.role_id,
                company_id,
                self.name,
                self.description,
                self.permissions.unwrap_or_default(),
            );
        };

        let mut role = Role::from_default(self.role_id, company_id, system)?;
        if self.description.is_some() {
            role.set_description(self.description);
        }
        if let Some(permissions) = self.permissions {
            role.replace_permissions(permissions);
        }
        Ok(role)
    }
}
