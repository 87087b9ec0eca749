mod companies;
mod projects;
mod reports;
mod roles;
mod teams;
mod timesheets;
mod users;


use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::info;

use worklog_core::{AppResult, CompanyId};
use worklog_domain::{Company, Project, Role, Team, TimesheetEntry, UserAccount};

use crate::WorkspaceSnapshot;

/// In-memory store implementing every workspace port.
#[derive(Debug, Default)]
pub struct InMemoryWorkspaceRepository {
    companies: RwLock<HashMap<CompanyId, Company>>,
    users: RwLock<HashMap<String, UserAccount>>,
    roles: RwLock<HashMap<(CompanyId, String), Role>>,
    teams: RwLock<HashMap<(CompanyId, String), Team>>,
    projects: RwLock<HashMap<(CompanyId, String), Project>>,
    entries: RwLock<HashMap<String, TimesheetEntry>>,
}

impl InMemoryWorkspaceRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            companies: RwLock::new(HashMap::new()),
            users: RwLock::new(HashMap::new()),
            roles: RwLock::new(HashMap::new()),
            teams: RwLock::new(HashMap::new()),
            projects: RwLock::new(HashMap::new()),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a repository seeded with a validated snapshot.
    pub fn from_snapshot(snapshot: WorkspaceSnapshot) -> AppResult<Self> {
        let company_id = snapshot.company_id;
        let records = snapshot.into_records()?;

        info!(
            company_id = %company_id,
            users = records.users.len(),
            projects = records.projects.len(),
            teams = records.teams.len(),
            entries = records.entries.len(),
            "workspace snapshot loaded"
        );

        Ok(Self {
            companies: RwLock::new(
                records
                    .company
                    .into_iter()
                    .map(|company| (company.company_id(), company))
                    .collect(),
            ),
            users: RwLock::new(
                records
                    .users
                    .into_iter()
                    .map(|user| (user.user_id().to_owned(), user))
                    .collect(),
            ),
            roles: RwLock::new(
                records
                    .roles
                    .into_iter()
                    .map(|role| ((role.company_id(), role.role_id().to_owned()), role))
                    .collect(),
            ),
            teams: RwLock::new(
                records
                    .teams
                    .into_iter()
                    .map(|team| ((team.company_id(), team.team_id().to_owned()), team))
                    .collect(),
            ),
            projects: RwLock::new(
                records
                    .projects
                    .into_iter()
                    .map(|project| {
                        (
                            (project.company_id(), project.project_id().to_owned()),
                            project,
                        )
                    })
                    .collect(),
            ),
            entries: RwLock::new(
                records
                    .entries
                    .into_iter()
                    .map(|entry| (entry.entry_id().to_owned(), entry))
                    .collect(),
            ),
        })
    }
}
