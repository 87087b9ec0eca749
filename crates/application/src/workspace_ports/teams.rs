use async_trait::async_trait;

use worklog_core::{AppResult, CompanyId};
use worklog_domain::Team;

/// Repository port for company teams.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Lists all teams of a company.
    async fn list_teams(&self, company_id: CompanyId) -> AppResult<Vec<Team>>;

    /// Finds a team by id in company scope.
    async fn find_team(&self, company_id: CompanyId, team_id: &str) -> AppResult<Option<Team>>;

    /// Inserts or replaces a team, including its members and projects.
    async fn save_team(&self, team: Team) -> AppResult<()>;

    /// Deletes a team in company scope.
    async fn delete_team(&self, company_id: CompanyId, team_id: &str) -> AppResult<()>;
}
