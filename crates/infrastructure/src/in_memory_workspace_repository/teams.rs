use async_trait::async_trait;

use worklog_application::TeamRepository;
use worklog_core::{AppResult, CompanyId};
use worklog_domain::Team;

use super::InMemoryWorkspaceRepository;

#[async_trait]
impl TeamRepository for InMemoryWorkspaceRepository {
    async fn list_teams(&self, company_id: CompanyId) -> AppResult<Vec<Team>> {
        let teams = self.teams.read().await;

        let mut values: Vec<Team> = teams
            .iter()
            .filter_map(|((stored_company_id, _), team)| {
                (stored_company_id == &company_id).then_some(team.clone())
            })
            .collect();
        values.sort_by(|left, right| left.name().as_str().cmp(right.name().as_str()));

        Ok(values)
    }

    async fn find_team(&self, company_id: CompanyId, team_id: &str) -> AppResult<Option<Team>> {
        Ok(self
            .teams
            .read()
            .await
            .get(&(company_id, team_id.to_owned()))
            .cloned())
    }

    async fn save_team(&self, team: Team) -> AppResult<()> {
        self.teams
            .write()
            .await
            .insert((team.company_id(), team.team_id().to_owned()), team);
        Ok(())
    }

    async fn delete_team(&self, company_id: CompanyId, team_id: &str) -> AppResult<()> {
        self.teams
            .write()
            .await
            .remove(&(company_id, team_id.to_owned()));
        Ok(())
    }
}
