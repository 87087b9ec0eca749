use async_trait::async_trait;

use worklog_application::ProjectRepository;
use worklog_core::{AppResult, CompanyId};
use worklog_domain::Project;

use super::InMemoryWorkspaceRepository;

#[async_trait]
impl ProjectRepository for InMemoryWorkspaceRepository {
    async fn list_projects(&self, company_id: CompanyId) -> AppResult<Vec<Project>> {
        let projects = self.projects.read().await;

        let mut values: Vec<Project> = projects
            .iter()
            .filter_map(|((stored_company_id, _), project)| {
                (stored_company_id == &company_id).then_some(project.clone())
            })
            .collect();
        values.sort_by(|left, right| left.name().as_str().cmp(right.name().as_str()));

        Ok(values)
    }

    async fn find_project(
        &self,
        company_id: CompanyId,
        project_id: &str,
    ) -> AppResult<Option<Project>> {
        Ok(self
            .projects
            .read()
            .await
            .get(&(company_id, project_id.to_owned()))
            .cloned())
    }

    async fn save_project(&self, project: Project) -> AppResult<()> {
        self.projects.write().await.insert(
            (project.company_id(), project.project_id().to_owned()),
            project,
        );
        Ok(())
    }

    async fn delete_project(&self, company_id: CompanyId, project_id: &str) -> AppResult<()> {
        let mut teams = self.teams.write().await;
        let mut projects = self.projects.write().await;
        let mut entries = self.entries.write().await;

        if projects.remove(&(company_id, project_id.to_owned())).is_none() {
            return Ok(());
        }

        // Entries and team assignments go with the project.
        entries.retain(|_, entry| entry.project_id() != project_id);
        for ((stored_company_id, _), team) in teams.iter_mut() {
            if stored_company_id == &company_id {
                let remaining: Vec<String> = team
                    .project_ids()
                    .iter()
                    .filter(|stored| stored.as_str() != project_id)
                    .cloned()
                    .collect();
                team.replace_projects(remaining);
            }
        }

        Ok(())
    }
}
