use async_trait::async_trait;

use worklog_application::{ReportFilter, ReportRepository, ReportRow};
use worklog_core::{AppResult, CompanyId};

use super::InMemoryWorkspaceRepository;

#[async_trait]
impl ReportRepository for InMemoryWorkspaceRepository {
    async fn list_report_rows(
        &self,
        company_id: CompanyId,
        filter: &ReportFilter,
    ) -> AppResult<Vec<ReportRow>> {
        let team_member_ids = match filter.team_id.as_deref() {
            Some(team_id) => self
                .teams
                .read()
                .await
                .get(&(company_id, team_id.to_owned()))
                .map(|team| team.member_ids().to_vec())
                .unwrap_or_default(),
            None => Vec::new(),
        };

        let users = self.users.read().await;
        let projects = self.projects.read().await;
        let entries = self.entries.read().await;

        let mut sorted_entries: Vec<_> = entries.values().collect();
        sorted_entries.sort_by(|left, right| {
            left.date()
                .cmp(&right.date())
                .then_with(|| left.entry_id().cmp(right.entry_id()))
        });

        let rows = sorted_entries
            .into_iter()
            .filter_map(|entry| {
                let project = projects.get(&(company_id, entry.project_id().to_owned()))?;
                let user_name = users
                    .get(entry.user_id())
                    .map_or_else(|| entry.user_id().to_owned(), |user| user.display_name());

                Some(ReportRow {
                    user_id: entry.user_id().to_owned(),
                    user_name,
                    project_id: project.project_id().to_owned(),
                    project_name: project.name().as_str().to_owned(),
                    project_amount: project.amount(),
                    hours: entry.hours(),
                    date: entry.date(),
                })
            })
            .filter(|row| filter.matches(row, &team_member_ids))
            .collect();

        Ok(rows)
    }
}
