use async_trait::async_trait;

use worklog_application::{TimesheetQuery, TimesheetRepository};
use worklog_core::{AppResult, CompanyId};
use worklog_domain::TimesheetEntry;

use super::InMemoryWorkspaceRepository;

#[async_trait]
impl TimesheetRepository for InMemoryWorkspaceRepository {
    async fn list_entries(
        &self,
        company_id: CompanyId,
        query: TimesheetQuery,
    ) -> AppResult<Vec<TimesheetEntry>> {
        let projects = self.projects.read().await;
        let entries = self.entries.read().await;

        // Entries carry no company; the project decides which one they belong to.
        let mut values: Vec<TimesheetEntry> = entries
            .values()
            .filter(|entry| {
                projects.contains_key(&(company_id, entry.project_id().to_owned()))
            })
            .filter(|entry| query.date.is_none_or(|date| entry.date() == date))
            .filter(|entry| {
                query
                    .user_id
                    .as_deref()
                    .is_none_or(|user_id| entry.user_id() == user_id)
            })
            .cloned()
            .collect();
        values.sort_by(|left, right| {
            right
                .date()
                .cmp(&left.date())
                .then_with(|| left.entry_id().cmp(right.entry_id()))
        });

        Ok(values)
    }

    async fn find_entry(&self, entry_id: &str) -> AppResult<Option<TimesheetEntry>> {
        Ok(self.entries.read().await.get(entry_id).cloned())
    }

    async fn save_entry(&self, entry: TimesheetEntry) -> AppResult<()> {
        self.entries
            .write()
            .await
            .insert(entry.entry_id().to_owned(), entry);
        Ok(())
    }

    async fn delete_entry(&self, entry_id: &str) -> AppResult<()> {
        self.entries.write().await.remove(entry_id);
        Ok(())
    }
}
