use async_trait::async_trait;
use chrono::NaiveDate;

use worklog_core::{AppResult, CompanyId};
use worklog_domain::TimesheetEntry;

/// Filter for timesheet entry listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimesheetQuery {
    /// Only entries logged on this day.
    pub date: Option<NaiveDate>,
    /// Only entries owned by this user.
    pub user_id: Option<String>,
}

/// Input payload for logging hours.
#[derive(Debug, Clone, PartialEq)]
pub struct LogTimesheetEntryInput {
    /// Project the hours belong to.
    pub project_id: String,
    /// Owner when logging on behalf of someone else.
    pub user_id: Option<String>,
    /// Calendar day of the work.
    pub date: NaiveDate,
    /// Worked hours.
    pub hours: f64,
    /// Optional work description.
    pub description: Option<String>,
}

/// Repository port for timesheet entries.
#[async_trait]
pub trait TimesheetRepository: Send + Sync {
    /// Lists company entries matching the query, newest day first.
    async fn list_entries(
        &self,
        company_id: CompanyId,
        query: TimesheetQuery,
    ) -> AppResult<Vec<TimesheetEntry>>;

    /// Finds an entry by id regardless of company.
    async fn find_entry(&self, entry_id: &str) -> AppResult<Option<TimesheetEntry>>;

    /// Inserts or replaces an entry.
    async fn save_entry(&self, entry: TimesheetEntry) -> AppResult<()>;

    /// Deletes an entry.
    async fn delete_entry(&self, entry_id: &str) -> AppResult<()>;
}
