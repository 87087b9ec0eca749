use tracing::warn;
use worklog_core::{AppError, AppResult, UserIdentity};
use worklog_domain::{Permission, TimesheetEntry};

use super::AuthorizationService;

/// Which entries an actor may list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimesheetViewScope {
    /// Every entry in the company.
    All,
    /// Only the actor's own entries.
    Own,
}

impl AuthorizationService {
    /// Resolves the listing scope. Viewing and managing timesheets both open all entries.
    #[must_use]
    pub fn timesheet_view_scope(&self, actor: &UserIdentity) -> TimesheetViewScope {
        if self.has_permission(actor, Permission::ViewAllTimesheets)
            || self.has_permission(actor, Permission::ManageTimesheets)
        {
            TimesheetViewScope::All
        } else {
            TimesheetViewScope::Own
        }
    }

    /// Resolves who owns a new entry.
    ///
    /// Only `manage_timesheets` may log on behalf of another user; any other
    /// requested owner is replaced by the actor.
    #[must_use]
    pub fn resolve_entry_owner(&self, actor: &UserIdentity, requested_user: Option<&str>) -> String {
        match requested_user.map(str::trim).filter(|value| !value.is_empty()) {
            Some(user_id) if self.has_permission(actor, Permission::ManageTimesheets) => {
                user_id.to_owned()
            }
            _ => actor.subject().to_owned(),
        }
    }

    /// Ensures the actor may change or delete an entry.
    pub fn require_entry_edit(&self, actor: &UserIdentity, entry: &TimesheetEntry) -> AppResult<()> {
        if entry.user_id() == actor.subject()
            || self.has_permission(actor, Permission::EditAllTimesheets)
        {
            return Ok(());
        }

        warn!(
            company_id = %actor.company_id(),
            subject = %actor.subject(),
            entry_id = %entry.entry_id(),
            "timesheet edit denied"
        );
        Err(AppError::Forbidden(
            "you can only change your own timesheet entries".to_owned(),
        ))
    }
}
