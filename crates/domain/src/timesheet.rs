use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use worklog_core::{AppError, AppResult, NonEmptyString};

use crate::role::normalize_description;

/// Hours one user logged against one project on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    entry_id: String,
    user_id: String,
    project_id: String,
    date: NaiveDate,
    hours: f64,
    description: Option<String>,
}

impl TimesheetEntry {
    /// Creates a validated timesheet entry.
    pub fn new(
        entry_id: impl Into<String>,
        user_id: impl Into<String>,
        project_id: impl Into<String>,
        date: NaiveDate,
        hours: f64,
        description: Option<String>,
    ) -> AppResult<Self> {
        if !hours.is_finite() || hours <= 0.0 {
            return Err(AppError::Validation(format!(
                "timesheet hours must be a positive number, got {hours}"
            )));
        }

        Ok(Self {
            entry_id: NonEmptyString::new(entry_id)?.into(),
            user_id: NonEmptyString::new(user_id)?.into(),
            project_id: NonEmptyString::new(project_id)?.into(),
            date,
            hours,
            description: normalize_description(description),
        })
    }

    /// Returns the stable entry identifier.
    #[must_use]
    pub fn entry_id(&self) -> &str {
        self.entry_id.as_str()
    }

    /// Returns the owning user.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Returns the project the hours were logged against.
    #[must_use]
    pub fn project_id(&self) -> &str {
        self.project_id.as_str()
    }

    /// Returns the calendar day of the entry.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the logged hours.
    #[must_use]
    pub fn hours(&self) -> f64 {
        self.hours
    }

    /// Returns the optional work description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
