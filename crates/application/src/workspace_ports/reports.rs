use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use worklog_core::{AppError, AppResult, CompanyId};

/// Denormalized timesheet row returned by the report query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Entry owner.
    pub user_id: String,
    /// Entry owner display name.
    pub user_name: String,
    /// Project the hours belong to.
    pub project_id: String,
    /// Project name.
    pub project_name: String,
    /// Project contracted amount, if any.
    pub project_amount: Option<f64>,
    /// Logged hours.
    pub hours: f64,
    /// Calendar day of the entry.
    pub date: NaiveDate,
}

impl ReportRow {
    /// Returns the entry day as an ISO `YYYY-MM-DD` key.
    #[must_use]
    pub fn day_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Report query filter. `None` means unfiltered for every dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Inclusive lower date bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub to: Option<NaiveDate>,
    /// Only rows owned by this user.
    pub user_id: Option<String>,
    /// Only rows logged against this project.
    pub project_id: Option<String>,
    /// Only rows owned by members of this team.
    pub team_id: Option<String>,
}

impl ReportFilter {
    /// Builds a filter from transport parameters.
    ///
    /// Blank values and the literal `all` leave a dimension unfiltered. Dates
    /// use the ISO `YYYY-MM-DD` form.
    pub fn from_params(
        from: Option<&str>,
        to: Option<&str>,
        user_id: Option<&str>,
        project_id: Option<&str>,
        team_id: Option<&str>,
    ) -> AppResult<Self> {
        Ok(Self {
            from: parse_date_param("from", from)?,
            to: parse_date_param("to", to)?,
            user_id: selection_param(user_id),
            project_id: selection_param(project_id),
            team_id: selection_param(team_id),
        })
    }

    /// Returns whether the date lies within the inclusive bounds.
    #[must_use]
    pub fn includes_date(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// Returns whether a row passes every dimension of the filter.
    ///
    /// `team_member_ids` holds the members of the filtered team; it is ignored
    /// when no team filter is set.
    #[must_use]
    pub fn matches(&self, row: &ReportRow, team_member_ids: &[String]) -> bool {
        self.includes_date(row.date)
            && self
                .user_id
                .as_deref()
                .is_none_or(|user_id| row.user_id == user_id)
            && self
                .project_id
                .as_deref()
                .is_none_or(|project_id| row.project_id == project_id)
            && (self.team_id.is_none()
                || team_member_ids
                    .iter()
                    .any(|member_id| member_id == &row.user_id))
    }
}

fn selection_param(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty() && *value != "all")
        .map(str::to_owned)
}

fn parse_date_param(name: &str, value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|error| {
                AppError::Validation(format!("invalid '{name}' date '{value}': {error}"))
            })
        })
        .transpose()
}

/// Repository port for the report query.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Lists company timesheet rows matching the filter.
    async fn list_report_rows(
        &self,
        company_id: CompanyId,
        filter: &ReportFilter,
    ) -> AppResult<Vec<ReportRow>>;
}
