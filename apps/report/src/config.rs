use std::env;

use worklog_application::ReportFilter;
use worklog_core::{AppError, AppResult};

/// Which payload the binary prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportView {
    /// Full hour report; needs `generate_reports`.
    Report,
    /// Dashboard figures; needs `view_analytics`.
    Dashboard,
}

/// Runtime settings of the report binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Path of the JSON workspace snapshot.
    pub data_path: String,
    /// User the report is generated for.
    pub actor_id: String,
    /// Payload to print.
    pub view: ReportView,
    /// Row filter built from the `REPORT_*` variables.
    pub filter: ReportFilter,
    /// Whether to pretty-print the JSON output.
    pub pretty: bool,
}

impl ReportConfig {
    /// Loads settings from the process environment.
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let data_path = required_value(&lookup, "WORKLOG_DATA_PATH")?;
        let actor_id = required_value(&lookup, "WORKLOG_ACTOR_ID")?;

        let from = lookup("REPORT_FROM");
        let to = lookup("REPORT_TO");
        let user = lookup("REPORT_USER");
        let project = lookup("REPORT_PROJECT");
        let team = lookup("REPORT_TEAM");
        let filter = ReportFilter::from_params(
            from.as_deref(),
            to.as_deref(),
            user.as_deref(),
            project.as_deref(),
            team.as_deref(),
        )?;

        if let (Some(from), Some(to)) = (filter.from, filter.to)
            && from > to
        {
            return Err(AppError::Validation(format!(
                "REPORT_FROM ({from}) must not be after REPORT_TO ({to})"
            )));
        }

        let view = match lookup("REPORT_VIEW").as_deref().map(str::trim) {
            None | Some("" | "report") => ReportView::Report,
            Some("dashboard") => ReportView::Dashboard,
            Some(other) => {
                return Err(AppError::Validation(format!(
                    "invalid REPORT_VIEW value '{other}'"
                )));
            }
        };

        Ok(Self {
            data_path,
            actor_id,
            view,
            filter,
            pretty: parse_bool(&lookup, "REPORT_PRETTY", true)?,
        })
    }
}

fn required_value(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> AppResult<String> {
    lookup(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: bool,
) -> AppResult<bool> {
    match lookup(name) {
        Some(value) => value.trim().parse::<bool>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use worklog_core::AppError;

    use super::{ReportConfig, ReportView};

    fn load(values: &[(&str, &str)]) -> Result<ReportConfig, AppError> {
        let values: HashMap<String, String> = values
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ReportConfig::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn requires_data_path_and_actor() {
        assert!(matches!(load(&[]), Err(AppError::Validation(_))));
        assert!(matches!(
            load(&[("WORKLOG_DATA_PATH", "data.json"), ("WORKLOG_ACTOR_ID", "  ")]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn builds_filter_and_treats_all_as_unfiltered() {
        let Ok(config) = load(&[
            ("WORKLOG_DATA_PATH", "data.json"),
            ("WORKLOG_ACTOR_ID", "ann"),
            ("REPORT_FROM", "2024-01-01"),
            ("REPORT_USER", "all"),
            ("REPORT_TEAM", "t1"),
            ("REPORT_PRETTY", "false"),
        ]) else {
            panic!("config should load");
        };

        assert_eq!(config.actor_id, "ann");
        assert_eq!(config.view, ReportView::Report);
        assert!(config.filter.from.is_some());
        assert_eq!(config.filter.user_id, None);
        assert_eq!(config.filter.team_id.as_deref(), Some("t1"));
        assert!(!config.pretty);
    }

    #[test]
    fn rejects_bad_dates_and_inverted_ranges() {
        let base = [("WORKLOG_DATA_PATH", "data.json"), ("WORKLOG_ACTOR_ID", "ann")];

        let mut bad_date = base.to_vec();
        bad_date.push(("REPORT_TO", "31/01/2024"));
        assert!(matches!(load(&bad_date), Err(AppError::Validation(_))));

        let mut inverted = base.to_vec();
        inverted.extend([("REPORT_FROM", "2024-02-01"), ("REPORT_TO", "2024-01-01")]);
        assert!(matches!(load(&inverted), Err(AppError::Validation(_))));
    }

    #[test]
    fn selects_dashboard_view() {
        let base = [("WORKLOG_DATA_PATH", "data.json"), ("WORKLOG_ACTOR_ID", "ann")];

        let mut dashboard = base.to_vec();
        dashboard.push(("REPORT_VIEW", "dashboard"));
        assert_eq!(
            load(&dashboard).map(|config| config.view).ok(),
            Some(ReportView::Dashboard)
        );

        let mut unknown = base.to_vec();
        unknown.push(("REPORT_VIEW", "chart"));
        assert!(matches!(load(&unknown), Err(AppError::Validation(_))));
    }
}
