//! Pure reducers that shape report rows into report view-models.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use worklog_domain::{Project, Team};

use crate::{ReportFilter, ReportRow};

/// Hours logged by one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserHours {
    /// User identifier.
    pub user_id: String,
    /// User display name taken from the first row seen.
    pub user_name: String,
    /// Summed hours.
    pub hours: f64,
    /// Number of distinct projects the user logged against.
    pub projects: usize,
}

/// Hours logged against one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectHours {
    /// Project identifier.
    pub project_id: String,
    /// Project name taken from the first row seen.
    pub project_name: String,
    /// Summed hours.
    pub hours: f64,
    /// Project amount carried from the first row seen; not a sum.
    pub revenue: f64,
    /// Number of distinct users that logged against the project.
    pub users: usize,
}

/// Hours logged by members of one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamHours {
    /// Team identifier.
    pub team_id: String,
    /// Team name.
    pub team_name: String,
    /// Summed hours of rows owned by team members.
    pub hours: f64,
    /// Team member count.
    pub members: usize,
}

/// Hours logged on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyHours {
    /// ISO `YYYY-MM-DD` day.
    pub date: String,
    /// Summed hours.
    pub hours: f64,
}

/// Headline report figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    /// Sum of all row hours.
    pub total_hours: f64,
    /// Sum of amounts of paid projects in scope.
    pub total_revenue: f64,
    /// Active projects in scope.
    pub total_projects: usize,
    /// Active users in scope.
    pub total_users: usize,
}

/// Hours and carried revenue for one project name on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectStat {
    /// Project name; rows of same-named projects share an entry.
    pub name: String,
    /// Summed hours.
    pub hours: f64,
    /// Project amount from the first row seen.
    pub revenue: f64,
}

/// Hours for one user display name on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStat {
    /// `"first last"` display name.
    pub name: String,
    /// Summed hours.
    pub hours: f64,
}

/// Company dashboard figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Active users in the company, regardless of filters.
    pub total_users: usize,
    /// Active projects in the company, regardless of filters.
    pub total_projects: usize,
    /// Sum of filtered row hours.
    pub total_hours: f64,
    /// Sum of amounts of every paid company project, regardless of filters.
    pub total_revenue: f64,
    /// Hours per project name, in first-seen order.
    pub project_stats: Vec<ProjectStat>,
    /// Hours per user name, in first-seen order.
    pub user_stats: Vec<UserStat>,
}

/// Groups rows by user in first-seen order.
#[must_use]
pub fn aggregate_by_user(rows: &[ReportRow]) -> Vec<UserHours> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut projects: Vec<HashSet<&str>> = Vec::new();
    let mut result: Vec<UserHours> = Vec::new();

    for row in rows {
        let position = *positions.entry(row.user_id.as_str()).or_insert_with(|| {
            result.push(UserHours {
                user_id: row.user_id.clone(),
                user_name: row.user_name.clone(),
                hours: 0.0,
                projects: 0,
            });
            projects.push(HashSet::new());
            result.len() - 1
        });

        result[position].hours += row.hours;
        projects[position].insert(row.project_id.as_str());
    }

    for (user, distinct_projects) in result.iter_mut().zip(projects) {
        user.projects = distinct_projects.len();
    }

    result
}

/// Groups rows by project in first-seen order.
///
/// `revenue` is the project amount on the first row of each group, a missing
/// amount counting as zero. It is carried, not summed.
#[must_use]
pub fn aggregate_by_project(rows: &[ReportRow]) -> Vec<ProjectHours> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut users: Vec<HashSet<&str>> = Vec::new();
    let mut result: Vec<ProjectHours> = Vec::new();

    for row in rows {
        let position = *positions.entry(row.project_id.as_str()).or_insert_with(|| {
            result.push(ProjectHours {
                project_id: row.project_id.clone(),
                project_name: row.project_name.clone(),
                hours: 0.0,
                revenue: row.project_amount.unwrap_or(0.0),
                users: 0,
            });
            users.push(HashSet::new());
            result.len() - 1
        });

        result[position].hours += row.hours;
        users[position].insert(row.user_id.as_str());
    }

    for (project, distinct_users) in result.iter_mut().zip(users) {
        project.users = distinct_users.len();
    }

    result
}

/// Sums member hours per team, dropping teams without hours.
#[must_use]
pub fn aggregate_by_team(rows: &[ReportRow], teams: &[Team]) -> Vec<TeamHours> {
    teams
        .iter()
        .filter_map(|team| {
            let hours: f64 = rows
                .iter()
                .filter(|row| team.has_member(row.user_id.as_str()))
                .map(|row| row.hours)
                .sum();

            (hours > 0.0).then(|| TeamHours {
                team_id: team.team_id().to_owned(),
                team_name: team.name().as_str().to_owned(),
                hours,
                members: team.member_ids().len(),
            })
        })
        .collect()
}

/// Sums hours per calendar day, ascending by date.
#[must_use]
pub fn aggregate_by_day(rows: &[ReportRow]) -> Vec<DailyHours> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for row in rows {
        *totals.entry(row.day_key()).or_insert(0.0) += row.hours;
    }

    totals
        .into_iter()
        .map(|(date, hours)| DailyHours { date, hours })
        .collect()
}

/// Computes headline figures for the filtered rows.
///
/// Revenue and project counts look at the company's projects rather than at
/// the rows, narrowed only by the project filter.
#[must_use]
pub fn summarize(
    rows: &[ReportRow],
    projects: &[Project],
    filter: &ReportFilter,
    active_users: usize,
) -> ReportSummary {
    let in_scope = |project: &&Project| {
        filter
            .project_id
            .as_deref()
            .is_none_or(|project_id| project.project_id() == project_id)
    };

    ReportSummary {
        total_hours: rows.iter().map(|row| row.hours).sum(),
        total_revenue: projects
            .iter()
            .filter(in_scope)
            .filter_map(Project::billable_amount)
            .sum(),
        total_projects: projects
            .iter()
            .filter(in_scope)
            .filter(|project| project.is_active())
            .count(),
        total_users: active_users,
    }
}

/// Computes dashboard figures.
///
/// Only the hour figures follow the rows; head counts and revenue cover the
/// whole company.
#[must_use]
pub fn dashboard_stats(
    rows: &[ReportRow],
    projects: &[Project],
    active_users: usize,
) -> DashboardStats {
    let mut project_positions: HashMap<&str, usize> = HashMap::new();
    let mut project_stats: Vec<ProjectStat> = Vec::new();
    let mut user_positions: HashMap<&str, usize> = HashMap::new();
    let mut user_stats: Vec<UserStat> = Vec::new();

    for row in rows {
        let position = *project_positions
            .entry(row.project_name.as_str())
            .or_insert_with(|| {
                project_stats.push(ProjectStat {
                    name: row.project_name.clone(),
                    hours: 0.0,
                    revenue: row.project_amount.unwrap_or(0.0),
                });
                project_stats.len() - 1
            });
        project_stats[position].hours += row.hours;

        let position = *user_positions
            .entry(row.user_name.as_str())
            .or_insert_with(|| {
                user_stats.push(UserStat {
                    name: row.user_name.clone(),
                    hours: 0.0,
                });
                user_stats.len() - 1
            });
        user_stats[position].hours += row.hours;
    }

    DashboardStats {
        total_users: active_users,
        total_projects: projects.iter().filter(|project| project.is_active()).count(),
        total_hours: rows.iter().map(|row| row.hours).sum(),
        total_revenue: projects.iter().filter_map(Project::billable_amount).sum(),
        project_stats,
        user_stats,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use worklog_core::CompanyId;
    use worklog_domain::{Project, Team};

    use super::{
        aggregate_by_day, aggregate_by_project, aggregate_by_team, aggregate_by_user,
        dashboard_stats, summarize,
    };
    use crate::{ReportFilter, ReportRow};

    fn row(user_id: &str, project_id: &str, hours: f64, day: u32) -> ReportRow {
        ReportRow {
            user_id: user_id.to_owned(),
            user_name: format!("User {user_id}"),
            project_id: project_id.to_owned(),
            project_name: format!("Project {project_id}"),
            project_amount: None,
            hours,
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap_or_default(),
        }
    }

    fn team(team_id: &str, members: &[&str]) -> Team {
        let Ok(mut team) = Team::new(team_id, CompanyId::new(), team_id, None) else {
            panic!("team should be valid");
        };
        team.replace_members(members.iter().map(|member| (*member).to_owned()));
        team
    }

    #[test]
    fn by_user_sums_hours_and_counts_distinct_projects() {
        let rows = vec![row("A", "P1", 2.0, 1), row("A", "P2", 3.0, 1), row("B", "P1", 1.0, 1)];

        let users = aggregate_by_user(&rows);
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].user_id, "A");
        assert!((users[0].hours - 5.0).abs() < f64::EPSILON);
        assert_eq!(users[0].projects, 2);
        assert_eq!(users[1].user_id, "B");
        assert!((users[1].hours - 1.0).abs() < f64::EPSILON);
        assert_eq!(users[1].projects, 1);
    }

    #[test]
    fn by_user_counts_repeat_project_once() {
        let rows = vec![row("A", "P1", 1.0, 1), row("A", "P1", 1.5, 2)];
        let users = aggregate_by_user(&rows);
        assert_eq!(users[0].projects, 1);
        assert!((users[0].hours - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn by_project_carries_first_seen_amount() {
        let mut first = row("A", "P1", 2.0, 1);
        first.project_amount = Some(1000.0);
        let mut second = row("B", "P1", 4.0, 2);
        second.project_amount = Some(2500.0);
        let unbilled = row("A", "P2", 1.0, 2);

        let projects = aggregate_by_project(&[first, second, unbilled]);
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].project_id, "P1");
        assert!((projects[0].revenue - 1000.0).abs() < f64::EPSILON);
        assert!((projects[0].hours - 6.0).abs() < f64::EPSILON);
        assert_eq!(projects[0].users, 2);
        assert!(projects[1].revenue.abs() < f64::EPSILON);
        assert_eq!(projects[1].users, 1);
    }

    #[test]
    fn by_team_skips_teams_without_member_hours() {
        let rows = vec![row("B", "P1", 3.0, 1)];
        let teams = vec![team("alpha", &["A"]), team("beta", &["B", "C"])];

        let result = aggregate_by_team(&rows, &teams);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].team_id, "beta");
        assert_eq!(result[0].members, 2);
        assert!((result[0].hours - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn by_day_sorts_ascending() {
        let rows = vec![row("A", "P1", 3.0, 2), row("A", "P1", 2.0, 1)];

        let days = aggregate_by_day(&rows);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2024-01-01");
        assert!((days[0].hours - 2.0).abs() < f64::EPSILON);
        assert_eq!(days[1].date, "2024-01-02");
        assert!((days[1].hours - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_rows_produce_empty_views() {
        assert!(aggregate_by_user(&[]).is_empty());
        assert!(aggregate_by_project(&[]).is_empty());
        assert!(aggregate_by_team(&[], &[team("alpha", &["A"])]).is_empty());
        assert!(aggregate_by_day(&[]).is_empty());
    }

    #[test]
    fn summary_counts_paid_active_projects_in_scope() {
        let company_id = CompanyId::new();
        let projects = [
            Project::new("P1", company_id, "Audit", Some(1000.0), true),
            Project::new("P2", company_id, "Internal", Some(300.0), false),
            Project::new("P3", company_id, "Retainer", Some(250.0), true),
        ]
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_default();
        let rows = vec![row("A", "P1", 2.0, 1), row("B", "P3", 1.5, 1)];

        let summary = summarize(&rows, &projects, &ReportFilter::default(), 4);
        assert!((summary.total_hours - 3.5).abs() < f64::EPSILON);
        assert!((summary.total_revenue - 1250.0).abs() < f64::EPSILON);
        assert_eq!(summary.total_projects, 3);
        assert_eq!(summary.total_users, 4);

        let filter = ReportFilter {
            project_id: Some("P3".to_owned()),
            ..ReportFilter::default()
        };
        let summary = summarize(&rows, &projects, &filter, 4);
        assert!((summary.total_revenue - 250.0).abs() < f64::EPSILON);
        assert_eq!(summary.total_projects, 1);
    }

    #[test]
    fn dashboard_groups_by_names_and_ignores_filters_for_totals() {
        let company_id = CompanyId::new();
        let mut projects = [
            Project::new("P1", company_id, "Audit", Some(1000.0), true),
            Project::new("P2", company_id, "Audit", Some(400.0), false),
            Project::new("P3", company_id, "Retainer", Some(250.0), true),
        ]
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_default();
        projects[2].set_active(false);

        let mut first = row("A", "P1", 2.0, 1);
        first.project_name = "Audit".to_owned();
        first.project_amount = Some(1000.0);
        let mut second = row("B", "P2", 3.0, 2);
        second.project_name = "Audit".to_owned();
        second.project_amount = Some(400.0);
        second.user_name = "User A".to_owned();

        let stats = dashboard_stats(&[first, second], &projects, 7);
        assert_eq!(stats.total_users, 7);
        assert_eq!(stats.total_projects, 2);
        assert!((stats.total_hours - 5.0).abs() < f64::EPSILON);
        assert!((stats.total_revenue - 1250.0).abs() < f64::EPSILON);

        assert_eq!(stats.project_stats.len(), 1);
        assert_eq!(stats.project_stats[0].name, "Audit");
        assert!((stats.project_stats[0].hours - 5.0).abs() < f64::EPSILON);
        assert!((stats.project_stats[0].revenue - 1000.0).abs() < f64::EPSILON);

        assert_eq!(stats.user_stats.len(), 1);
        assert!((stats.user_stats[0].hours - 5.0).abs() < f64::EPSILON);
    }
}
