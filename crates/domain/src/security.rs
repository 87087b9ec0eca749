use std::str::FromStr;

use serde::{Deserialize, Serialize};
use worklog_core::AppError;

/// Capabilities a role may grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Allows creating, editing and managing user accounts.
    ManageUsers,
    /// Allows creating and editing roles and their grants.
    ManageRoles,
    /// Allows reading dashboard analytics.
    ViewAnalytics,
    /// Allows deleting user accounts permanently.
    DeleteUsers,
    /// Allows modifying company settings.
    EditSettings,
    /// Allows creating and managing projects.
    ManageProjects,
    /// Allows managing every team in the company.
    ManageTeams,
    /// Allows managing only the teams the caller belongs to.
    ManageAssignedTeams,
    /// Allows reading timesheets of all users.
    ViewAllTimesheets,
    /// Allows editing timesheets of all users.
    EditAllTimesheets,
    /// Allows full timesheet management, including logging on behalf of others.
    ManageTimesheets,
    /// Allows generating reports.
    GenerateReports,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManageUsers => "manage_users",
            Self::ManageRoles => "manage_roles",
            Self::ViewAnalytics => "view_analytics",
            Self::DeleteUsers => "delete_users",
            Self::EditSettings => "edit_settings",
            Self::ManageProjects => "manage_projects",
            Self::ManageTeams => "manage_teams",
            Self::ManageAssignedTeams => "manage_assigned_teams",
            Self::ViewAllTimesheets => "view_all_timesheets",
            Self::EditAllTimesheets => "edit_all_timesheets",
            Self::ManageTimesheets => "manage_timesheets",
            Self::GenerateReports => "generate_reports",
        }
    }

    /// Returns the human-readable catalog description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::ManageUsers => "Create, edit, and manage user accounts",
            Self::ManageRoles => "Create and edit roles and permissions",
            Self::ViewAnalytics => "Access dashboard analytics and reports",
            Self::DeleteUsers => "Delete user accounts permanently",
            Self::EditSettings => "Modify system and company settings",
            Self::ManageProjects => "Create and manage projects",
            Self::ManageTeams => "Create and manage all teams",
            Self::ManageAssignedTeams => "Manage only assigned teams (for team leads)",
            Self::ViewAllTimesheets => "View timesheets for all users",
            Self::EditAllTimesheets => "Edit timesheets for all users",
            Self::ManageTimesheets => {
                "Full timesheet management including creating entries for others"
            }
            Self::GenerateReports => "Access and generate reports",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::ManageUsers,
            Permission::ManageRoles,
            Permission::ViewAnalytics,
            Permission::DeleteUsers,
            Permission::EditSettings,
            Permission::ManageProjects,
            Permission::ManageTeams,
            Permission::ManageAssignedTeams,
            Permission::ViewAllTimesheets,
            Permission::EditAllTimesheets,
            Permission::ManageTimesheets,
            Permission::GenerateReports,
        ];

        ALL
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}

/// Returns whether `requested` is one of the granted permission names.
///
/// Flat membership only: no wildcards and no implied permissions. Order and
/// duplicates in `granted` do not matter, and an empty grant list never matches.
#[must_use]
pub fn has_permission<S: AsRef<str>>(granted: &[S], requested: &str) -> bool {
    granted.iter().any(|value| value.as_ref() == requested)
}

/// Returns whether a user may manage a team.
///
/// `manage_teams` wins outright. `manage_assigned_teams` only applies when
/// `user_id` is one of `team_member_ids`; membership is not consulted otherwise.
#[must_use]
pub fn can_manage_team<S: AsRef<str>, M: AsRef<str>>(
    granted: &[S],
    user_id: &str,
    team_member_ids: &[M],
) -> bool {
    if has_permission(granted, Permission::ManageTeams.as_str()) {
        return true;
    }

    if has_permission(granted, Permission::ManageAssignedTeams.as_str()) {
        return team_member_ids
            .iter()
            .any(|member_id| member_id.as_ref() == user_id);
    }

    false
}

/// System roles created for every company at signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultRole {
    /// Company owner with every administrative grant.
    Owner,
    /// Regular employee without grants.
    Employee,
}

impl DefaultRole {
    /// Returns the role name stored for this default role.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Employee => "Employee",
        }
    }

    /// Returns the role description stored for this default role.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Owner => "Company owner with full access",
            Self::Employee => "Regular employee",
        }
    }

    /// Returns the permissions granted by this default role.
    #[must_use]
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Self::Owner => &[
                Permission::ManageUsers,
                Permission::ManageRoles,
                Permission::ViewAnalytics,
                Permission::DeleteUsers,
                Permission::EditSettings,
                Permission::ManageProjects,
                Permission::ManageTeams,
                Permission::ViewAllTimesheets,
                Permission::EditAllTimesheets,
                Permission::ManageTimesheets,
                Permission::GenerateReports,
            ],
            Self::Employee => &[],
        }
    }

    /// Returns all default roles in creation order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Owner, Self::Employee]
    }
}

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a role is created.
    RoleCreated,
    /// Emitted when a role name, description or grants change.
    RoleUpdated,
    /// Emitted when a role is deleted.
    RoleDeleted,
    /// Emitted when a role is assigned to a user.
    RoleAssigned,
    /// Emitted when a team is created.
    TeamCreated,
    /// Emitted when a team name or description changes.
    TeamUpdated,
    /// Emitted when a team is deleted.
    TeamDeleted,
    /// Emitted when team membership is replaced.
    TeamMembersReplaced,
    /// Emitted when team project assignments are replaced.
    TeamProjectsReplaced,
    /// Emitted when a timesheet entry is logged.
    TimesheetEntryLogged,
    /// Emitted when a timesheet entry is deleted.
    TimesheetEntryDeleted,
    /// Emitted when a project is created.
    ProjectCreated,
    /// Emitted when project details, billing or status change.
    ProjectUpdated,
    /// Emitted when a project is deleted.
    ProjectDeleted,
    /// Emitted when a user account is created.
    UserCreated,
    /// Emitted when a user account changes.
    UserUpdated,
    /// Emitted when a user account is deleted.
    UserDeleted,
    /// Emitted when company settings change.
    CompanySettingsUpdated,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoleCreated => "role.created",
            Self::RoleUpdated => "role.updated",
            Self::RoleDeleted => "role.deleted",
            Self::RoleAssigned => "role.assigned",
            Self::TeamCreated => "team.created",
            Self::TeamUpdated => "team.updated",
            Self::TeamDeleted => "team.deleted",
            Self::TeamMembersReplaced => "team.members.replaced",
            Self::TeamProjectsReplaced => "team.projects.replaced",
            Self::TimesheetEntryLogged => "timesheet.entry.logged",
            Self::TimesheetEntryDeleted => "timesheet.entry.deleted",
            Self::ProjectCreated => "project.created",
            Self::ProjectUpdated => "project.updated",
            Self::ProjectDeleted => "project.deleted",
            Self::UserCreated => "user.created",
            Self::UserUpdated => "user.updated",
            Self::UserDeleted => "user.deleted",
            Self::CompanySettingsUpdated => "company.settings.updated",
        }
    }
}
