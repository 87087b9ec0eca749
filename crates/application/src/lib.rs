//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_ports;
mod authorization_service;
mod project_service;
pub mod report_aggregation;
mod report_service;
mod role_service;
mod session_service;
mod settings_service;
mod team_service;
mod timesheet_service;
mod user_service;
mod workspace_ports;

#[cfg(test)]
mod test_support;

pub use audit_ports::{AuditEvent, AuditRepository};
pub use authorization_service::{AuthorizationService, TimesheetViewScope};
pub use project_service::ProjectService;
pub use report_aggregation::{
    DailyHours, DashboardStats, ProjectHours, ProjectStat, ReportSummary, TeamHours, UserHours,
    UserStat,
};
pub use report_service::{ReportData, ReportService};
pub use role_service::RoleService;
pub use session_service::SessionService;
pub use settings_service::SettingsService;
pub use team_service::TeamService;
pub use timesheet_service::TimesheetService;
pub use user_service::UserService;
pub use workspace_ports::{
    CompanyRepository, CreateProjectInput, CreateRoleInput, CreateUserInput,
    LogTimesheetEntryInput, ProjectRepository, ReportFilter, ReportRepository, ReportRow,
    RoleListing, RoleRepository, TeamRepository, TimesheetQuery, TimesheetRepository,
    UpdateProjectInput, UpdateRoleInput, UpdateSettingsInput, UpdateUserInput, UserDirectory,
};
