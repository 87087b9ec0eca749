mod companies;
mod projects;
mod reports;
mod roles;
mod teams;
mod timesheets;
mod users;

pub use companies::{CompanyRepository, UpdateSettingsInput};
pub use projects::{CreateProjectInput, ProjectRepository, UpdateProjectInput};
pub use reports::{ReportFilter, ReportRepository, ReportRow};
pub use roles::{CreateRoleInput, RoleListing, RoleRepository, UpdateRoleInput};
pub use teams::TeamRepository;
pub use timesheets::{LogTimesheetEntryInput, TimesheetQuery, TimesheetRepository};
pub use users::{CreateUserInput, UpdateUserInput, UserDirectory};
