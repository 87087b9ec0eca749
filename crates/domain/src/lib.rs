//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod company;
mod project;
mod role;
mod security;
mod team;
mod timesheet;
mod user;

pub use company::{Company, Theme};
pub use project::Project;
pub use role::Role;
pub use security::{AuditAction, DefaultRole, Permission, can_manage_team, has_permission};
pub use team::Team;
pub use timesheet::TimesheetEntry;
pub use user::UserAccount;
