//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_audit_repository;
mod in_memory_workspace_repository;
mod workspace_snapshot;

pub use in_memory_audit_repository::InMemoryAuditRepository;
pub use in_memory_workspace_repository::InMemoryWorkspaceRepository;
pub use workspace_snapshot::{
    EntryRecord, ProjectRecord, RoleRecord, TeamRecord, UserRecord, WorkspaceSnapshot,
};
