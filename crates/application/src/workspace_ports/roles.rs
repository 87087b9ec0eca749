use async_trait::async_trait;

use worklog_core::{AppResult, CompanyId};
use worklog_domain::{Permission, Role};

/// Role projection with its current assignment count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleListing {
    /// Role definition.
    pub role: Role,
    /// Number of users assigned to the role.
    pub assigned_users: usize,
}

/// Input payload for creating custom roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Unique role name in company scope.
    pub name: String,
    /// Optional role description.
    pub description: Option<String>,
    /// Grants to attach to the role.
    pub permissions: Vec<Permission>,
}

/// Input payload for updating roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRoleInput {
    /// New name. Ignored for default roles and when blank.
    pub name: Option<String>,
    /// New description. Always replaces the stored one.
    pub description: Option<String>,
    /// Replacement grants. `None` leaves grants untouched.
    pub permissions: Option<Vec<Permission>>,
}

/// Repository port for company roles.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Lists all roles of a company.
    async fn list_roles(&self, company_id: CompanyId) -> AppResult<Vec<Role>>;

    /// Finds a role by id in company scope.
    async fn find_role(&self, company_id: CompanyId, role_id: &str) -> AppResult<Option<Role>>;

    /// Finds a role by exact name in company scope.
    async fn find_role_by_name(&self, company_id: CompanyId, name: &str)
    -> AppResult<Option<Role>>;

    /// Inserts or replaces a role.
    async fn save_role(&self, role: Role) -> AppResult<()>;

    /// Deletes a role in company scope.
    async fn delete_role(&self, company_id: CompanyId, role_id: &str) -> AppResult<()>;
}
