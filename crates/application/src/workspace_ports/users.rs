use async_trait::async_trait;

use worklog_core::{AppResult, CompanyId};
use worklog_domain::UserAccount;

/// Input payload for creating user accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserInput {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Sign-in email, unique across companies.
    pub email: String,
    /// Company role to assign.
    pub role_id: String,
}

/// Input payload for updating user accounts. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserInput {
    /// New given name. Blank values are ignored.
    pub first_name: Option<String>,
    /// New family name. Blank values are ignored.
    pub last_name: Option<String>,
    /// New company role.
    pub role_id: Option<String>,
    /// New sign-in status.
    pub is_active: Option<bool>,
}

/// Repository port for company user accounts.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by id across all companies.
    async fn find_user(&self, user_id: &str) -> AppResult<Option<UserAccount>>;

    /// Finds a user by lowercased email across all companies.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<UserAccount>>;

    /// Lists users of one company.
    async fn list_users(&self, company_id: CompanyId) -> AppResult<Vec<UserAccount>>;

    /// Inserts or replaces a user account.
    async fn save_user(&self, user: UserAccount) -> AppResult<()>;

    /// Deletes a user account.
    async fn delete_user(&self, user_id: &str) -> AppResult<()>;

    /// Counts users of a company currently assigned to a role.
    async fn count_users_with_role(&self, company_id: CompanyId, role_id: &str)
    -> AppResult<usize>;
}
