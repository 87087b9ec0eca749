use std::sync::Arc;

use tracing::{info, warn};
use worklog_core::{AppError, AppResult, UserIdentity};

use crate::{RoleRepository, UserDirectory};

/// Issues session identities carrying a permission snapshot.
///
/// Credential verification happens before this service is called; it only
/// resolves who the user is and what their role grants right now.
#[derive(Clone)]
pub struct SessionService {
    users: Arc<dyn UserDirectory>,
    roles: Arc<dyn RoleRepository>,
}

impl SessionService {
    /// Creates a new session service.
    #[must_use]
    pub fn new(users: Arc<dyn UserDirectory>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { users, roles }
    }

    /// Resolves an authenticated user into a session identity.
    ///
    /// The role's grants are copied into the identity. Later role edits only
    /// take effect once a new identity is issued.
    pub async fn issue_identity(&self, user_id: &str) -> AppResult<UserIdentity> {
        let Some(user) = self
            .users
            .find_user(user_id)
            .await?
            .filter(|user| user.is_active())
        else {
            warn!(subject = %user_id, "session refused for unknown or inactive user");
            return Err(AppError::Unauthorized(format!(
                "user '{user_id}' cannot sign in"
            )));
        };

        let role = self
            .roles
            .find_role(user.company_id(), user.role_id())
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "role '{}' of user '{user_id}' does not exist",
                    user.role_id()
                ))
            })?;

        info!(
            company_id = %user.company_id(),
            subject = %user_id,
            role = %role.name(),
            "session identity issued"
        );

        Ok(UserIdentity::new(
            user.user_id(),
            user.display_name(),
            user.email().map(str::to_owned),
            user.company_id(),
        )
        .with_role(role.role_id(), role.name().as_str(), role.permission_names()))
    }
}
