
use std::sync::Arc;

use tracing::info;

use worklog_core::{AppError, AppResult, NonEmptyString, UserIdentity};
use worklog_domain::{AuditAction, Permission, UserAccount};

use crate::role_service::new_id;
use crate::{
    AuditEvent, AuditRepository, AuthorizationService, CreateUserInput, RoleRepository,
    UpdateUserInput, UserDirectory,
};

/// Application service for user account administration.
#[derive(Clone)]
pub struct UserService {
    authorization_service: AuthorizationService,
    users: Arc<dyn UserDirectory>,
    roles: Arc<dyn RoleRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl UserService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        users: Arc<dyn UserDirectory>,
        roles: Arc<dyn RoleRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            users,
            roles,
            audit_repository,
        }
    }

    /// Lists company users.
    pub async fn list_users(&self, actor: &UserIdentity) -> AppResult<Vec<UserAccount>> {
        self.authorization_service
            .require_permission(actor, Permission::ManageUsers)?;

        self.users.list_users(actor.company_id()).await
    }

    /// Creates an active user with a company role.
    ///
    /// Emails are unique across every company.
    pub async fn create_user(
        &self,
        actor: &UserIdentity,
        input: CreateUserInput,
    ) -> AppResult<UserAccount> {
        self.authorization_service
            .require_permission(actor, Permission::ManageUsers)?;

        let email = NonEmptyString::trimmed(input.email)?.as_str().to_lowercase();
        if self.users.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "a user with email '{email}' already exists"
            )));
        }
        self.ensure_company_role(actor, &input.role_id).await?;

        let user = UserAccount::new(
            new_id(),
            actor.company_id(),
            input.role_id,
            input.first_name,
            input.last_name,
            Some(email),
        )?;
        self.users.save_user(user.clone()).await?;

        self.append_user_event(
            actor,
            AuditAction::UserCreated,
            &user,
            format!("created user '{}'", user.display_name()),
        )
        .await?;

        Ok(user)
    }

    /// Applies the provided field changes to a user.
    pub async fn update_user(
        &self,
        actor: &UserIdentity,
        user_id: &str,
        input: UpdateUserInput,
    ) -> AppResult<UserAccount> {
        self.authorization_service
            .require_permission(actor, Permission::ManageUsers)?;

        let mut user = self.find_company_user(actor, user_id).await?;
        if let Some(role_id) = input.role_id.filter(|role_id| !role_id.trim().is_empty()) {
            self.ensure_company_role(actor, &role_id).await?;
            user.assign_role(role_id)?;
        }
        if let Some(first_name) = input.first_name {
            user.set_first_name(&first_name);
        }
        if let Some(last_name) = input.last_name {
            user.set_last_name(&last_name);
        }
        match input.is_active {
            Some(true) => user.activate(),
            Some(false) => user.deactivate(),
            None => {}
        }
        self.users.save_user(user.clone()).await?;

        self.append_user_event(
            actor,
            AuditAction::UserUpdated,
            &user,
            format!("updated user '{}'", user.display_name()),
        )
        .await?;

        Ok(user)
    }

    /// Blocks a user from signing in while keeping their timesheets.
    pub async fn deactivate_user(
        &self,
        actor: &UserIdentity,
        user_id: &str,
    ) -> AppResult<UserAccount> {
        self.update_user(
            actor,
            user_id,
            UpdateUserInput {
                is_active: Some(false),
                ..UpdateUserInput::default()
            },
        )
        .await
    }

    /// Deletes a user account permanently.
    pub async fn delete_user(&self, actor: &UserIdentity, user_id: &str) -> AppResult<()> {
        self.authorization_service
            .require_permission(actor, Permission::DeleteUsers)?;

        let user = self.find_company_user(actor, user_id).await?;
        self.users.delete_user(user.user_id()).await?;

        self.append_user_event(
            actor,
            AuditAction::UserDeleted,
            &user,
            format!("deleted user '{}'", user.display_name()),
        )
        .await
    }

    async fn find_company_user(
        &self,
        actor: &UserIdentity,
        user_id: &str,
    ) -> AppResult<UserAccount> {
        self.users
            .find_user(user_id)
            .await?
            .filter(|user| user.company_id() == actor.company_id())
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))
    }

    async fn ensure_company_role(&self, actor: &UserIdentity, role_id: &str) -> AppResult<()> {
        self.roles
            .find_role(actor.company_id(), role_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
    }

    async fn append_user_event(
        &self,
        actor: &UserIdentity,
        action: AuditAction,
        user: &UserAccount,
        detail: String,
    ) -> AppResult<()> {
        info!(
            company_id = %actor.company_id(),
            subject = %actor.subject(),
            user_id = %user.user_id(),
            action = action.as_str(),
            "user changed"
        );

        self.audit_repository
            .append_event(AuditEvent {
                company_id: actor.company_id(),
                subject: actor.subject().to_owned(),
                action,
                resource_type: "user".to_owned(),
                resource_id: user.user_id().to_owned(),
                detail: Some(detail),
            })
            .await
    }
}
