
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use worklog_core::{AppError, AppResult, CompanyId, UserIdentity};
use worklog_domain::{AuditAction, DefaultRole, Permission, Role};

use crate::{
    AuditEvent, AuditRepository, AuthorizationService, CreateRoleInput, RoleListing,
    RoleRepository, UpdateRoleInput, UserDirectory,
};

/// Application service for role administration.
#[derive(Clone)]
pub struct RoleService {
    authorization_service: AuthorizationService,
    roles: Arc<dyn RoleRepository>,
    users: Arc<dyn UserDirectory>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl RoleService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        roles: Arc<dyn RoleRepository>,
        users: Arc<dyn UserDirectory>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            roles,
            users,
            audit_repository,
        }
    }

    /// Returns the permission catalog ordered by name.
    pub fn permission_catalog(&self, actor: &UserIdentity) -> AppResult<Vec<Permission>> {
        self.authorization_service
            .require_permission(actor, Permission::ManageRoles)?;

        let mut permissions = Permission::all().to_vec();
        permissions.sort_by_key(Permission::as_str);
        Ok(permissions)
    }

    /// Lists company roles with assignment counts. Any signed-in user may read them.
    pub async fn list_roles(&self, actor: &UserIdentity) -> AppResult<Vec<RoleListing>> {
        let roles = self.roles.list_roles(actor.company_id()).await?;

        let mut listings = Vec::with_capacity(roles.len());
        for role in roles {
            let assigned_users = self
                .users
                .count_users_with_role(actor.company_id(), role.role_id())
                .await?;
            listings.push(RoleListing {
                role,
                assigned_users,
            });
        }

        Ok(listings)
    }

    /// Creates the default roles for a freshly signed-up company.
    pub async fn bootstrap_default_roles(&self, company_id: CompanyId) -> AppResult<Vec<Role>> {
        if !self.roles.list_roles(company_id).await?.is_empty() {
            return Err(AppError::Conflict(format!(
                "company '{company_id}' already has roles"
            )));
        }

        let mut created = Vec::with_capacity(DefaultRole::all().len());
        for default_role in DefaultRole::all() {
            let role = Role::from_default(new_id(), company_id, *default_role)?;
            self.roles.save_role(role.clone()).await?;
            created.push(role);
        }

        info!(company_id = %company_id, "default roles created");
        Ok(created)
    }

    /// Creates a custom role and emits an audit event.
    pub async fn create_role(
        &self,
        actor: &UserIdentity,
        input: CreateRoleInput,
    ) -> AppResult<Role> {
        self.authorization_service
            .require_permission(actor, Permission::ManageRoles)?;

        let role = Role::new(
            new_id(),
            actor.company_id(),
            input.name,
            input.description,
            input.permissions,
        )?;
        self.ensure_name_available(actor.company_id(), &role).await?;
        self.roles.save_role(role.clone()).await?;

        self.append_role_event(
            actor,
            AuditAction::RoleCreated,
            &role,
            format!("created role '{}'", role.name()),
        )
        .await?;

        Ok(role)
    }

    /// Updates a role.
    ///
    /// Default roles keep their name; a name in the input is ignored for them.
    /// The description is always replaced. Grants are replaced only when given.
    pub async fn update_role(
        &self,
        actor: &UserIdentity,
        role_id: &str,
        input: UpdateRoleInput,
    ) -> AppResult<Role> {
        self.authorization_service
            .require_permission(actor, Permission::ManageRoles)?;

        let mut role = self.find_role(actor.company_id(), role_id).await?;

        if let Some(name) = input.name.filter(|value| !value.trim().is_empty())
            && role.rename(name)?
        {
            self.ensure_name_available(actor.company_id(), &role).await?;
        }
        role.set_description(input.description);
        if let Some(permissions) = input.permissions {
            role.replace_permissions(permissions);
        }

        self.roles.save_role(role.clone()).await?;

        self.append_role_event(
            actor,
            AuditAction::RoleUpdated,
            &role,
            format!(
                "updated role '{}' with {} permission(s)",
                role.name(),
                role.permissions().len()
            ),
        )
        .await?;

        Ok(role)
    }

    /// Deletes a custom role that has no assigned users.
    pub async fn delete_role(&self, actor: &UserIdentity, role_id: &str) -> AppResult<()> {
        self.authorization_service
            .require_permission(actor, Permission::ManageRoles)?;

        let role = self.find_role(actor.company_id(), role_id).await?;
        let assigned_users = self
            .users
            .count_users_with_role(actor.company_id(), role.role_id())
            .await?;
        role.ensure_deletable(assigned_users)?;

        self.roles
            .delete_role(actor.company_id(), role.role_id())
            .await?;

        self.append_role_event(
            actor,
            AuditAction::RoleDeleted,
            &role,
            format!("deleted role '{}'", role.name()),
        )
        .await
    }

    /// Assigns a company role to a company user.
    ///
    /// The user's open sessions keep their old grants until re-issued.
    pub async fn assign_role(
        &self,
        actor: &UserIdentity,
        user_id: &str,
        role_id: &str,
    ) -> AppResult<()> {
        self.authorization_service
            .require_permission(actor, Permission::ManageUsers)?;

        let role = self.find_role(actor.company_id(), role_id).await?;
        let mut user = self
            .users
            .find_user(user_id)
            .await?
            .filter(|user| user.company_id() == actor.company_id())
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))?;

        user.assign_role(role.role_id())?;
        self.users.save_user(user).await?;

        self.audit_repository
            .append_event(AuditEvent {
                company_id: actor.company_id(),
                subject: actor.subject().to_owned(),
                action: AuditAction::RoleAssigned,
                resource_type: "user_role".to_owned(),
                resource_id: format!("{user_id}:{}", role.role_id()),
                detail: Some(format!("assigned role '{}' to '{user_id}'", role.name())),
            })
            .await
    }

    async fn find_role(&self, company_id: CompanyId, role_id: &str) -> AppResult<Role> {
        self.roles
            .find_role(company_id, role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
    }

    async fn ensure_name_available(&self, company_id: CompanyId, role: &Role) -> AppResult<()> {
        let existing = self
            .roles
            .find_role_by_name(company_id, role.name().as_str())
            .await?;

        match existing {
            Some(existing) if existing.role_id() != role.role_id() => Err(AppError::Conflict(
                format!("role '{}' already exists", role.name()),
            )),
            _ => Ok(()),
        }
    }

    async fn append_role_event(
        &self,
        actor: &UserIdentity,
        action: AuditAction,
        role: &Role,
        detail: String,
    ) -> AppResult<()> {
        info!(
            company_id = %actor.company_id(),
            subject = %actor.subject(),
            role_id = %role.role_id(),
            action = action.as_str(),
            "role changed"
        );

        self.audit_repository
            .append_event(AuditEvent {
                company_id: actor.company_id(),
                subject: actor.subject().to_owned(),
                action,
                resource_type: "role".to_owned(),
                resource_id: role.role_id().to_owned(),
                detail: Some(detail),
            })
            .await
    }
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}
