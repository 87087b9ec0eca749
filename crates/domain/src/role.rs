use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use worklog_core::{AppError, AppResult, CompanyId, NonEmptyString};

use crate::security::{DefaultRole, Permission};

/// Company-scoped bundle of permissions assigned to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    role_id: String,
    company_id: CompanyId,
    name: NonEmptyString,
    description: Option<String>,
    is_default: bool,
    permissions: BTreeSet<Permission>,
}

impl Role {
    /// Creates a validated custom role.
    pub fn new(
        role_id: impl Into<String>,
        company_id: CompanyId,
        name: impl Into<String>,
        description: Option<String>,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> AppResult<Self> {
        Ok(Self {
            role_id: NonEmptyString::new(role_id)?.into(),
            company_id,
            name: NonEmptyString::trimmed(name)?,
            description: normalize_description(description),
            is_default: false,
            permissions: permissions.into_iter().collect(),
        })
    }

    /// Creates one of the system roles every company starts with.
    pub fn from_default(
        role_id: impl Into<String>,
        company_id: CompanyId,
        default_role: DefaultRole,
    ) -> AppResult<Self> {
        let mut role = Self::new(
            role_id,
            company_id,
            default_role.name(),
            Some(default_role.description().to_owned()),
            default_role.permissions().iter().copied(),
        )?;
        role.is_default = true;
        Ok(role)
    }

    /// Returns the stable role identifier.
    #[must_use]
    pub fn role_id(&self) -> &str {
        self.role_id.as_str()
    }

    /// Returns the owning company.
    #[must_use]
    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the optional role description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether this is a system role.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Returns the granted permissions.
    #[must_use]
    pub fn permissions(&self) -> &BTreeSet<Permission> {
        &self.permissions
    }

    /// Returns the granted permission names in catalog storage form.
    #[must_use]
    pub fn permission_names(&self) -> Vec<String> {
        self.permissions
            .iter()
            .map(|permission| permission.as_str().to_owned())
            .collect()
    }

    /// Renames the role. System roles keep their name and report `false`.
    pub fn rename(&mut self, name: impl Into<String>) -> AppResult<bool> {
        let name = NonEmptyString::trimmed(name)?;
        if self.is_default {
            return Ok(false);
        }

        self.name = name;
        Ok(true)
    }

    /// Replaces the role description. Blank values clear it.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = normalize_description(description);
    }

    /// Replaces the full grant set.
    pub fn replace_permissions(&mut self, permissions: impl IntoIterator<Item = Permission>) {
        self.permissions = permissions.into_iter().collect();
    }

    /// Ensures the role may be deleted given its current assignment count.
    pub fn ensure_deletable(&self, assigned_users: usize) -> AppResult<()> {
        if self.is_default {
            return Err(AppError::Validation(format!(
                "role '{}' is a default role and cannot be deleted",
                self.name
            )));
        }

        if assigned_users > 0 {
            return Err(AppError::Conflict(format!(
                "role '{}' is still assigned to {assigned_users} user(s)",
                self.name
            )));
        }

        Ok(())
    }
}

pub(crate) fn normalize_description(description: Option<String>) -> Option<String> {
    description.and_then(|value| {
        let trimmed = value.trim().to_owned();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}
