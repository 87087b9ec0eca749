use serde::{Deserialize, Serialize};
use worklog_core::{AppResult, CompanyId, NonEmptyString};

/// Company member account as seen by authorization and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    user_id: String,
    company_id: CompanyId,
    role_id: String,
    first_name: String,
    last_name: String,
    email: Option<String>,
    is_active: bool,
}

impl UserAccount {
    /// Creates a validated active user account.
    pub fn new(
        user_id: impl Into<String>,
        company_id: CompanyId,
        role_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            user_id: NonEmptyString::new(user_id)?.into(),
            company_id,
            role_id: NonEmptyString::new(role_id)?.into(),
            first_name: first_name.into().trim().to_owned(),
            last_name: last_name.into().trim().to_owned(),
            email: email
                .map(|value| value.trim().to_lowercase())
                .filter(|value| !value.is_empty()),
            is_active: true,
        })
    }

    /// Returns the stable user identifier.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Returns the owning company.
    #[must_use]
    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Returns the assigned role identifier.
    #[must_use]
    pub fn role_id(&self) -> &str {
        self.role_id.as_str()
    }

    /// Returns the display name, `"first last"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// Returns the email, if one is on file.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns whether the account may sign in.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Assigns a different role.
    pub fn assign_role(&mut self, role_id: impl Into<String>) -> AppResult<()> {
        self.role_id = NonEmptyString::new(role_id)?.into();
        Ok(())
    }

    /// Replaces the first name. Blank input leaves it unchanged.
    pub fn set_first_name(&mut self, first_name: &str) {
        if !first_name.trim().is_empty() {
            self.first_name = first_name.trim().to_owned();
        }
    }

    /// Replaces the family name. Blank input leaves it unchanged.
    pub fn set_last_name(&mut self, last_name: &str) {
        if !last_name.trim().is_empty() {
            self.last_name = last_name.trim().to_owned();
        }
    }

    /// Re-enables sign-in for the account.
    pub fn activate(&mut self) {
        self.is_active = true;
    }

    /// Disables sign-in for the account.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
