use serde::{Deserialize, Serialize};

use crate::CompanyId;

/// User information captured in the authenticated session.
///
/// The permission list is a snapshot of the user's role at the moment the
/// session was issued. Role edits made afterwards are not visible until a new
/// session is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    display_name: String,
    email: Option<String>,
    company_id: CompanyId,
    role_id: String,
    role_name: String,
    permissions: Vec<String>,
}

impl UserIdentity {
    /// Creates a user identity from authentication, tenancy and role data.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        display_name: impl Into<String>,
        email: Option<String>,
        company_id: CompanyId,
    ) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            email,
            company_id,
            role_id: String::new(),
            role_name: String::new(),
            permissions: Vec::new(),
        }
    }

    /// Attaches the role snapshot resolved at session issuance.
    #[must_use]
    pub fn with_role(
        mut self,
        role_id: impl Into<String>,
        role_name: impl Into<String>,
        permissions: Vec<String>,
    ) -> Self {
        self.role_id = role_id.into();
        self.role_name = role_name.into();
        self.permissions = permissions;
        self
    }

    /// Returns the stable user identifier.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the email, if one is on file.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the company linked to the identity.
    #[must_use]
    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Returns the role identifier captured in the session.
    #[must_use]
    pub fn role_id(&self) -> &str {
        self.role_id.as_str()
    }

    /// Returns the role name captured in the session.
    #[must_use]
    pub fn role_name(&self) -> &str {
        self.role_name.as_str()
    }

    /// Returns the granted permission names captured in the session.
    #[must_use]
    pub fn permissions(&self) -> &[String] {
        self.permissions.as_slice()
    }
}
