use serde::{Deserialize, Serialize};
use worklog_core::{AppResult, CompanyId, NonEmptyString};

use crate::role::normalize_description;

/// Group of users sharing project assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    team_id: String,
    company_id: CompanyId,
    name: NonEmptyString,
    description: Option<String>,
    #[serde(default)]
    member_ids: Vec<String>,
    #[serde(default)]
    project_ids: Vec<String>,
}

impl Team {
    /// Creates a validated team without members or projects.
    pub fn new(
        team_id: impl Into<String>,
        company_id: CompanyId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            team_id: NonEmptyString::new(team_id)?.into(),
            company_id,
            name: NonEmptyString::trimmed(name)?,
            description: normalize_description(description),
            member_ids: Vec::new(),
            project_ids: Vec::new(),
        })
    }

    /// Returns the stable team identifier.
    #[must_use]
    pub fn team_id(&self) -> &str {
        self.team_id.as_str()
    }

    /// Returns the owning company.
    #[must_use]
    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Returns the team name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the optional team description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns member user ids in assignment order.
    #[must_use]
    pub fn member_ids(&self) -> &[String] {
        self.member_ids.as_slice()
    }

    /// Returns assigned project ids in assignment order.
    #[must_use]
    pub fn project_ids(&self) -> &[String] {
        self.project_ids.as_slice()
    }

    /// Returns whether the user belongs to this team.
    #[must_use]
    pub fn has_member(&self, user_id: &str) -> bool {
        self.member_ids.iter().any(|member_id| member_id == user_id)
    }

    /// Renames the team and replaces its description.
    pub fn update_details(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> AppResult<()> {
        self.name = NonEmptyString::trimmed(name)?;
        self.description = normalize_description(description);
        Ok(())
    }

    /// Replaces the member list. Duplicates and blank ids are dropped.
    pub fn replace_members(&mut self, member_ids: impl IntoIterator<Item = String>) {
        self.member_ids = dedup_ids(member_ids);
    }

    /// Replaces the project list. Duplicates and blank ids are dropped.
    pub fn replace_projects(&mut self, project_ids: impl IntoIterator<Item = String>) {
        self.project_ids = dedup_ids(project_ids);
    }
}

fn dedup_ids(ids: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for id in ids {
        let id = id.trim().to_owned();
        if !id.is_empty() && !values.contains(&id) {
            values.push(id);
        }
    }
    values
}
