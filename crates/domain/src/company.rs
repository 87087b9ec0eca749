use std::str::FromStr;

use serde::{Deserialize, Serialize};
use worklog_core::{AppError, AppResult, CompanyId, NonEmptyString};

/// Interface theme a company picks for its members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Light palette.
    Light,
    /// Dark palette.
    Dark,
    /// Follow the operating system.
    #[default]
    System,
}

impl Theme {
    /// Returns a stable storage value for this theme.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl FromStr for Theme {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(AppError::Validation(format!(
                "invalid theme value '{value}'"
            ))),
        }
    }
}

/// Company-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    company_id: CompanyId,
    name: NonEmptyString,
    theme: Theme,
}

impl Company {
    /// Creates a company with the system theme.
    pub fn new(company_id: CompanyId, name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            company_id,
            name: NonEmptyString::trimmed(name)?,
            theme: Theme::default(),
        })
    }

    /// Returns the company identifier.
    #[must_use]
    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Returns the company name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the selected theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Renames the company.
    pub fn rename(&mut self, name: impl Into<String>) -> AppResult<()> {
        self.name = NonEmptyString::trimmed(name)?;
        Ok(())
    }

    /// Selects a theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}
