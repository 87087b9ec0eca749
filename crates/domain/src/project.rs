use serde::{Deserialize, Serialize};
use worklog_core::{AppError, AppResult, CompanyId, NonEmptyString};

/// Billable or internal project that timesheet entries are logged against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    project_id: String,
    company_id: CompanyId,
    name: NonEmptyString,
    amount: Option<f64>,
    is_paid: bool,
    is_active: bool,
}

impl Project {
    /// Creates a validated active project.
    pub fn new(
        project_id: impl Into<String>,
        company_id: CompanyId,
        name: impl Into<String>,
        amount: Option<f64>,
        is_paid: bool,
    ) -> AppResult<Self> {
        Ok(Self {
            project_id: NonEmptyString::new(project_id)?.into(),
            company_id,
            name: NonEmptyString::trimmed(name)?,
            amount: validate_amount(amount)?,
            is_paid,
            is_active: true,
        })
    }

    /// Returns the stable project identifier.
    #[must_use]
    pub fn project_id(&self) -> &str {
        self.project_id.as_str()
    }

    /// Returns the owning company.
    #[must_use]
    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the contracted amount, if any.
    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        self.amount
    }

    /// Returns whether the project is billed.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.is_paid
    }

    /// Returns whether the project is open for new entries.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Renames the project.
    pub fn rename(&mut self, name: impl Into<String>) -> AppResult<()> {
        self.name = NonEmptyString::trimmed(name)?;
        Ok(())
    }

    /// Replaces the contracted amount. `None` clears it.
    pub fn set_amount(&mut self, amount: Option<f64>) -> AppResult<()> {
        self.amount = validate_amount(amount)?;
        Ok(())
    }

    /// Marks the project billed or unbilled.
    pub fn set_paid(&mut self, is_paid: bool) {
        self.is_paid = is_paid;
    }

    /// Opens or closes the project for new entries.
    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    /// Returns the amount counted as revenue: paid projects with an amount only.
    #[must_use]
    pub fn billable_amount(&self) -> Option<f64> {
        self.amount.filter(|_| self.is_paid)
    }
}

fn validate_amount(amount: Option<f64>) -> AppResult<Option<f64>> {
    match amount {
        Some(amount) if !amount.is_finite() || amount < 0.0 => Err(AppError::Validation(format!(
            "project amount must be a non-negative number, got {amount}"
        ))),
        _ => Ok(amount),
    }
}
