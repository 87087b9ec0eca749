use async_trait::async_trait;

use worklog_core::{AppResult, CompanyId};
use worklog_domain::{Company, Theme};

/// Input payload for company settings. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSettingsInput {
    /// New company name; must not be blank.
    pub name: Option<String>,
    /// New theme.
    pub theme: Option<Theme>,
}

/// Repository port for company settings.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Finds a company by id.
    async fn find_company(&self, company_id: CompanyId) -> AppResult<Option<Company>>;

    /// Inserts or replaces a company.
    async fn save_company(&self, company: Company) -> AppResult<()>;
}
