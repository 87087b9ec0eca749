use async_trait::async_trait;

use worklog_application::CompanyRepository;
use worklog_core::{AppResult, CompanyId};
use worklog_domain::Company;

use super::InMemoryWorkspaceRepository;

#[async_trait]
impl CompanyRepository for InMemoryWorkspaceRepository {
    async fn find_company(&self, company_id: CompanyId) -> AppResult<Option<Company>> {
        Ok(self.companies.read().await.get(&company_id).cloned())
    }

    async fn save_company(&self, company: Company) -> AppResult<()> {
        self.companies
            .write()
            .await
            .insert(company.company_id(), company);
        Ok(())
    }
}
