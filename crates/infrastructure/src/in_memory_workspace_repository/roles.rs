use async_trait::async_trait;

use worklog_application::RoleRepository;
use worklog_core::{AppResult, CompanyId};
use worklog_domain::Role;

use super::InMemoryWorkspaceRepository;

#[async_trait]
impl RoleRepository for InMemoryWorkspaceRepository {
    async fn list_roles(&self, company_id: CompanyId) -> AppResult<Vec<Role>> {
        let roles = self.roles.read().await;

        let mut values: Vec<Role> = roles
            .iter()
            .filter_map(|((stored_company_id, _), role)| {
                (stored_company_id == &company_id).then_some(role.clone())
            })
            .collect();
        values.sort_by(|left, right| {
            right
                .is_default()
                .cmp(&left.is_default())
                .then_with(|| left.name().as_str().cmp(right.name().as_str()))
        });

        Ok(values)
    }

    async fn find_role(&self, company_id: CompanyId, role_id: &str) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .read()
            .await
            .get(&(company_id, role_id.to_owned()))
            .cloned())
    }

    async fn find_role_by_name(
        &self,
        company_id: CompanyId,
        name: &str,
    ) -> AppResult<Option<Role>> {
        Ok(self
            .roles
            .read()
            .await
            .values()
            .find(|role| role.company_id() == company_id && role.name().as_str() == name)
            .cloned())
    }

    async fn save_role(&self, role: Role) -> AppResult<()> {
        self.roles
            .write()
            .await
            .insert((role.company_id(), role.role_id().to_owned()), role);
        Ok(())
    }

    async fn delete_role(&self, company_id: CompanyId, role_id: &str) -> AppResult<()> {
        self.roles
            .write()
            .await
            .remove(&(company_id, role_id.to_owned()));
        Ok(())
    }
}
