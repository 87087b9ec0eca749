use async_trait::async_trait;

use worklog_application::UserDirectory;
use worklog_core::{AppResult, CompanyId};
use worklog_domain::UserAccount;

use super::InMemoryWorkspaceRepository;

#[async_trait]
impl UserDirectory for InMemoryWorkspaceRepository {
    async fn find_user(&self, user_id: &str) -> AppResult<Option<UserAccount>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<UserAccount>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email() == Some(email))
            .cloned())
    }

    async fn list_users(&self, company_id: CompanyId) -> AppResult<Vec<UserAccount>> {
        let mut users: Vec<UserAccount> = self
            .users
            .read()
            .await
            .values()
            .filter(|user| user.company_id() == company_id)
            .cloned()
            .collect();
        users.sort_by(|left, right| left.display_name().cmp(&right.display_name()));

        Ok(users)
    }

    async fn save_user(&self, user: UserAccount) -> AppResult<()> {
        self.users
            .write()
            .await
            .insert(user.user_id().to_owned(), user);
        Ok(())
    }

    async fn delete_user(&self, user_id: &str) -> AppResult<()> {
        let mut users = self.users.write().await;
        let mut teams = self.teams.write().await;
        let mut entries = self.entries.write().await;

        let Some(user) = users.remove(user_id) else {
            return Ok(());
        };

        // Entries and team memberships go with the account.
        entries.retain(|_, entry| entry.user_id() != user_id);
        for ((stored_company_id, _), team) in teams.iter_mut() {
            if *stored_company_id == user.company_id() && team.has_member(user_id) {
                let remaining: Vec<String> = team
                    .member_ids()
                    .iter()
                    .filter(|member_id| member_id.as_str() != user_id)
                    .cloned()
                    .collect();
                team.replace_members(remaining);
            }
        }

        Ok(())
    }

    async fn count_users_with_role(
        &self,
        company_id: CompanyId,
        role_id: &str,
    ) -> AppResult<usize> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|user| user.company_id() == company_id && user.role_id() == role_id)
            .count())
    }
}
