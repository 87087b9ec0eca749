use std::sync::Arc;

use tracing::info;

use worklog_core::{AppError, AppResult, UserIdentity};
use worklog_domain::{AuditAction, Company, Permission};

use crate::{
    AuditEvent, AuditRepository, AuthorizationService, CompanyRepository, UpdateSettingsInput,
};

/// Application service for company-wide settings.
#[derive(Clone)]
pub struct SettingsService {
    authorization_service: AuthorizationService,
    companies: Arc<dyn CompanyRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl SettingsService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        companies: Arc<dyn CompanyRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            companies,
            audit_repository,
        }
    }

    /// Returns the caller's company settings.
    pub async fn get_settings(&self, actor: &UserIdentity) -> AppResult<Company> {
        self.authorization_service
            .require_permission(actor, Permission::EditSettings)?;

        self.find_company(actor).await
    }

    /// Updates the company name and theme.
    pub async fn update_settings(
        &self,
        actor: &UserIdentity,
        input: UpdateSettingsInput,
    ) -> AppResult<Company> {
        self.authorization_service
            .require_permission(actor, Permission::EditSettings)?;

        let mut company = self.find_company(actor).await?;
        if let Some(name) = input.name {
            company.rename(name)?;
        }
        if let Some(theme) = input.theme {
            company.set_theme(theme);
        }
        self.companies.save_company(company.clone()).await?;

        info!(
            company_id = %actor.company_id(),
            subject = %actor.subject(),
            theme = company.theme().as_str(),
            "company settings updated"
        );

        self.audit_repository
            .append_event(AuditEvent {
                company_id: actor.company_id(),
                subject: actor.subject().to_owned(),
                action: AuditAction::CompanySettingsUpdated,
                resource_type: "company".to_owned(),
                resource_id: actor.company_id().to_string(),
                detail: Some(format!(
                    "company '{}' uses theme '{}'",
                    company.name(),
                    company.theme().as_str()
                )),
            })
            .await?;

        Ok(company)
    }

    async fn find_company(&self, actor: &UserIdentity) -> AppResult<Company> {
        self.companies
            .find_company(actor.company_id())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("company '{}' does not exist", actor.company_id()))
            })
    }
}
