use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use worklog_application::{AuditEvent, AuditRepository};
use worklog_core::{AppResult, CompanyId};

/// Append-only in-memory audit log.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    events: RwLock<Vec<AuditEvent>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the events of one company in append order.
    pub async fn list_events(&self, company_id: CompanyId) -> Vec<AuditEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|event| event.company_id == company_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        debug!(
            company_id = %event.company_id,
            subject = %event.subject,
            action = event.action.as_str(),
            resource_id = %event.resource_id,
            "audit event appended"
        );
        self.events.write().await.push(event);
        Ok(())
    }
}
