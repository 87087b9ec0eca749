//! Worklog report runner.

#![forbid(unsafe_code)]

mod config;

use std::sync::Arc;

use serde::Serialize;

use worklog_application::{AuthorizationService, ReportService, SessionService};
use worklog_core::{AppError, AppResult};
use worklog_infrastructure::{InMemoryWorkspaceRepository, WorkspaceSnapshot};

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{ReportConfig, ReportView};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ReportConfig::load()?;
    let repository = Arc::new(load_workspace(config.data_path.as_str()).await?);

    let session_service = SessionService::new(repository.clone(), repository.clone());
    let report_service = ReportService::new(
        AuthorizationService::new(),
        repository.clone(),
        repository.clone(),
        repository.clone(),
        repository,
    );

    let actor = session_service
        .issue_identity(config.actor_id.as_str())
        .await?;
    info!(
        company_id = %actor.company_id(),
        subject = %actor.subject(),
        role = %actor.role_name(),
        "worklog-report started"
    );

    let rendered = match config.view {
        ReportView::Report => {
            let report = report_service.generate(&actor, &config.filter).await?;
            render(&report, config.pretty)?
        }
        ReportView::Dashboard => {
            let stats = report_service
                .dashboard_stats(&actor, &config.filter)
                .await?;
            render(&stats, config.pretty)?
        }
    };

    println!("{rendered}");
    Ok(())
}

fn render(payload: &impl Serialize, pretty: bool) -> AppResult<String> {
    if pretty {
        serde_json::to_string_pretty(payload)
    } else {
        serde_json::to_string(payload)
    }
    .map_err(|error| AppError::Internal(format!("failed to render report: {error}")))
}

async fn load_workspace(path: &str) -> AppResult<InMemoryWorkspaceRepository> {
    let payload = tokio::fs::read_to_string(path).await.map_err(|error| {
        AppError::Validation(format!("failed to read workspace snapshot '{path}': {error}"))
    })?;

    InMemoryWorkspaceRepository::from_snapshot(WorkspaceSnapshot::from_json(&payload)?)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
