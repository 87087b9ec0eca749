use std::sync::Arc;

use worklog_core::{AppError, CompanyId};
use worklog_domain::{AuditAction, Permission, Project};

use crate::test_support::{FakeAuditRepository, FakeWorkspace, identity};
use crate::{AuthorizationService, CreateProjectInput, UpdateProjectInput};

use super::ProjectService;

async fn seeded(
    company_id: CompanyId,
) -> (Arc<FakeWorkspace>, Arc<FakeAuditRepository>, ProjectService) {
    let workspace = Arc::new(FakeWorkspace::default());
    let Ok(project) = Project::new("p1", company_id, "Audit", Some(800.0), false) else {
        panic!("project should be valid");
    };
    workspace.projects.lock().await.push(project);

    let audit = Arc::new(FakeAuditRepository::default());
    let service = ProjectService::new(
        AuthorizationService::new(),
        workspace.clone(),
        audit.clone(),
    );
    (workspace, audit, service)
}

fn create_input(name: &str) -> CreateProjectInput {
    CreateProjectInput {
        name: name.to_owned(),
        amount: Some(1500.0),
        is_paid: true,
    }
}

#[tokio::test]
async fn project_manager_creates_projects() {
    let company_id = CompanyId::new();
    let (workspace, audit, service) = seeded(company_id).await;
    let manager = identity(company_id, "ann", &[Permission::ManageProjects]);

    let Ok(created) = service.create_project(&manager, create_input(" Tax ")).await else {
        panic!("project should be created");
    };
    assert_eq!(created.name().as_str(), "Tax");
    assert!(created.is_active());
    assert_eq!(workspace.projects.lock().await.len(), 2);
    assert_eq!(audit.events.lock().await[0].action, AuditAction::ProjectCreated);
}

#[tokio::test]
async fn changes_without_manage_projects_are_forbidden() {
    let company_id = CompanyId::new();
    let (workspace, _, service) = seeded(company_id).await;
    let employee = identity(company_id, "ben", &[Permission::ManageTeams]);

    assert!(matches!(
        service.create_project(&employee, create_input("Tax")).await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        service
            .update_project(&employee, "p1", UpdateProjectInput::default())
            .await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        service.delete_project(&employee, "p1").await,
        Err(AppError::Forbidden(_))
    ));
    assert_eq!(workspace.projects.lock().await.len(), 1);

    let listed = service.list_projects(&employee).await;
    assert_eq!(listed.map(|projects| projects.len()).ok(), Some(1));
}

#[tokio::test]
async fn update_applies_only_provided_fields() {
    let company_id = CompanyId::new();
    let (_, _, service) = seeded(company_id).await;
    let manager = identity(company_id, "ann", &[Permission::ManageProjects]);

    let updated = service
        .update_project(
            &manager,
            "p1",
            UpdateProjectInput {
                is_paid: Some(true),
                is_active: Some(false),
                ..UpdateProjectInput::default()
            },
        )
        .await;
    let Ok(updated) = updated else {
        panic!("update should succeed");
    };
    assert_eq!(updated.name().as_str(), "Audit");
    assert_eq!(updated.billable_amount(), Some(800.0));
    assert!(!updated.is_active());

    let cleared = service
        .update_project(
            &manager,
            "p1",
            UpdateProjectInput {
                amount: Some(None),
                ..UpdateProjectInput::default()
            },
        )
        .await;
    assert_eq!(cleared.map(|project| project.amount()).ok(), Some(None));
}

#[tokio::test]
async fn invalid_updates_are_rejected() {
    let company_id = CompanyId::new();
    let (_, _, service) = seeded(company_id).await;
    let manager = identity(company_id, "ann", &[Permission::ManageProjects]);

    let blank = service
        .update_project(
            &manager,
            "p1",
            UpdateProjectInput {
                name: Some("  ".to_owned()),
                ..UpdateProjectInput::default()
            },
        )
        .await;
    assert!(matches!(blank, Err(AppError::Validation(_))));

    let negative = service
        .update_project(
            &manager,
            "p1",
            UpdateProjectInput {
                amount: Some(Some(-5.0)),
                ..UpdateProjectInput::default()
            },
        )
        .await;
    assert!(matches!(negative, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn delete_is_scoped_to_the_company() {
    let company_id = CompanyId::new();
    let (workspace, _, service) = seeded(company_id).await;

    let stranger = identity(CompanyId::new(), "zed", &[Permission::ManageProjects]);
    assert!(matches!(
        service.delete_project(&stranger, "p1").await,
        Err(AppError::NotFound(_))
    ));

    let manager = identity(company_id, "ann", &[Permission::ManageProjects]);
    assert!(service.delete_project(&manager, "p1").await.is_ok());
    assert!(workspace.projects.lock().await.is_empty());
}
